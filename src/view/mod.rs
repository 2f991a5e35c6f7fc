mod calculator;
mod error;
mod home;
mod layout;
mod login;
mod mix;
mod profile;

pub use calculator::*;
pub use error::*;
pub use home::*;
pub use layout::*;
pub use login::*;
pub use mix::*;
pub use profile::*;

use crate::{
    error::LiquidCalcError,
    extract::RequestClient,
    i18n::Locale,
    session::{resolve_profile, Profile},
    LiquidCalcContext,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_messages::Messages;
use rinja::Template;
use std::collections::BTreeMap;

/// What a handler wants sent back. Turned into a response in one place.
pub enum Outcome {
    /// Page content, wrapped in the layout by [`render_view`].
    Rendered(View),
    /// Stop here and send the client elsewhere.
    Redirect(String),
    NotFound,
}

impl Outcome {
    pub fn render<T: Template>(template: &T, data: ViewData) -> Result<Self, LiquidCalcError> {
        let content = template
            .render()
            .map_err(|e| anyhow!("failed to render template: {e}"))?;

        Ok(Self::Rendered(View {
            content,
            data,
            profile: None,
        }))
    }

    /// Hand a profile the handler already resolved to the layout.
    pub fn with_profile(self, profile: Profile) -> Self {
        match self {
            Outcome::Rendered(view) => Outcome::Rendered(View {
                profile: Some(profile),
                ..view
            }),
            other => other,
        }
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect(path.into())
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Rendered(View {
                content,
                data,
                profile,
            }) => {
                let mut response = Response::new(Body::empty());
                response.extensions_mut().insert(RenderedView(content));
                response.extensions_mut().insert(data);
                if let Some(profile) = profile {
                    response.extensions_mut().insert(profile);
                }
                response
            }
            Outcome::Redirect(path) => Redirect::to(&path).into_response(),
            Outcome::NotFound => LiquidCalcError::NotFound.into_response(),
        }
    }
}

pub struct View {
    content: String,
    data: ViewData,
    profile: Option<Profile>,
}

#[derive(Clone)]
struct RenderedView(String);

pub async fn render_view(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
    RequestClient(client): RequestClient,
    messages: Messages,
    response: Response,
) -> Response {
    let Some(RenderedView(content)) = response.extensions().get::<RenderedView>().cloned() else {
        return response;
    };
    let data = response
        .extensions()
        .get::<ViewData>()
        .cloned()
        .unwrap_or_default();

    let translator = context.i18n().translator(&locale);
    let profile = match response.extensions().get::<Profile>().cloned() {
        Some(profile) => profile,
        None => resolve_profile(client.as_ref()).await,
    };
    let navigation = context.layout_cache().navigation(translator).await;

    let layout = Layout {
        lang: locale.to_string(),
        title: data.get("title").cloned(),
        navigation,
        profile,
        profile_labels: ProfileLabels::new(translator),
        messages: messages.into_iter().map(Flash::from).collect(),
        content,
        version_string: version_string(),
    };

    match layout.render() {
        Ok(html) => (response.status(), Html(html)).into_response(),
        Err(e) => LiquidCalcError::from(anyhow!("failed to render layout: {e}")).into_response(),
    }
}

fn version_string() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or(env!("CARGO_PKG_VERSION"))
}

#[derive(Clone, Default)]
pub struct ViewData(pub BTreeMap<String, String>);

impl ViewData {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }
}

impl std::ops::DerefMut for ViewData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl std::ops::Deref for ViewData {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[macro_export]
macro_rules! view_data {
    ($($key:expr => $value:expr),* $(,)?) => {
        {
            let mut _data = $crate::view::ViewData::new();
        $(
            let _ = _data.insert($key.to_string(), $value.to_string());
        )*
            _data
        }
    }
}

#[macro_export]
macro_rules! liquidcalc_view {
    ($template:expr , { $($data:tt)* }) => {
        $crate::view::Outcome::render(&$template, $crate::view_data! { $($data)* })
    };
    ($template:expr) => {
        $crate::view::Outcome::render(&$template, $crate::view::ViewData::new())
    };
}
