use crate::{i18n::Translator, layout_cache::NavLink, session::Profile};
use axum_messages::Message;
use rinja::Template;
use std::sync::Arc;

#[derive(Template)]
#[template(path = "layout.html")]
pub struct Layout {
    pub lang: String,
    pub title: Option<String>,
    pub navigation: Arc<Vec<NavLink>>,
    pub profile: Profile,
    pub profile_labels: ProfileLabels,
    pub messages: Vec<Flash>,
    pub content: String,
    pub version_string: &'static str,
}

pub struct ProfileLabels {
    pub logged_in_as: String,
    pub sign_out: String,
    pub log_in: String,
}

impl ProfileLabels {
    pub fn new(t: Translator<'_>) -> Self {
        Self {
            logged_in_as: t.t("Profile.loggedInAs"),
            sign_out: t.t("Profile.signOut"),
            log_in: t.t("Profile.logIn"),
        }
    }
}

/// A flash message, flattened for the template.
pub struct Flash {
    pub level: String,
    pub text: String,
}

impl From<Message> for Flash {
    fn from(message: Message) -> Self {
        Self {
            level: format!("{:?}", message.level).to_lowercase(),
            text: message.message,
        }
    }
}
