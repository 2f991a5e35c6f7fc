use crate::{backend::BackendClient, i18n::Locale};
use tower_sessions::Session;
use tracing::{debug, warn};

/// Session key holding the backend's [`SessionTokens`](crate::backend::SessionTokens).
pub const SESSION_TOKENS_KEY: &str = "backend.session";

/// Session key holding the locale of the last prefixed page visited.
pub const LOCALE_KEY: &str = "i18n.locale";

pub async fn remembered_locale(session: &Session) -> Option<String> {
    session.get::<String>(LOCALE_KEY).await.unwrap_or_else(|e| {
        warn!("Could not read remembered locale: {e}");
        None
    })
}

/// Store the locale so unprefixed paths keep rendering in it.
pub async fn remember_locale(session: &Session, locale: &Locale) {
    if remembered_locale(session).await.as_deref() == Some(locale.as_str()) {
        return;
    }

    if let Err(e) = session.insert(LOCALE_KEY, locale.as_str()).await {
        warn!("Could not remember locale {locale}: {e}");
    }
}

/// Which profile fragment the layout shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Profile {
    Anonymous,
    Authenticated { email: String },
}

impl Profile {
    pub fn email(&self) -> Option<&str> {
        match self {
            Profile::Anonymous => None,
            Profile::Authenticated { email } => Some(email),
        }
    }
}

/// Ask the backend who owns the client's session.
///
/// Errors are not distinguished from the absence of a user: both render as
/// logged out.
pub async fn resolve_profile(client: &dyn BackendClient) -> Profile {
    match client.get_user().await {
        Ok(Some(user)) => Profile::Authenticated {
            email: user.display_name().to_string(),
        },
        Ok(None) => Profile::Anonymous,
        Err(e) => {
            debug!("treating request as anonymous: {e}");
            Profile::Anonymous
        }
    }
}
