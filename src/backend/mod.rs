//! Handles to the hosted data and auth backend.
//!
//! A [`Backend`] hands out one [`BackendClient`] per request. Clients built
//! from [`ClientContext::Server`] act on behalf of the session stored in the
//! request's cookie, while [`ClientContext::Browser`] clients only carry the
//! project's public key.
use crate::model::{Collection, MixRecord, User};
use async_trait::async_trait;
use derive_masked::DebugMasked;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

mod rest;

pub use rest::RestBackend;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("backend responded with {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("auth session missing")]
    MissingSession,
}

/// Tokens issued by the auth service when a user signs in.
#[derive(Clone, DebugMasked, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    #[masked]
    pub access_token: String,
    #[masked]
    pub refresh_token: String,
}

#[derive(Clone, Debug)]
pub struct SignedIn {
    pub tokens: SessionTokens,
    pub user: User,
}

#[derive(Clone, Debug)]
pub enum ClientContext {
    /// Anonymous access with the public key only.
    Browser,
    /// Access on behalf of the session held in the request's cookie, if any.
    Server(Option<SessionTokens>),
}

pub trait Backend: Send + Sync + 'static {
    fn client(&self, context: ClientContext) -> Box<dyn BackendClient>;
}

#[async_trait]
pub trait BackendClient: Send + Sync {
    /// The user owning the client's session.
    async fn get_user(&self) -> Result<Option<User>>;

    /// Terminate the client's session on the backend.
    async fn sign_out(&self) -> Result<()>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SignedIn>;

    /// Register a new account. Returns no tokens when the backend wants the
    /// e-mail address confirmed before the first sign in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<SessionTokens>>;

    async fn insert(&self, collection: Collection, record: &MixRecord) -> Result<()>;

    async fn select(&self, collection: Collection) -> Result<Vec<MixRecord>>;
}
