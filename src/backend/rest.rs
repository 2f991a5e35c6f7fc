use super::{Backend, BackendClient, ClientContext, Error, Result, SessionTokens, SignedIn};
use crate::{
    config::BackendConfig,
    model::{Collection, MixRecord, User},
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Backend reached over the hosted service's REST endpoints: `auth/v1` for
/// authentication and `rest/v1` for table access.
#[derive(Clone, derive_more::Debug)]
pub struct RestBackend {
    #[debug(skip)]
    http: reqwest::Client,
    url: String,
    #[debug(skip)]
    anon_key: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let url = reqwest::Url::parse(&config.url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {e}", config.url)))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(config.url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("liquidcalc/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }
}

impl Backend for RestBackend {
    fn client(&self, context: ClientContext) -> Box<dyn BackendClient> {
        let session = match context {
            ClientContext::Browser => None,
            ClientContext::Server(tokens) => tokens,
        };

        Box::new(RestClient {
            backend: self.clone(),
            session,
        })
    }
}

struct RestClient {
    backend: RestBackend,
    session: Option<SessionTokens>,
}

impl RestClient {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let bearer = self
            .session
            .as_ref()
            .map_or(self.backend.anon_key.as_str(), |tokens| {
                tokens.access_token.as_str()
            });

        self.backend
            .http
            .request(method, format!("{}/{path}", self.backend.url))
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(bearer)
    }
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: User,
}

// Without auto-confirm the signup endpoint answers with the bare user.
#[derive(Deserialize)]
struct SignUpResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Api {
        status,
        message: error_message(status, &body),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    let body: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    body.msg
        .or(body.message)
        .or(body.error_description)
        .or(body.error)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

#[async_trait]
impl BackendClient for RestClient {
    async fn get_user(&self) -> Result<Option<User>> {
        if self.session.is_none() {
            return Err(Error::MissingSession);
        }

        let response = self.request(Method::GET, "auth/v1/user").send().await?;
        let user = check(response).await?.json::<User>().await?;

        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<()> {
        if self.session.is_none() {
            debug!("no session to sign out");
            return Ok(());
        }

        let response = self
            .request(Method::POST, "auth/v1/logout")
            .query(&[("scope", "global")])
            .send()
            .await?;

        match check(response).await {
            Ok(_) => Ok(()),
            // The session is already gone on the backend's side.
            Err(Error::Api {
                status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND,
                ..
            }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SignedIn> {
        let response = self
            .request(Method::POST, "auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;
        let TokenResponse {
            access_token,
            refresh_token,
            user,
        } = check(response).await?.json().await?;

        Ok(SignedIn {
            tokens: SessionTokens {
                access_token,
                refresh_token,
            },
            user,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<SessionTokens>> {
        let response = self
            .request(Method::POST, "auth/v1/signup")
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;
        let SignUpResponse {
            access_token,
            refresh_token,
        } = check(response).await?.json().await?;

        Ok(access_token
            .zip(refresh_token)
            .map(|(access_token, refresh_token)| SessionTokens {
                access_token,
                refresh_token,
            }))
    }

    async fn insert(&self, collection: Collection, record: &MixRecord) -> Result<()> {
        let response = self
            .request(Method::POST, &format!("rest/v1/{collection}"))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        check(response).await?;

        Ok(())
    }

    async fn select(&self, collection: Collection) -> Result<Vec<MixRecord>> {
        let response = self
            .request(Method::GET, &format!("rest/v1/{collection}"))
            .query(&[("select", "*")])
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }
}
