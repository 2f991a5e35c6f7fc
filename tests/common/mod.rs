#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use liquidcalc::{
    backend::{self, Backend, BackendClient, ClientContext, SessionTokens, SignedIn},
    config::I18nConfig,
    i18n::I18n,
    model::{Collection, MixRecord, User},
    LiquidCalcContext,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tower::ServiceExt as _;
use tower_sessions::cookie::Key;

pub const ACCESS_TOKEN: &str = "access-token";

#[derive(Default)]
pub struct FakeState {
    pub rows: Mutex<Vec<(Collection, MixRecord)>>,
    pub fail_inserts: bool,
    pub fail_selects: bool,
    pub fail_sign_out: bool,
    /// Returned for every server-side client, session or not.
    pub user: Option<User>,
    /// Credentials accepted by `sign_in_with_password`.
    pub account: Option<(String, String)>,
    pub confirm_sign_up: bool,
    pub inserts: AtomicUsize,
    pub sign_outs: AtomicUsize,
    pub user_lookups: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct FakeBackend(pub Arc<FakeState>);

impl FakeBackend {
    pub fn new(state: FakeState) -> Self {
        Self(Arc::new(state))
    }

    pub fn rows(&self) -> Vec<(Collection, MixRecord)> {
        self.0.rows.lock().unwrap().clone()
    }

    pub fn inserts(&self) -> usize {
        self.0.inserts.load(Ordering::SeqCst)
    }

    pub fn sign_outs(&self) -> usize {
        self.0.sign_outs.load(Ordering::SeqCst)
    }

    pub fn user_lookups(&self) -> usize {
        self.0.user_lookups.load(Ordering::SeqCst)
    }
}

impl Backend for FakeBackend {
    fn client(&self, context: ClientContext) -> Box<dyn BackendClient> {
        let tokens = match context {
            ClientContext::Browser => None,
            ClientContext::Server(tokens) => tokens,
        };

        Box::new(FakeClient {
            state: self.0.clone(),
            tokens,
        })
    }
}

struct FakeClient {
    state: Arc<FakeState>,
    tokens: Option<SessionTokens>,
}

fn api_error(message: &str) -> backend::Error {
    backend::Error::Api {
        status: StatusCode::BAD_REQUEST,
        message: message.to_string(),
    }
}

#[async_trait]
impl BackendClient for FakeClient {
    async fn get_user(&self) -> backend::Result<Option<User>> {
        self.state.user_lookups.fetch_add(1, Ordering::SeqCst);

        if let Some(user) = &self.state.user {
            return Ok(Some(user.clone()));
        }

        match (&self.tokens, &self.state.account) {
            (Some(tokens), Some((email, _))) if tokens.access_token == ACCESS_TOKEN => {
                Ok(Some(User {
                    id: "user-1".to_string(),
                    email: Some(email.clone()),
                }))
            }
            (Some(_), _) => Err(api_error("invalid JWT")),
            (None, _) => Err(backend::Error::MissingSession),
        }
    }

    async fn sign_out(&self) -> backend::Result<()> {
        self.state.sign_outs.fetch_add(1, Ordering::SeqCst);

        if self.state.fail_sign_out {
            Err(api_error("sign out unavailable"))
        } else {
            Ok(())
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> backend::Result<SignedIn> {
        match &self.state.account {
            Some((known_email, known_password))
                if known_email == email && known_password == password =>
            {
                Ok(SignedIn {
                    tokens: tokens(),
                    user: User {
                        id: "user-1".to_string(),
                        email: Some(email.to_string()),
                    },
                })
            }
            _ => Err(api_error("Invalid login credentials")),
        }
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> backend::Result<Option<SessionTokens>> {
        if self.state.confirm_sign_up {
            Ok(None)
        } else {
            Ok(Some(tokens()))
        }
    }

    async fn insert(&self, collection: Collection, record: &MixRecord) -> backend::Result<()> {
        self.state.inserts.fetch_add(1, Ordering::SeqCst);

        if self.state.fail_inserts {
            return Err(api_error("new row violates row-level security policy"));
        }

        self.state
            .rows
            .lock()
            .unwrap()
            .push((collection, record.clone()));

        Ok(())
    }

    async fn select(&self, collection: Collection) -> backend::Result<Vec<MixRecord>> {
        if self.state.fail_selects {
            return Err(api_error("relation does not exist"));
        }

        Ok(self
            .state
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == collection)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

fn tokens() -> SessionTokens {
    SessionTokens {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: "refresh-token".to_string(),
    }
}

pub fn context(backend: &FakeBackend) -> LiquidCalcContext {
    let i18n = I18n::new(&I18nConfig {
        locales: vec!["en".to_string(), "de".to_string()],
        default_locale: "en".to_string(),
    })
    .unwrap();

    LiquidCalcContext::new(Arc::new(backend.clone()), i18n)
}

pub fn router(context: &LiquidCalcContext) -> Router {
    liquidcalc::app(context.clone(), Key::generate())
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_multipart(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    const BOUNDARY: &str = "liquidcalc-test-boundary";

    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

pub fn set_cookie(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap())
}

/// The `name=value` part of the session cookie set by a response.
pub fn session_cookie(response: &Response) -> String {
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
