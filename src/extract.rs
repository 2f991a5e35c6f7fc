use crate::{
    backend::{BackendClient, ClientContext, SessionTokens},
    error::LiquidCalcError,
    i18n::Locale,
    session::{remember_locale, remembered_locale, SESSION_TOKENS_KEY},
    LiquidCalcContext,
};
use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tower_sessions::Session;
use tracing::warn;

/// Rejects unsupported locale segments with a 404 before anything renders.
///
/// A supported segment is remembered in the session. Paths without one render
/// in the remembered locale, then the configured default.
#[async_trait::async_trait]
impl FromRequestParts<LiquidCalcContext> for Locale {
    type Rejection = LiquidCalcError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &LiquidCalcContext,
    ) -> Result<Self, Self::Rejection> {
        let params = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();
        let session = Session::from_request_parts(parts, state).await.ok();

        if let Some(requested) = params.get("locale") {
            let locale = state
                .i18n()
                .resolve(Some(requested.as_str()))
                .ok_or(LiquidCalcError::NotFound)?;
            if let Some(session) = &session {
                remember_locale(session, &locale).await;
            }
            return Ok(locale);
        }

        let remembered = match &session {
            Some(session) => remembered_locale(session).await,
            None => None,
        };

        Ok(remembered
            .and_then(|locale| state.i18n().resolve(Some(locale.as_str())))
            .unwrap_or_else(|| state.i18n().default_locale().clone()))
    }
}

/// A backend client acting for the session in the request's cookie.
pub struct RequestClient(pub Box<dyn BackendClient>);

#[async_trait::async_trait]
impl FromRequestParts<LiquidCalcContext> for RequestClient {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &LiquidCalcContext,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        let tokens = session
            .get::<SessionTokens>(SESSION_TOKENS_KEY)
            .await
            .unwrap_or_else(|e| {
                warn!("Could not read session tokens: {e}");
                None
            });

        Ok(Self(state.client(ClientContext::Server(tokens))))
    }
}

/// Form fields sent either url-encoded or as `multipart/form-data`.
pub struct Submission<T>(pub T);

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for Submission<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(value));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let mut fields = Map::new();
        while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field.text().await.map_err(bad_request)?;
            // Like FormData.get, the first value of a repeated field wins.
            fields.entry(name).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(fields))
            .map(Self)
            .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response())
    }
}

fn bad_request(error: impl std::fmt::Display) -> Response {
    (StatusCode::BAD_REQUEST, error.to_string()).into_response()
}
