use anyhow::Result;
use axum::{middleware, Router};
use axum_messages::MessagesManagerLayer;
use base64::prelude::*;
use std::sync::Arc;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{
    cookie::{self, Key},
    Expiry, MemoryStore, SessionManagerLayer,
};
use tracing::{info, warn};

pub mod backend;
pub mod cli;
pub mod config;
mod context;
mod controller;
mod error;
mod extract;
pub mod i18n;
mod layout_cache;
pub mod model;
pub mod session;
pub mod view;

pub use {
    config::Config,
    context::LiquidCalcContext,
    controller::{create_mix, LoginForm, SignUpForm},
    error::LiquidCalcError,
    extract::{RequestClient, Submission},
    layout_cache::{LayoutCache, NavLink},
};

/// The full router with sessions, flash messages and the layout applied.
pub fn app(context: LiquidCalcContext, session_key: Key) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(cookie::time::Duration::days(1)))
        .with_signed(session_key);

    controller::routes()
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::map_response_with_state(
            context.clone(),
            view::render_view,
        ))
        .layer(MessagesManagerLayer)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

pub struct LiquidCalc {
    config: Config,
    context: LiquidCalcContext,
}

impl LiquidCalc {
    pub fn boot(config: Config) -> Result<Self> {
        let backend = backend::RestBackend::new(&config.backend)?;
        let i18n = i18n::I18n::new(&config.i18n)?;
        let context = LiquidCalcContext::new(Arc::new(backend), i18n);

        Ok(Self { config, context })
    }

    pub async fn serve(self) -> Result<()> {
        let session_key = if let Some(session_key) = &self.config.session_key {
            let session_key = BASE64_STANDARD.decode(session_key)?;
            Key::try_from(session_key.as_slice())?
        } else {
            warn!("No session_key configured. Falling back to generated key. This will invalidate any sessions when the server is stopped.");
            Key::generate()
        };

        let router = app(self.context, session_key);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address).await?;
        info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
