mod auth;
mod home;
mod mix;

pub use auth::{LoginForm, SignUpForm};
pub use mix::create_mix;

use crate::LiquidCalcContext;
use axum::{
    routing::{get, post},
    Router,
};

/// Every page, relative to an optional locale prefix.
pub fn pages() -> Router<LiquidCalcContext> {
    Router::new()
        .route("/", get(home::home))
        .route("/calculator", get(home::calculator))
        .route("/liquids", get(mix::liquids).post(mix::create_liquid))
        .route("/bases", get(mix::bases).post(mix::create_base))
        .route("/error", get(home::error))
        .route("/login", get(auth::form).post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", get(auth::logout))
        .route("/profile", get(auth::profile))
}

pub fn routes() -> Router<LiquidCalcContext> {
    Router::new()
        .merge(pages())
        .nest("/:locale", pages())
        .fallback(home::not_found)
}
