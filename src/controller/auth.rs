use crate::{
    backend::{ClientContext, SessionTokens},
    error::LiquidCalcError,
    extract::RequestClient,
    i18n::{Locale, Translator},
    liquidcalc_view,
    session::{resolve_profile, SESSION_TOKENS_KEY},
    view::{Login, Outcome, ProfilePage},
    LiquidCalcContext,
};
use anyhow::Context as _;
use axum::{extract::State, Form};
use axum_messages::Messages;
use derive_masked::DebugMasked;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

#[derive(Clone, Deserialize, Validate, DebugMasked)]
pub struct LoginForm {
    #[validate(email(code = "emailInvalid"))]
    pub email: String,
    #[validate(length(min = 1, code = "passwordRequired"))]
    #[masked]
    pub password: String,
}

#[derive(Clone, Deserialize, Validate, DebugMasked)]
pub struct SignUpForm {
    #[validate(email(code = "emailInvalid"))]
    pub email: String,
    #[validate(length(min = 6, code = "passwordTooShort"))]
    #[masked]
    pub password: String,
}

pub async fn form(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
) -> Result<Outcome, LiquidCalcError> {
    let t = context.i18n().translator(&locale);
    let view = Login::new(t);
    let title = view.title.clone();

    liquidcalc_view!(view, {
        "title" => title,
    })
}

pub async fn login(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
    session: Session,
    messages: Messages,
    Form(input): Form<LoginForm>,
) -> Result<Outcome, LiquidCalcError> {
    let t = context.i18n().translator(&locale);

    if let Err(validation) = input.validate() {
        flash_validation_errors(t, validation, messages);
        return Ok(Outcome::redirect("/login"));
    }

    let client = context.client(ClientContext::Browser);
    let signed_in = match client
        .sign_in_with_password(&input.email, &input.password)
        .await
    {
        Ok(signed_in) => signed_in,
        Err(e) => {
            warn!("Error signing in user({}): {e}", input.email);
            messages.error(t.t("Login.invalid"));
            return Ok(Outcome::redirect("/login"));
        }
    };

    start_session(&context, &session, signed_in.tokens).await?;
    info!("User({}) signed in", signed_in.user.id);

    messages.success(format!(
        "{} {}",
        t.t("Login.success"),
        signed_in.user.display_name()
    ));

    Ok(Outcome::redirect("/"))
}

pub async fn signup(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
    session: Session,
    messages: Messages,
    Form(input): Form<SignUpForm>,
) -> Result<Outcome, LiquidCalcError> {
    let t = context.i18n().translator(&locale);

    if let Err(validation) = input.validate() {
        flash_validation_errors(t, validation, messages);
        return Ok(Outcome::redirect("/login"));
    }

    let client = context.client(ClientContext::Browser);
    match client.sign_up(&input.email, &input.password).await {
        Ok(Some(tokens)) => {
            start_session(&context, &session, tokens).await?;
            messages.success(format!("{} {}", t.t("Login.success"), input.email));
            Ok(Outcome::redirect("/"))
        }
        Ok(None) => {
            messages.info(t.t("Login.confirm"));
            Ok(Outcome::redirect("/login"))
        }
        Err(e) => {
            warn!("Error signing up user({}): {e}", input.email);
            messages.error(t.t("Login.signUpFailed"));
            Ok(Outcome::redirect("/login"))
        }
    }
}

pub async fn logout(
    State(context): State<LiquidCalcContext>,
    RequestClient(client): RequestClient,
    session: Session,
) -> Outcome {
    match client.sign_out().await {
        Ok(()) => {
            if let Err(e) = session.flush().await {
                warn!("Failed to clear session after sign out: {e}");
            }
        }
        Err(e) => warn!("Sign out failed, keeping local session: {e}"),
    }

    context.layout_cache().revalidate().await;

    Outcome::redirect("/")
}

pub async fn profile(
    State(context): State<LiquidCalcContext>,
    locale: Locale,
    RequestClient(client): RequestClient,
) -> Result<Outcome, LiquidCalcError> {
    let profile = resolve_profile(client.as_ref()).await;
    let Some(email) = profile.email().map(str::to_string) else {
        return Ok(Outcome::redirect("/login"));
    };

    let t = context.i18n().translator(&locale);
    let title = t.t("ProfilePage.title");

    liquidcalc_view!(ProfilePage {
        title: title.clone(),
        signed_in_as: t.t("ProfilePage.signedInAs"),
        email,
    }, {
        "title" => title,
    })
    .map(|outcome| outcome.with_profile(profile))
}

async fn start_session(
    context: &LiquidCalcContext,
    session: &Session,
    tokens: SessionTokens,
) -> Result<(), LiquidCalcError> {
    session
        .insert(SESSION_TOKENS_KEY, tokens)
        .await
        .context("failed to store session tokens")?;
    session
        .cycle_id()
        .await
        .context("failed to cycle session id")?;

    context.layout_cache().revalidate().await;

    Ok(())
}

fn flash_validation_errors(t: Translator<'_>, validation: ValidationErrors, mut messages: Messages) {
    for (_, info) in validation.into_errors() {
        if let ValidationErrorsKind::Field(errors) = info {
            for error in errors {
                messages = messages.error(t.t(&format!("Login.{}", error.code)));
            }
        }
    }
}
