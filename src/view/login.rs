use crate::i18n::Translator;
use rinja::Template;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct Login {
    pub title: String,
    pub email: String,
    pub password: String,
    pub log_in: String,
    pub sign_up: String,
}

impl Login {
    pub fn new(t: Translator<'_>) -> Self {
        Self {
            title: t.t("Login.title"),
            email: t.t("Login.email"),
            password: t.t("Login.password"),
            log_in: t.t("Login.logIn"),
            sign_up: t.t("Login.signUp"),
        }
    }
}
