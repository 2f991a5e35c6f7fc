use rinja::Template;

/// Shown after a failed backend operation. Carries no diagnostic detail.
#[derive(Template)]
#[template(path = "pages/error.html")]
pub struct ErrorPage {
    pub title: String,
    pub message: String,
    pub back: String,
}
