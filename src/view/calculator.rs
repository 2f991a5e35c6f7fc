use super::MixFormView;
use rinja::Template;

#[derive(Template)]
#[template(path = "pages/calculator.html")]
pub struct Calculator {
    pub title: String,
    pub liquid_form: MixFormView,
    pub base_form: MixFormView,
}
