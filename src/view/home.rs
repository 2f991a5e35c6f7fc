use rinja::Template;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct Home {
    pub title: String,
    pub intro: String,
}
