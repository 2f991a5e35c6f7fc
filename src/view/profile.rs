use rinja::Template;

#[derive(Template)]
#[template(path = "pages/profile.html")]
pub struct ProfilePage {
    pub title: String,
    pub signed_in_as: String,
    pub email: String,
}
