use askama::Template;

use super::views::CatFrameView;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub version_info: &'static crate::VersionInfo,
    pub frame: CatFrameView,
}

#[derive(Template)]
#[template(path = "partials/cat_frame.html")]
pub struct CatFrameTemplate {
    pub frame: CatFrameView,
}

#[derive(Template)]
#[template(path = "pages/error.html")]
pub struct ErrorTemplate {
    pub version_info: &'static crate::VersionInfo,
    pub status: u16,
    pub reason: &'static str,
    pub message: String,
}

pub fn render_template<T: Template>(template: T) -> askama::Result<String> {
    template.render()
}
