mod home;
mod image;

use axum::routing::{get, post};

use crate::application::state::AppState;

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(home::home_page))
        .route("/pages/{id}", get(home::page_view))
        .route("/image", post(image::request_image))
}
