use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{Span, info, warn};

use super::home::{FRAME_SELECTOR, lookup_page};
use crate::application::errors::ApiError;
use crate::application::routes::support::{
    FlexiblePayload, PayloadSource, is_datastar_request, render_fragment,
};
use crate::application::state::AppState;
use crate::domain::errors::PageError;
use crate::domain::ids::PageId;
use crate::presentation::web::templates::CatFrameTemplate;
use crate::presentation::web::views::CatFrameView;

#[derive(Debug, Deserialize)]
pub(crate) struct ImageRequestPayload {
    #[serde(rename = "pageId", alias = "page_id")]
    page_id: PageId,
}

/// Swap the page's image for a fresh one.
///
/// A failed fetch is not an error for the caller: the previous image stays
/// and the failure is rendered in the frame. Only a request that arrives
/// while another is loading is rejected.
pub(crate) async fn request_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: FlexiblePayload<ImageRequestPayload>,
) -> Result<Response, ApiError> {
    let (payload, source) = payload.into_parts();
    let page = lookup_page(&state, payload.page_id)?;
    Span::current().record("page.id", tracing::field::display(page.id()));

    match page.request_new_image(&*state.image_source).await {
        Ok(image) => info!(url = %image.url, "showing new cat image"),
        Err(PageError::AlreadyLoading) => {
            return Err(PageError::AlreadyLoading.into());
        }
        Err(PageError::Fetch(err)) => {
            warn!(error = %err, "new cat image request failed, keeping previous image");
        }
    }

    let frame = CatFrameView::from_page(page.id(), &page.snapshot());

    if is_datastar_request(&headers) {
        render_fragment(CatFrameTemplate { frame }, FRAME_SELECTOR).map_err(ApiError::from)
    } else if matches!(source, PayloadSource::Form) {
        Ok(Redirect::to(&frame.page_url()).into_response())
    } else {
        Ok(Json(frame).into_response())
    }
}
