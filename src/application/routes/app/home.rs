use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use tracing::{Span, info};

use crate::application::errors::AppError;
use crate::application::pages::SharedPage;
use crate::application::routes::support::{is_datastar_request, render_fragment};
use crate::application::routes::{render_error_page, render_html};
use crate::application::state::AppState;
use crate::domain::ids::PageId;
use crate::presentation::web::templates::{CatFrameTemplate, HomeTemplate};
use crate::presentation::web::views::CatFrameView;

pub(super) const FRAME_SELECTOR: &str = "#cat-frame";

/// Fetch the first image on the server and hand the client a page that
/// already shows it. If the fetch fails the page is not rendered at all.
///
/// Handlers record `page.id` on the request span opened by the router.
pub(crate) async fn home_page(State(state): State<AppState>) -> Response {
    let initial = match state.image_source.fetch_image().await {
        Ok(image) => image,
        Err(err) => return render_error_page(AppError::from(err)),
    };

    let page = state.pages.create(initial);
    Span::current().record("page.id", tracing::field::display(page.id()));
    info!(
        pages = state.pages.len(),
        capacity = state.pages.capacity().get(),
        "created cat page"
    );

    render_page(&page)
}

pub(crate) async fn page_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let page = match parse_page_id(&id).and_then(|id| lookup_page(&state, id)) {
        Ok(page) => page,
        Err(err) => return render_error_page(err),
    };
    Span::current().record("page.id", tracing::field::display(page.id()));

    if is_datastar_request(&headers) {
        let frame = CatFrameView::from_page(page.id(), &page.snapshot());
        return render_fragment(CatFrameTemplate { frame }, FRAME_SELECTOR)
            .unwrap_or_else(render_error_page);
    }

    render_page(&page)
}

fn parse_page_id(id: &str) -> Result<PageId, AppError> {
    id.parse()
        .map_err(|_| AppError::validation(format!("invalid page id: {id}")))
}

pub(super) fn lookup_page(state: &AppState, id: PageId) -> Result<SharedPage, AppError> {
    state
        .pages
        .get(id)
        .ok_or_else(|| AppError::not_found("this page has expired, reload to get a new cat"))
}

fn render_page(page: &SharedPage) -> Response {
    let template = HomeTemplate {
        version_info: &crate::VERSION_INFO,
        frame: CatFrameView::from_page(page.id(), &page.snapshot()),
    };

    render_html(template).into_response()
}
