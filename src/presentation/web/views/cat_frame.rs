use serde::Serialize;

use crate::domain::ids::PageId;
use crate::domain::pages::CatPage;

use super::page_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatFrameView {
    pub page_id: PageId,
    /// Absent while a new image is loading.
    pub image_url: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CatFrameView {
    pub fn from_page(id: PageId, page: &CatPage) -> Self {
        Self {
            page_id: id,
            image_url: page.image_url().map(str::to_string),
            loading: page.is_loading(),
            error: page.last_error().map(str::to_string),
        }
    }

    pub fn page_url(&self) -> String {
        page_path(self.page_id)
    }
}
