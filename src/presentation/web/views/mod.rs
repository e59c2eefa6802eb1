mod cat_frame;

pub use cat_frame::CatFrameView;

pub(crate) fn page_path(id: impl std::fmt::Display) -> String {
    format!("/pages/{id}")
}
