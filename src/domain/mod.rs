pub mod errors;
pub mod ids;
pub mod images;
pub mod pages;
pub mod sources;

// Re-exports
pub use errors::{FetchError, PageError, ValidationError};
pub use images::Image;
pub use pages::{CatPage, PageState};
pub use sources::ImageSource;
