use async_trait::async_trait;

use super::errors::FetchError;
use super::images::Image;

/// Somewhere a fresh cat image can be fetched from.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self) -> Result<Image, FetchError>;
}
