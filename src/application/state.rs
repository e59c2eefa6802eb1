use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::application::pages::PageStore;
use crate::domain::sources::ImageSource;
use crate::infrastructure::cat_api::CatApiClient;

/// Configuration for the outbound cat API and the page store: everything
/// that varies between production and test environments.
pub struct AppStateConfig {
    pub cat_api_url: Url,
    pub request_timeout: Duration,
    pub max_pages: NonZeroUsize,
}

#[derive(Clone)]
pub struct AppState {
    pub image_source: Arc<dyn ImageSource>,
    pub pages: Arc<PageStore>,
}

impl AppState {
    /// Build the application state backed by the real cat API client.
    pub fn from_config(config: AppStateConfig) -> reqwest::Result<Self> {
        let client = CatApiClient::with_timeout(config.cat_api_url, config.request_timeout)?;
        Ok(Self::with_image_source(Arc::new(client), config.max_pages))
    }

    /// Build the application state around any image source.
    pub fn with_image_source(image_source: Arc<dyn ImageSource>, max_pages: NonZeroUsize) -> Self {
        Self {
            image_source,
            pages: Arc::new(PageStore::new(max_pages)),
        }
    }
}
