use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::errors::FetchError;
use crate::domain::images::Image;
use crate::domain::sources::ImageSource;

pub const CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("catview/", env!("CARGO_PKG_VERSION"));

/// Fetches random cat images from the cat API search endpoint.
///
/// Every call is a single GET with no caching and no retry. The body is
/// parsed as untyped JSON and checked with [`Image::from_search_response`]
/// before anything is trusted.
#[derive(Debug, Clone)]
pub struct CatApiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatApiClient {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Build a client with its own connection pool and request timeout.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self::new(client, endpoint))
    }
}

#[async_trait]
impl ImageSource for CatApiClient {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_image(&self) -> Result<Image, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        // The status is not checked: an error payload fails shape validation.
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "cat API returned non-success status");
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(format!("failed to read response body: {e}")))?;

        let value: Value = serde_json::from_str(&body).inspect_err(|err| {
            warn!(error = %err, "cat API response is not JSON");
        })?;

        let image = Image::from_search_response(&value).inspect_err(|err| {
            warn!(error = %err, "cat API response failed validation");
        })?;

        debug!(url = %image.url, "fetched cat image");
        Ok(image)
    }
}
