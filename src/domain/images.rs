use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ValidationError;

/// A cat image as returned by the search endpoint. Only the URL is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

impl Image {
    /// Build an image from a URL, rejecting empty strings.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let image = Self { url: url.into() };
        image.validate()?;
        Ok(image)
    }

    /// Re-check the invariant on an existing value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(())
    }

    /// Validate an untyped search response and extract the first image.
    ///
    /// The response must be a JSON array whose first element is an object
    /// with a non-empty string `url`. Any other fields are ignored.
    pub fn from_search_response(value: &Value) -> Result<Self, ValidationError> {
        let entries = value.as_array().ok_or(ValidationError::NotAList)?;
        let first = entries.first().ok_or(ValidationError::EmptyList)?;
        let fields = first.as_object().ok_or(ValidationError::NotAnObject)?;

        match fields.get("url") {
            None => Err(ValidationError::MissingUrl),
            Some(Value::String(url)) => Self::new(url.as_str()),
            Some(_) => Err(ValidationError::UrlNotString),
        }
    }
}
