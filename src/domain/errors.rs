use thiserror::Error;

/// Why a cat API response could not be turned into an [`Image`](super::images::Image).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no images returned: response is not a list")]
    NotAList,
    #[error("no images returned: response list is empty")]
    EmptyList,
    #[error("no images returned: first entry is not an object")]
    NotAnObject,
    #[error("no images returned: first entry has no url")]
    MissingUrl,
    #[error("no images returned: url is not a string")]
    UrlNotString,
    #[error("no images returned: url is empty")]
    EmptyUrl,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("image request failed: {0}")]
    Transport(String),
    #[error("image response is not valid JSON: {0}")]
    Parse(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("a new image is already loading")]
    AlreadyLoading,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
