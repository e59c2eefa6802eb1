use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::errors::{FetchError, PageError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Upstream(#[from] FetchError),
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::AlreadyLoading => Self::Conflict(err.to_string()),
            PageError::Fetch(fetch) => Self::Upstream(fetch),
        }
    }
}

/// Log an `AppError` at a level matching its status and reduce it to a status code.
pub fn map_app_error(err: AppError) -> StatusCode {
    let status = err.status();
    if status.is_server_error() {
        error!(error = %err, %status, "request failed");
    } else {
        warn!(error = %err, %status, "request rejected");
    }
    status
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// `AppError` rendered as a JSON body for handlers that answer non-page requests.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let status = map_app_error(self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
