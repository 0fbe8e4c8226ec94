//! Fetch Errors

use optimistic_sync::MutationError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("api base url missing")]
    BaseUrlMissing,
    #[error("unauthorized")]
    Unauthorized,
    #[error("request failed: {message}")]
    Request { message: String },
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("could not decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Request {
            message: error.to_string(),
        }
    }
}

impl From<ApiError> for MutationError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => MutationError::Unauthorized,
            ApiError::Decode { message } => MutationError::InvalidResponseShape { message },
            other => MutationError::RequestFailed {
                message: other.to_string(),
            },
        }
    }
}
