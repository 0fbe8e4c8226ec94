//! Mutation Errors
//!
//! Outcomes of a mutation request that did not succeed, and the guard
//! conditions that stop a mutation before any request is issued.

use std::fmt::Debug;

use thiserror::Error;

/// Failure of an issued update request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// 401 from the update endpoint. Credentials are gone; never retried.
    #[error("unauthorized")]
    Unauthorized,
    /// Non-2xx, transport failure, or an explicit `success: false` body
    #[error("request failed: {message}")]
    RequestFailed { message: String },
    /// Body claimed JSON but could not be parsed
    #[error("invalid response shape: {message}")]
    InvalidResponseShape { message: String },
}

impl MutationError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }

    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidResponseShape {
            message: message.into(),
        }
    }

    /// Fatal to the session: the caller clears credentials instead of
    /// offering a retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}

/// Why a mutation entry point declined to act.
///
/// A rejection never changes state and never produces a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection<I: Debug> {
    #[error("dropped outside any item")]
    NoTarget,
    #[error("dropped onto itself")]
    SameItem,
    #[error("{0:?} is not in the current snapshot")]
    NotFound(I),
    #[error("a mutation is already in flight")]
    Busy,
    #[error("current status cannot be toggled")]
    Ineligible,
}
