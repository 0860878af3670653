//! Registry error taxonomy.
//!
//! Every registry operation resolves to a value or exactly one of these
//! errors. The `Display` text of each variant is the message shown to callers
//! verbatim; the HTTP layer only decides the status code.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Message for a lookup of a username that was never registered
pub const NOT_REGISTERED_MESSAGE: &str = "The username provided does not match any username. \
Please make sure that you are signed up as an authorized developer before requesting a token.";

/// Message for a verification whose token differs from the stored one
pub const TOKEN_MISMATCH_MESSAGE: &str = "The token submitted does not match the token returned.";

/// Message for a delete issued without a username
pub const MISSING_PARAMETER_MESSAGE: &str = "Request must be in parameters";

/// Errors produced by the token registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The backing store is unreachable, timed out, or rejected the call.
    /// Carries the backend's own error text.
    #[error("{message}")]
    Backend { message: String },

    /// No record exists for the username
    #[error("{}", NOT_REGISTERED_MESSAGE)]
    NotFound { username: String },

    /// The supplied token does not equal the stored one
    #[error("{}", TOKEN_MISMATCH_MESSAGE)]
    TokenMismatch { username: String },

    /// The caller omitted a required argument
    #[error("{message}")]
    InvalidRequest { message: String },
}

/// Discriminant of [`RegistryError`], for callers that only need the class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Backend,
    NotFound,
    TokenMismatch,
    InvalidRequest,
}

impl RegistryError {
    /// Backend failure carrying the backend's error text
    pub fn backend(message: impl Into<String>) -> Self {
        RegistryError::Backend {
            message: message.into(),
        }
    }

    /// Missing-argument failure with a caller-facing message
    pub fn invalid_request(message: impl Into<String>) -> Self {
        RegistryError::InvalidRequest {
            message: message.into(),
        }
    }

    /// Missing-username failure on delete
    pub fn missing_parameter() -> Self {
        Self::invalid_request(MISSING_PARAMETER_MESSAGE)
    }

    /// Class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Backend { .. } => ErrorKind::Backend,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::TokenMismatch { .. } => ErrorKind::TokenMismatch,
            RegistryError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
