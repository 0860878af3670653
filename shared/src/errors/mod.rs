//! Shared error response structure

use serde::{Deserialize, Serialize};

/// Error body returned by every failing registry endpoint
///
/// ```json
/// { "error": "The token submitted does not match the token returned." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message, shown verbatim by clients
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
