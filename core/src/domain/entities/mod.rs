//! Domain entities representing core business objects.

pub mod developer;


// Re-export commonly used types
pub use developer::{
    DeveloperToken, TokenStatus,
    DELETED_TOKEN_MARKER, MAX_TOKEN_LENGTH, PENDING_TOKEN, RESTRICTED_TOKEN,
};
