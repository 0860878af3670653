//! Developer token entity: the `username -> token` record held by the registry.

use serde::{Deserialize, Serialize};

/// Tokens longer than this are not tokens but stored artifacts (content hashes)
pub const MAX_TOKEN_LENGTH: usize = 30;

/// Token value marking a developer whose access has been restricted
pub const RESTRICTED_TOKEN: &str = "~";

/// Token value marking a developer registered but not yet issued a real token
pub const PENDING_TOKEN: &str = "!";

/// Token value echoed back by a successful delete
pub const DELETED_TOKEN_MARKER: &str = "TokenWasDeleted";

/// Meaning of a stored token value
///
/// The backend stores plain strings; consumers branch on this instead of
/// comparing against sentinel strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    /// A usable token
    Active,
    /// Access restricted (`~`)
    Restricted,
    /// Registered, awaiting a real token (`!`)
    Pending,
    /// Not a token at all; longer than [`MAX_TOKEN_LENGTH`]
    Artifact,
}

impl TokenStatus {
    /// Classify a raw stored value
    pub fn classify(token: &str) -> Self {
        if token.chars().count() > MAX_TOKEN_LENGTH {
            TokenStatus::Artifact
        } else if token == RESTRICTED_TOKEN {
            TokenStatus::Restricted
        } else if token == PENDING_TOKEN {
            TokenStatus::Pending
        } else {
            TokenStatus::Active
        }
    }

    /// Whether the holder can authenticate with this value
    pub fn grants_access(&self) -> bool {
        matches!(self, TokenStatus::Active)
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStatus::Active => write!(f, "active"),
            TokenStatus::Restricted => write!(f, "restricted"),
            TokenStatus::Pending => write!(f, "pending"),
            TokenStatus::Artifact => write!(f, "artifact"),
        }
    }
}

/// A developer and the opaque token currently registered for them
///
/// Serializes to the wire shape `{"username": ..., "token": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeveloperToken {
    /// Backend key; unique per registry
    pub username: String,

    /// Opaque token value
    pub token: String,
}

impl DeveloperToken {
    /// Creates a record from its parts
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Record returned by a successful delete; carries the marker, not the
    /// prior token
    pub fn deleted(username: impl Into<String>) -> Self {
        Self::new(username, DELETED_TOKEN_MARKER)
    }

    /// Typed meaning of the stored token
    pub fn status(&self) -> TokenStatus {
        TokenStatus::classify(&self.token)
    }

    /// Whether this record is a stored artifact rather than a developer token
    pub fn is_artifact(&self) -> bool {
        self.status() == TokenStatus::Artifact
    }
}
