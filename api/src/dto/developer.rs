use serde::{Deserialize, Serialize};
use validator::Validate;

use dt_core::domain::DeveloperToken;

/// Query string of `GET /api/developers`
///
/// Either an enumeration (`queryAll=1`, optionally `excludeArtifacts=1`) or a
/// single lookup (`username`, optional `token`).
#[derive(Debug, Clone, Deserialize)]
pub struct DeveloperQuery {
    /// Enumerate every record when set
    #[serde(rename = "queryAll", default)]
    pub query_all: Option<String>,

    /// With `queryAll`, leave out stored artifacts
    #[serde(rename = "excludeArtifacts", default)]
    pub exclude_artifacts: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    /// Token to verify; absent or empty means no verification
    #[serde(default)]
    pub token: Option<String>,
}

impl DeveloperQuery {
    pub fn wants_all(&self) -> bool {
        flag_set(self.query_all.as_deref())
    }

    pub fn excludes_artifacts(&self) -> bool {
        flag_set(self.exclude_artifacts.as_deref())
    }
}

/// A query flag is on unless absent, empty, `0` or `false`
fn flag_set(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Body of `POST /api/developers`
///
/// ```json
/// { "developer": { "username": "alice", "token": "abc123" } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeveloperRequest {
    pub developer: DeveloperPayload,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeveloperPayload {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,

    /// Opaque token; any string, including a sentinel such as `~` or `!`
    #[validate(required)]
    pub token: Option<String>,
}

/// `{username, token}` body returned by single-record operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperResponse {
    pub username: String,
    pub token: String,
}

impl From<DeveloperToken> for DeveloperResponse {
    fn from(record: DeveloperToken) -> Self {
        Self {
            username: record.username,
            token: record.token,
        }
    }
}

/// `{ret: [...]}` body returned by enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperListResponse {
    pub ret: Vec<DeveloperResponse>,
}

impl From<Vec<DeveloperToken>> for DeveloperListResponse {
    fn from(records: Vec<DeveloperToken>) -> Self {
        Self {
            ret: records.into_iter().map(DeveloperResponse::from).collect(),
        }
    }
}
