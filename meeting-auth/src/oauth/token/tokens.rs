//! OAuth token types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token response as returned by the Zoom token endpoint.
///
/// Only the fields this crate reads are typed. Everything else Zoom sends
/// (`token_type`, `expires_in`, `scope`, `api_url`, ...) is kept in `extra`
/// as is, so serializing the struct reproduces the upstream body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token for API requests.
    pub access_token: String,
    /// Refresh token; absent for account credentials grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
