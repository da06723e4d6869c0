//! OAuth grant types understood by the Zoom token endpoint.

use serde::{Deserialize, Serialize};

/// The `grant_type` sent to the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Server-to-Server OAuth: the app acts on behalf of a whole account.
    AccountCredentials,
    /// User-level OAuth: swap an authorization code for tokens.
    AuthorizationCode,
    /// User-level OAuth: swap a refresh token for a new token pair.
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::AccountCredentials => "account_credentials",
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::RefreshToken => "refresh_token",
        }
    }
}
