//! This module defines the claims used in JSON Web Tokens (JWTs) within the domain layer.
//!
//! Zoom's Meeting SDK expects its claim names in JS style case, so every field
//! carries an explicit serde rename where Rust naming differs.

use serde::{Deserialize, Serialize};

/// A Zoom meeting number as the client sent it.
///
/// Clients send it either as a JSON string or a JSON number; the signature
/// embeds it in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeetingNumber {
    Number(u64),
    Text(String),
}

impl MeetingNumber {
    pub fn is_blank(&self) -> bool {
        match self {
            MeetingNumber::Number(_) => false,
            MeetingNumber::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Claims of a Meeting SDK signature.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeetingSdkClaims {
    #[serde(rename = "sdkKey")]
    pub sdk_key: String,
    // Older SDK versions read the key from `appKey`.
    #[serde(rename = "appKey")]
    pub app_key: String,
    pub mn: MeetingNumber,
    pub role: u8,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "tokenExp")]
    pub token_exp: i64,
}
