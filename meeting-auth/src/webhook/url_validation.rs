//! Endpoint URL validation challenge.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;

use crate::error::{webhook_error, Error, WebhookErrorKind};

type HmacSha256 = Hmac<Sha256>;

/// Answer to a URL validation challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlValidationResponse {
    /// The challenge exactly as received.
    pub plain_token: String,
    /// Hex-encoded HMAC-SHA256 of `plain_token` keyed with the webhook secret.
    pub encrypted_token: String,
}

/// Hex-encoded HMAC-SHA256 of `plain_token` keyed with `secret`.
pub fn encrypt_plain_token(secret: &str, plain_token: &str) -> Result<String, Error> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| webhook_error(WebhookErrorKind::InvalidPayload, "Invalid HMAC key"))?;
    mac.update(plain_token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Answer the challenge carried by a `endpoint.url_validation` event body.
///
/// The challenge lives at `payload.plainToken`.
pub fn validate_url(secret: &str, event: &Value) -> Result<UrlValidationResponse, Error> {
    let plain_token = event
        .get("payload")
        .and_then(|payload| payload.get("plainToken"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            webhook_error(
                WebhookErrorKind::InvalidPayload,
                "URL validation event without payload.plainToken",
            )
        })?;

    Ok(UrlValidationResponse {
        plain_token: plain_token.to_string(),
        encrypted_token: encrypt_plain_token(secret, plain_token)?,
    })
}
