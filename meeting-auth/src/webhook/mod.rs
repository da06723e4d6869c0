//! Webhook validation.
//!
//! Zoom proves ownership of a webhook endpoint with a one-time URL validation
//! challenge and signs every later delivery with the same secret token.

mod signature;
mod url_validation;

pub use signature::{ZoomSignatureValidator, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use url_validation::{encrypt_plain_token, validate_url, UrlValidationResponse};

use std::collections::HashMap;

use crate::error::Error;

/// Event name of Zoom's endpoint URL validation challenge.
pub const URL_VALIDATION_EVENT: &str = "endpoint.url_validation";

/// Trait for validating webhook signatures.
pub trait WebhookValidator: Send + Sync {
    /// Validate a webhook request.
    ///
    /// # Arguments
    ///
    /// * `headers` - HTTP headers from the webhook request, names lowercased
    /// * `body` - Raw request body bytes
    ///
    /// # Returns
    ///
    /// `true` if signature is valid, `false` otherwise.
    fn validate(&self, headers: &HashMap<String, String>, body: &[u8]) -> Result<bool, Error>;
}
