//! Error types for the `meeting-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for meeting-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in meeting-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Webhook(WebhookErrorKind),
    Http(HttpErrorKind),
}

/// Errors from OAuth operations.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// The token endpoint answered 2xx with a body that is not a token response.
    InvalidResponse,
}

/// Errors from webhook validation.
#[derive(Debug, PartialEq)]
pub enum WebhookErrorKind {
    InvalidSignature,
    MissingSignature,
    MissingTimestamp,
    TimestampExpired,
    InvalidPayload,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
    /// The upstream answered with a non-success status.
    Upstream(UpstreamResponse),
}

/// A non-success response returned by a Zoom endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// The response body, parsed as JSON when possible and kept as a JSON string otherwise.
    pub body: Value,
}

impl UpstreamResponse {
    /// Build from a raw response body, falling back to a JSON string when it is not JSON.
    pub fn from_text(status: u16, text: String) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self { status, body }
    }
}

impl Error {
    /// The upstream response behind this error, if the upstream answered at all.
    pub fn upstream(&self) -> Option<&UpstreamResponse> {
        match &self.error_kind {
            ErrorKind::Http(HttpErrorKind::Upstream(response)) => Some(response),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind)?,
            ErrorKind::Webhook(kind) => write!(f, "Webhook error: {:?}", kind)?,
            ErrorKind::Http(HttpErrorKind::Upstream(response)) => {
                write!(f, "Request failed with status code {}", response.status)?
            }
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind)?,
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Helper function to create webhook errors.
pub fn webhook_error(kind: WebhookErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Webhook(kind),
    }
}

/// Helper function to create an error from a non-success upstream response.
pub fn upstream_error(status: u16, text: String) -> Error {
    Error {
        source: None,
        error_kind: ErrorKind::Http(HttpErrorKind::Upstream(UpstreamResponse::from_text(
            status, text,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_body_is_parsed_as_json() {
        let err = upstream_error(401, r#"{"reason":"Invalid client_id or client_secret","error":"invalid_client"}"#.to_string());

        let upstream = err.upstream().unwrap();
        assert_eq!(upstream.status, 401);
        assert_eq!(
            upstream.body,
            json!({"reason": "Invalid client_id or client_secret", "error": "invalid_client"})
        );
    }

    #[test]
    fn test_upstream_body_falls_back_to_string() {
        let err = upstream_error(502, "Bad Gateway".to_string());
        assert_eq!(err.upstream().unwrap().body, json!("Bad Gateway"));
    }

    #[test]
    fn test_display_for_upstream_error_names_status() {
        let err = upstream_error(400, "{}".to_string());
        assert_eq!(err.to_string(), "Request failed with status code 400");
    }

    #[test]
    fn test_display_includes_source_message() {
        let err = webhook_error(WebhookErrorKind::InvalidPayload, "missing plainToken");
        assert_eq!(
            err.to_string(),
            "Webhook error: InvalidPayload: missing plainToken"
        );
        assert!(err.upstream().is_none());
    }
}
