//! Zoom REST API client.
//!
//! Relays calls made with a caller-supplied access token. Whatever Zoom
//! answers, success or not, is handed back with its status so the caller can
//! pass it through unchanged.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use log::*;
use meeting_auth::http::ClientBuilder;
use serde_json::Value;

/// Status and body of a relayed Zoom API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxiedResponse {
    pub status: u16,
    /// Parsed as JSON when possible, otherwise the raw text as a JSON string.
    pub body: Value,
}

impl ProxiedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn from_text(status: u16, text: String) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self { status, body }
    }
}

pub struct ZoomApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ZoomApiClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = ClientBuilder::new().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET {base}/users/me` on behalf of the token's owner.
    pub async fn get_current_user(&self, access_token: &str) -> Result<ProxiedResponse, Error> {
        let url = format!("{}/users/me", self.base_url);
        debug!("Calling Zoom API: GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call Zoom API: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read Zoom API response body: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        let proxied = ProxiedResponse::from_text(status, text);
        if proxied.is_success() {
            info!("Zoom API answered {}", status);
        } else {
            warn!("Zoom API error {}: {}", status, proxied.body);
        }
        Ok(proxied)
    }
}
