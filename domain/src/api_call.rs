//! Relays a Zoom REST API call made with a caller-supplied access token.

use crate::error::Error;
use crate::gateway::zoom_api::{ProxiedResponse, ZoomApiClient};
use serde::Serialize;
use service::config::Config;

/// Value the landing page pre-fills; treated the same as no token at all.
pub const PLACEHOLDER_TOKEN: &str = "xxxx";

/// Usage hint for callers that did not supply a token.
#[derive(Debug, Serialize)]
pub struct ApiCallUsage {
    pub message: &'static str,
    pub example: &'static str,
}

pub fn api_call_usage() -> ApiCallUsage {
    ApiCallUsage {
        message: "Add ?accesstoken=your_token to call the API",
        example: "/callapi?accesstoken=eyJ...",
    }
}

/// The token to call with, or `None` when it is absent, empty or the placeholder.
pub fn usable_access_token(token: Option<&str>) -> Option<&str> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != PLACEHOLDER_TOKEN)
}

/// Fetch the token owner's own user record from Zoom.
pub async fn call_current_user(config: &Config, access_token: &str) -> Result<ProxiedResponse, Error> {
    let client = ZoomApiClient::new(config.zoom_api_base_url())?;
    client.get_current_user(access_token).await
}
