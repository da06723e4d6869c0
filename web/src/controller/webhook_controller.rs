//! Controller for Zoom webhook deliveries.
//!
//! Zoom cannot present the API bearer token, so these routes are never gated.

use crate::controller::snapshot_response;
use crate::{AppState, Error};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::webhook::{self as WebhookApi, WebhookOutcome};
use log::*;
use std::collections::HashMap;

/// POST /webhook
///
/// Answers URL validation challenges and archives every other event.
#[utoipa::path(
    post,
    path = "/webhook",
    request_body(content = String, description = "Zoom event notification", content_type = "application/json"),
    responses(
        (status = 200, description = "Validation challenge answered with `{plainToken, encryptedToken}`, or event archived (empty body)"),
        (status = 400, description = "Body is not JSON or the challenge has no plainToken"),
        (status = 401, description = "Signature verification is enabled and the delivery is not signed correctly"),
        (status = 500, description = "Webhook secret token is not configured"),
    )
)]
pub async fn receive(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Error> {
    debug!("POST Zoom webhook ({} bytes)", body.len());

    let outcome = WebhookApi::receive_event(
        app_state.snapshot_store_ref(),
        &app_state.config,
        &header_map(&headers),
        &body,
    )
    .await?;

    Ok(match outcome {
        WebhookOutcome::Validated(response) => Json(response).into_response(),
        WebhookOutcome::Archived => StatusCode::OK.into_response(),
    })
}

/// GET /webhook
///
/// Returns the last archived event.
#[utoipa::path(
    get,
    path = "/webhook",
    responses(
        (status = 200, description = "The last archived event, its raw text if it is no longer JSON, or `{message}` when none has arrived yet"),
    )
)]
pub async fn last_event(State(app_state): State<AppState>) -> impl IntoResponse {
    debug!("GET last Zoom webhook event");

    snapshot_response(WebhookApi::last_event(app_state.snapshot_store_ref()).await)
}

// Header names from `http` are already lowercase.
fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
