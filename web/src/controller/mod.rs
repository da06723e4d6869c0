use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::Snapshot;

pub(crate) mod api_controller;
pub(crate) mod health_check_controller;
pub(crate) mod meeting_sdk_controller;
pub(crate) mod oauth_controller;
pub(crate) mod webhook_controller;

/// Renders a stored snapshot: JSON as JSON, anything else as the plain text it was.
fn snapshot_response(snapshot: Snapshot) -> Response {
    match snapshot {
        Snapshot::Json(value) => Json(value).into_response(),
        Snapshot::Raw(text) => text.into_response(),
    }
}
