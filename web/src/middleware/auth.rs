use crate::error::WebErrorKind;
use crate::{AppState, Error};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::*;

/// Bearer token middleware that returns 401 Unauthorized when `REQUIRE_AUTH` is
/// enabled and the request does not carry `Authorization: Bearer <API_AUTH_TOKEN>`.
///
/// When `REQUIRE_AUTH` is disabled every request passes through untouched.
pub async fn require_auth(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !app_state.config.require_auth {
        return next.run(request).await;
    }

    let Some(expected) = app_state.config.api_auth_token() else {
        error!("REQUIRE_AUTH is enabled but API_AUTH_TOKEN is not set, rejecting request");
        return Error::Web(WebErrorKind::Auth).into_response();
    };

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => next.run(request).await,
        _ => {
            debug!("Rejecting {} {}: missing or wrong bearer token", request.method(), request.uri().path());
            Error::Web(WebErrorKind::Auth).into_response()
        }
    }
}
