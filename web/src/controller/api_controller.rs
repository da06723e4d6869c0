use crate::params::api::CallApiParams;
use crate::{AppState, Error};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::api_call as ApiCallApi;
use log::*;
use serde_json::json;

/// GET call the Zoom API
///
/// Calls `GET /users/me` with the given access token and relays Zoom's answer.
#[utoipa::path(
    get,
    path = "/callapi",
    params(CallApiParams),
    responses(
        (status = 200, description = "Zoom's response body, or `{message, example}` when no token was given"),
        (status = 401, description = "Unauthorized, or Zoom rejected the token (`{error}` holds its body)"),
        (status = 500, description = "Zoom could not be reached"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn call_api(
    State(app_state): State<AppState>,
    Query(params): Query<CallApiParams>,
) -> Result<Response, Error> {
    let Some(access_token) = ApiCallApi::usable_access_token(params.accesstoken.as_deref()) else {
        debug!("GET callapi without access token, returning usage hint");
        return Ok(Json(ApiCallApi::api_call_usage()).into_response());
    };

    let proxied = ApiCallApi::call_current_user(&app_state.config, access_token).await?;
    let status = StatusCode::from_u16(proxied.status).unwrap_or(StatusCode::BAD_GATEWAY);

    if proxied.is_success() {
        Ok((status, Json(proxied.body)).into_response())
    } else {
        Ok((status, Json(json!({ "error": proxied.body }))).into_response())
    }
}
