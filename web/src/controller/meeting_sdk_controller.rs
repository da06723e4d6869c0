use crate::error::WebErrorKind;
use crate::params::meeting_sdk::SignatureParams;
use crate::{AppState, Error};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::jwt as JwtApi;
use log::*;

/// GET Meeting SDK usage
#[utoipa::path(
    get,
    path = "/meetingsdktoken",
    responses(
        (status = 200, description = "`{message, sdkKey}` explaining how to request a signature"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn usage(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(JwtApi::meeting_sdk_usage(&app_state.config))
}

/// POST generate a Meeting SDK signature
///
/// The body is parsed here rather than by the `Json` extractor so that every
/// malformed request gets the same 400 `{error}` envelope.
#[utoipa::path(
    post,
    path = "/meetingsdktoken",
    request_body = SignatureParams,
    responses(
        (status = 200, description = "`{signature, sdkKey}`"),
        (status = 400, description = "Body is not a JSON object, or meetingNumber is missing or empty"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Meeting SDK key or secret is not configured"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_signature(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let params: SignatureParams = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejecting Meeting SDK signature request: {e}");
        Error::Web(WebErrorKind::Input(format!("Invalid request body: {e}")))
    })?;
    let role = params.role();

    let meeting_number = params.meeting_number.ok_or_else(|| {
        Error::Web(WebErrorKind::Input("meetingNumber is required".to_string()))
    })?;

    debug!(
        "POST generate Meeting SDK signature for meeting {:?} with role {}",
        meeting_number, role
    );

    let signature = JwtApi::generate_meeting_sdk_signature(&app_state.config, meeting_number, role)?;

    Ok(Json(signature))
}
