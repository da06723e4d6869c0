//! Controller for Zoom OAuth token flows.

use crate::controller::snapshot_response;
use crate::error::WebErrorKind;
use crate::params::oauth::CodeParams;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::oauth_token as OAuthTokenApi;
use log::*;

/// GET /s2soauth
///
/// Requests an account-level token with the Server-to-Server OAuth app.
#[utoipa::path(
    get,
    path = "/s2soauth",
    responses(
        (status = 200, description = "Token response from Zoom, as returned"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Zoom rejected the request (`{error}` holds its body) or credentials are not configured"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn s2s_token(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET Server-to-Server OAuth token");

    let token = OAuthTokenApi::request_account_token(&app_state.config).await?;

    Ok(Json(token))
}

/// GET /redirecturlforoauth
///
/// The redirect target of the user-level OAuth app. With `code` the code is
/// exchanged and the token archived; without it the archived token is shown.
#[utoipa::path(
    get,
    path = "/redirecturlforoauth",
    params(CodeParams),
    responses(
        (status = 200, description = "New or archived token response, or `{message}` hint when none is archived"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Zoom rejected the code (`{error}` holds its body) or credentials are not configured"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn redirect(
    State(app_state): State<AppState>,
    Query(params): Query<CodeParams>,
) -> Result<Response, Error> {
    match params.code.as_deref().filter(|code| !code.is_empty()) {
        Some(code) => {
            debug!("GET OAuth redirect with authorization code");

            let token = OAuthTokenApi::exchange_code_and_store(
                app_state.snapshot_store_ref(),
                &app_state.config,
                code,
            )
            .await?;

            Ok(Json(token).into_response())
        }
        None => {
            debug!("GET OAuth redirect without code, returning archived token");

            Ok(snapshot_response(
                OAuthTokenApi::last_token(app_state.snapshot_store_ref()).await,
            ))
        }
    }
}

/// GET /oauthrefreshtoken
///
/// Exchanges the refresh token passed as `code` for a new token pair.
#[utoipa::path(
    get,
    path = "/oauthrefreshtoken",
    params(CodeParams),
    responses(
        (status = 200, description = "Refreshed token response from Zoom"),
        (status = 400, description = "No refresh token given"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Zoom rejected the refresh token (`{error}` holds its body) or credentials are not configured"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    Query(params): Query<CodeParams>,
) -> Result<impl IntoResponse, Error> {
    let refresh_token = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            Error::Web(WebErrorKind::Input(
                "Missing ?code=refresh_token parameter".to_string(),
            ))
        })?;

    debug!("GET refresh user OAuth token");

    let token = OAuthTokenApi::refresh_user_token(&app_state.config, &refresh_token).await?;

    Ok(Json(token))
}
