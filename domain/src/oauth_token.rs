//! Zoom OAuth token flows.
//!
//! Three flows are supported: the Server-to-Server account credentials grant,
//! the user-level authorization code grant and the refresh grant. Only the
//! result of the authorization code grant is archived as the last OAuth token
//! snapshot.

use crate::error::Error;
use log::*;
use meeting_auth::http::ClientBuilder;
use meeting_auth::oauth::providers::zoom::Provider;
use meeting_auth::oauth::ClientCredentials;
use secrecy::SecretString;
use serde_json::{json, Value};
use service::config::Config;
use service::snapshot::{Snapshot, SnapshotKey, SnapshotStore};

pub use meeting_auth::oauth::token::TokenResponse;

/// Hint returned while no token has been archived yet.
pub const NO_TOKEN_MESSAGE: &str =
    "No OAuth data. Add ?code=xxx to exchange authorization code.";

/// Request an account-level access token with the Server-to-Server OAuth app.
pub async fn request_account_token(config: &Config) -> Result<TokenResponse, Error> {
    let account_id = config
        .zoom_s2s_account_id()
        .ok_or_else(|| Error::config("ZOOM_S2S_ACCOUNTID"))?;
    let provider = s2s_provider(config)?;

    let token = provider.account_credentials(&account_id).await?;
    info!("Obtained Server-to-Server OAuth token");
    Ok(token)
}

/// Exchange an authorization code for a user token and archive the result.
///
/// A failed archive write is logged; the token is returned regardless.
pub async fn exchange_code_and_store(
    store: &dyn SnapshotStore,
    config: &Config,
    code: &str,
) -> Result<TokenResponse, Error> {
    let provider = user_provider(config)?;

    let token = provider
        .exchange_code(code, config.zoom_oauth_redirect_uri())
        .await?;
    info!("Exchanged authorization code for user OAuth token");

    match serde_json::to_value(&token) {
        Ok(value) => {
            if let Err(e) = store.write(SnapshotKey::LastOAuthToken, &value).await {
                warn!("Failed to archive OAuth token: {:?}", e);
            }
        }
        Err(e) => warn!("Failed to serialize OAuth token for archiving: {:?}", e),
    }

    Ok(token)
}

/// Exchange a refresh token for a new user token. The result is not archived.
pub async fn refresh_user_token(config: &Config, refresh_token: &str) -> Result<TokenResponse, Error> {
    let provider = user_provider(config)?;

    let token = provider.refresh_token(refresh_token).await?;
    info!("Refreshed user OAuth token");
    Ok(token)
}

/// The last archived user token, or the usage hint.
pub async fn last_token(store: &dyn SnapshotStore) -> Snapshot {
    match store.read(SnapshotKey::LastOAuthToken).await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => Snapshot::Json(no_token_hint()),
        Err(e) => {
            warn!("Failed to read archived OAuth token: {:?}", e);
            Snapshot::Json(no_token_hint())
        }
    }
}

fn no_token_hint() -> Value {
    json!({ "message": NO_TOKEN_MESSAGE })
}

fn s2s_provider(config: &Config) -> Result<Provider, Error> {
    let client_id = config
        .zoom_s2s_client_id()
        .ok_or_else(|| Error::config("ZOOM_S2S_CLIENT_ID"))?;
    let client_secret = config
        .zoom_s2s_client_secret()
        .ok_or_else(|| Error::config("ZOOM_S2S_CLIENT_SECRET"))?;

    provider(config, client_id, client_secret)
}

fn user_provider(config: &Config) -> Result<Provider, Error> {
    let client_id = config
        .zoom_oauth_userlevel_client_id()
        .ok_or_else(|| Error::config("ZOOM_OAUTH_USERLEVEL_CLIENT_ID"))?;
    let client_secret = config
        .zoom_oauth_userlevel_client_secret()
        .ok_or_else(|| Error::config("ZOOM_OAUTH_USERLEVEL_CLIENT_SECRET"))?;

    provider(config, client_id, client_secret)
}

fn provider(config: &Config, client_id: String, client_secret: String) -> Result<Provider, Error> {
    let http_client = ClientBuilder::new().build()?;
    let credentials = ClientCredentials::new(client_id, SecretString::new(client_secret));

    Ok(Provider::new(
        credentials,
        config.zoom_oauth_base_url(),
        http_client,
    ))
}
