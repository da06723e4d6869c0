//! Zoom OAuth provider implementation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use tracing::{debug, info, warn};

use crate::error::{oauth_error, upstream_error, Error, OAuthErrorKind};
use crate::oauth::token::TokenResponse;
use crate::oauth::{ClientCredentials, GrantType};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Zoom OAuth provider.
///
/// Every exchange is a single POST to `{base_url}/oauth/token`, authenticated
/// with HTTP Basic credentials of the OAuth app. Nothing is retried.
pub struct Provider {
    credentials: ClientCredentials,
    token_url: String,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new Zoom OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Client ID and secret of the OAuth app
    /// * `base_url` - Zoom OAuth base URL, e.g. `https://zoom.us`
    /// * `http_client` - Client used for the token requests
    pub fn new(credentials: ClientCredentials, base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            token_url: format!("{}/oauth/token", base_url.trim_end_matches('/')),
            http_client,
        }
    }

    /// Request an account-level token for a Server-to-Server OAuth app.
    ///
    /// Zoom expects the grant parameters in the query string with an empty body.
    pub async fn account_credentials(&self, account_id: &str) -> Result<TokenResponse, Error> {
        let request = self
            .http_client
            .post(&self.token_url)
            .query(&[
                ("grant_type", GrantType::AccountCredentials.as_str()),
                ("account_id", account_id),
            ])
            .header(CONTENT_TYPE, FORM_URLENCODED);

        self.request_token(request, GrantType::AccountCredentials)
            .await
    }

    /// Exchange an authorization code for access and refresh tokens.
    ///
    /// Form-encoded bodies set their own `Content-Type`.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the OAuth redirect
    /// * `redirect_uri` - Must match the redirect URI registered with the app
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenResponse, Error> {
        let request = self.http_client.post(&self.token_url).form(&[
            ("code", code),
            ("grant_type", GrantType::AuthorizationCode.as_str()),
            ("redirect_uri", redirect_uri),
        ]);

        self.request_token(request, GrantType::AuthorizationCode)
            .await
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Zoom rotates refresh tokens: the refresh token in the response replaces
    /// the one that was sent.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        let request = self.http_client.post(&self.token_url).form(&[
            ("refresh_token", refresh_token),
            ("grant_type", GrantType::RefreshToken.as_str()),
        ]);

        self.request_token(request, GrantType::RefreshToken).await
    }

    async fn request_token(
        &self,
        request: RequestBuilder,
        grant: GrantType,
    ) -> Result<TokenResponse, Error> {
        debug!(
            "Requesting Zoom token with grant_type={} for client {}",
            grant.as_str(),
            self.credentials.client_id()
        );

        let response = request
            .header(AUTHORIZATION, self.credentials.basic_authorization())
            .send()
            .await
            .map_err(|e| {
                warn!("Zoom token request ({}) failed: {:?}", grant.as_str(), e);
                Error::from(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(
                "Zoom token endpoint rejected {} with status {}: {}",
                grant.as_str(),
                status,
                text
            );
            return Err(upstream_error(status.as_u16(), text));
        }

        let tokens: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse Zoom token response: {:?}", e);
            let mut err = oauth_error(
                OAuthErrorKind::InvalidResponse,
                "Invalid response from Zoom OAuth",
            );
            err.source = Some(Box::new(e));
            err
        })?;

        info!(
            "Obtained Zoom {} token (expires_in={}s)",
            grant.as_str(),
            tokens.extra.get("expires_in").unwrap_or(&serde_json::Value::Null)
        );
        Ok(tokens)
    }
}
