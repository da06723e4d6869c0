use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters shared by the OAuth redirect and refresh endpoints.
///
/// # Fields
///
/// * `code` - An authorization code on the redirect endpoint, a refresh token on the refresh endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CodeParams {
    pub(crate) code: Option<String>,
}
