use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CallApiParams {
    /// User or account access token to call the Zoom API with
    pub(crate) accesstoken: Option<String>,
}
