use domain::jwt::{MeetingNumber, DEFAULT_ROLE};
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of a Meeting SDK signature request.
///
/// # Fields
///
/// * `meeting_number` - The meeting to join, as a JSON string or number
/// * `role` - `0` for attendee (used when absent or `null`), `1` for host
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignatureParams {
    #[schema(value_type = Option<String>, example = "85746065432")]
    pub(crate) meeting_number: Option<MeetingNumber>,
    #[serde(default)]
    pub(crate) role: Option<u8>,
}

impl SignatureParams {
    pub(crate) fn role(&self) -> u8 {
        self.role.unwrap_or(DEFAULT_ROLE)
    }
}
