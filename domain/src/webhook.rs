//! Zoom webhook receiver.
//!
//! URL validation challenges are answered on the spot. Every other event is
//! archived as the single "last received event" snapshot; a failed write is
//! logged and otherwise ignored so Zoom's delivery is always acknowledged.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use log::*;
use meeting_auth::webhook::{self, WebhookValidator, ZoomSignatureValidator};
use serde_json::{json, Value};
use service::config::Config;
use service::snapshot::{Snapshot, SnapshotKey, SnapshotStore};
use std::collections::HashMap;

pub use meeting_auth::webhook::{UrlValidationResponse, URL_VALIDATION_EVENT};

/// Sentinel returned while nothing has been archived yet.
pub const NO_EVENT_MESSAGE: &str = "No webhook data yet";

/// What the receiver did with a delivery.
#[derive(Debug, PartialEq)]
pub enum WebhookOutcome {
    /// The delivery was a URL validation challenge; send this back.
    Validated(UrlValidationResponse),
    /// The delivery was archived (or the archive write failed and was logged).
    Archived,
}

/// Handle one webhook delivery.
///
/// `headers` must use lowercase names; they are only consulted when signature
/// verification is enabled.
pub async fn receive_event(
    store: &dyn SnapshotStore,
    config: &Config,
    headers: &HashMap<String, String>,
    body: &[u8],
) -> Result<WebhookOutcome, Error> {
    let event: Value = serde_json::from_slice(body).map_err(|e| Error {
        source: Some(Box::new(e)),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Invalid(
            "Webhook body is not valid JSON".to_string(),
        )),
    })?;

    let event_name = event.get("event").and_then(Value::as_str).unwrap_or_default();

    if event_name == URL_VALIDATION_EVENT {
        let secret = webhook_secret(config)?;
        let response = webhook::validate_url(&secret, &event)?;
        info!("Answered Zoom endpoint URL validation challenge");
        return Ok(WebhookOutcome::Validated(response));
    }

    if config.verify_webhook_signatures {
        verify_signature(config, headers, body)?;
    }

    debug!("Archiving Zoom webhook event: {:?}", event_name);
    if let Err(e) = store.write(SnapshotKey::LastWebhookEvent, &event).await {
        warn!("Failed to archive webhook event {:?}: {:?}", event_name, e);
    }

    Ok(WebhookOutcome::Archived)
}

/// The last archived event, or the "no data yet" sentinel.
///
/// Text that is no longer valid JSON is handed back as is.
pub async fn last_event(store: &dyn SnapshotStore) -> Snapshot {
    match store.read(SnapshotKey::LastWebhookEvent).await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => Snapshot::Json(json!({ "message": NO_EVENT_MESSAGE })),
        Err(e) => {
            warn!("Failed to read archived webhook event: {:?}", e);
            Snapshot::Json(json!({ "message": NO_EVENT_MESSAGE }))
        }
    }
}

fn webhook_secret(config: &Config) -> Result<String, Error> {
    config.zoom_webhook_secret_token().ok_or_else(|| {
        warn!("Failed to get Zoom webhook secret token from config");
        Error::config("ZOOM_WEBHOOK_SECRET_TOKEN")
    })
}

fn verify_signature(
    config: &Config,
    headers: &HashMap<String, String>,
    body: &[u8],
) -> Result<(), Error> {
    let validator = ZoomSignatureValidator::new(
        webhook_secret(config)?,
        chrono::Duration::seconds(config.webhook_timestamp_tolerance_secs),
    );

    match validator.validate(headers, body) {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!("Rejected Zoom webhook with invalid signature");
            Err(Error {
                source: Some("Invalid webhook signature".into()),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Unauthenticated),
            })
        }
        Err(e) => {
            warn!("Rejected Zoom webhook: {}", e);
            Err(Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Unauthenticated),
            })
        }
    }
}
