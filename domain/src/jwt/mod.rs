//! This module provides functionality for handling JSON Web Tokens (JWTs) within the domain layer.
//!
//! The primary use case is signing Zoom Meeting SDK signatures: short lived HS256
//! tokens a browser or mobile client embeds to join a meeting through the SDK.
//! The token is signed with the SDK secret, which never leaves the server; only
//! the SDK key is handed out.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::jwt::{generate_meeting_sdk_signature, MeetingNumber};
//! use service::config::Config;
//!
//! fn example(config: &Config) {
//!     let meeting_number = MeetingNumber::Text("85746065432".to_string());
//!     match generate_meeting_sdk_signature(config, meeting_number, 0) {
//!         Ok(signature) => println!("Generated signature: {:?}", signature),
//!         Err(e) => eprintln!("Error generating signature: {:?}", e),
//!     }
//! }
//! ```

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use jsonwebtoken::{encode, EncodingKey, Header};
use log::*;
use serde::Serialize;
use service::config::Config;

pub use claims::{MeetingNumber, MeetingSdkClaims};

pub(crate) mod claims;

/// Seconds `iat` is backdated to tolerate clock skew between server and client.
pub const CLOCK_SKEW_SECS: i64 = 30;

/// Lifetime of a signature in seconds, counted from `iat`.
pub const SIGNATURE_TTL_SECS: i64 = 60 * 60 * 2;

/// Attendee role. Role `1` is host.
pub const DEFAULT_ROLE: u8 = 0;

/// Signed Meeting SDK signature handed to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSdkSignature {
    pub signature: String,
    pub sdk_key: String,
}

/// Usage hint for clients that have not posted a meeting yet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSdkUsage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_key: Option<String>,
}

/// Explains how to request a signature and exposes the public SDK key.
pub fn meeting_sdk_usage(config: &Config) -> MeetingSdkUsage {
    MeetingSdkUsage {
        message: "POST to this endpoint with { meetingNumber, role } to get a signature"
            .to_string(),
        sdk_key: config.zoom_sdk_key(),
    }
}

/// Generates a Meeting SDK signature for `meeting_number` and `role`.
///
/// Blank meeting numbers are rejected instead of being signed.
pub fn generate_meeting_sdk_signature(
    config: &Config,
    meeting_number: MeetingNumber,
    role: u8,
) -> Result<MeetingSdkSignature, Error> {
    if meeting_number.is_blank() {
        return Err(Error {
            source: Some("meetingNumber must not be empty".into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Invalid(
                "meetingNumber".to_string(),
            )),
        });
    }

    let sdk_key = config.zoom_sdk_key().ok_or_else(|| {
        warn!("Failed to get Meeting SDK key from config");
        Error::config("ZOOM_SDK_KEY")
    })?;
    let sdk_secret = config.zoom_sdk_secret().ok_or_else(|| {
        warn!("Failed to get Meeting SDK secret from config");
        Error::config("ZOOM_SDK_SECRET")
    })?;

    let claims = meeting_sdk_claims(
        &sdk_key,
        meeting_number,
        role,
        chrono::Utc::now().timestamp(),
    );
    debug!(
        "Signing Meeting SDK signature for meeting {:?} with role {} (exp {})",
        claims.mn, claims.role, claims.exp
    );

    // Header::default() is HS256 with typ JWT
    let signature = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(sdk_secret.as_bytes()),
    )?;

    Ok(MeetingSdkSignature { signature, sdk_key })
}

/// Builds the claims for a signature issued at `now` (seconds since the epoch).
pub fn meeting_sdk_claims(
    sdk_key: &str,
    meeting_number: MeetingNumber,
    role: u8,
    now: i64,
) -> MeetingSdkClaims {
    let iat = now - CLOCK_SKEW_SECS;
    let exp = iat + SIGNATURE_TTL_SECS;

    MeetingSdkClaims {
        sdk_key: sdk_key.to_string(),
        app_key: sdk_key.to_string(),
        mn: meeting_number,
        role,
        iat,
        exp,
        token_exp: exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["zoom_bridge_rs"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    fn sdk_config() -> Config {
        config(&["--zoom-sdk-key", "sdk_key", "--zoom-sdk-secret", "sdk_secret"])
    }

    fn decode_claims(token: &str) -> MeetingSdkClaims {
        let validation = Validation::new(Algorithm::HS256);
        decode::<MeetingSdkClaims>(
            token,
            &DecodingKey::from_secret("sdk_secret".as_bytes()),
            &validation,
        )
        .unwrap()
        .claims
    }

    #[test]
    fn test_claims_window() {
        let claims = meeting_sdk_claims("key", MeetingNumber::Number(1), 0, 1_700_000_000);

        assert_eq!(claims.iat, 1_700_000_000 - 30);
        assert_eq!(claims.exp - claims.iat, 7200);
        assert_eq!(claims.token_exp, claims.exp);
        assert_eq!(claims.app_key, claims.sdk_key);
    }

    #[test]
    fn test_signature_decodes_with_sdk_secret() {
        let signature = generate_meeting_sdk_signature(
            &sdk_config(),
            MeetingNumber::Text("123".to_string()),
            1,
        )
        .unwrap();

        assert_eq!(signature.sdk_key, "sdk_key");

        let claims = decode_claims(&signature.signature);
        assert_eq!(claims.mn, MeetingNumber::Text("123".to_string()));
        assert_eq!(claims.role, 1);
        assert_eq!(claims.exp - claims.iat, 7200);
        assert_eq!(claims.sdk_key, "sdk_key");

        let now = chrono::Utc::now().timestamp();
        assert!(claims.iat <= now - CLOCK_SKEW_SECS);
        assert!(claims.iat >= now - CLOCK_SKEW_SECS - 5);
    }

    #[test]
    fn test_blank_meeting_number_is_rejected() {
        let err = generate_meeting_sdk_signature(
            &sdk_config(),
            MeetingNumber::Text(String::new()),
            0,
        )
        .unwrap_err();

        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Invalid(_))
        ));
    }

    #[test]
    fn test_usage_never_exposes_secret() {
        let usage = serde_json::to_value(meeting_sdk_usage(&sdk_config())).unwrap();

        assert_eq!(usage["sdkKey"], "sdk_key");
        assert!(!usage.to_string().contains("sdk_secret"));
    }
}
