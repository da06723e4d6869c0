//! # meeting-auth
//!
//! Single source of truth for ALL authentication against the Zoom platform:
//! - OAuth 2.0 token exchanges (account credentials, authorization code, refresh token)
//! - Client credential handling and HTTP Basic authorization headers
//! - HTTP client building
//! - Webhook URL validation challenges and signature validation
//!
//! ## Architecture
//!
//! This crate provides the authentication foundation that `domain` builds upon.
//! It knows nothing about configuration sources or snapshot storage; callers hand
//! it credentials and URLs explicitly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     oauth::{ClientCredentials, providers::zoom},
//!     http::ClientBuilder,
//!     webhook::{encrypt_plain_token, ZoomSignatureValidator},
//! };
//! ```

pub mod error;
pub mod http;
pub mod oauth;
pub mod webhook;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
