//! Business logic of the Zoom bridge.
//!
//! Each module maps to one family of endpoints and takes its configuration and
//! snapshot store explicitly. Nothing here knows about HTTP routing; `web`
//! turns the results and [`error::Error`] into responses.

pub mod api_call;
pub mod error;
pub mod jwt;
pub mod oauth_token;
pub mod webhook;

pub mod gateway;

pub use service::snapshot::Snapshot;
