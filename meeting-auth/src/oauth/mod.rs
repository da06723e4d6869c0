//! OAuth 2.0 authentication infrastructure.
//!
//! Provides the token endpoint exchanges used by Zoom's Server-to-Server and
//! user-level OAuth apps. Tokens are handed back to the caller untouched; no
//! expiry tracking or automatic refresh happens here.

mod credentials;
mod provider;

pub mod providers;
pub mod token;

pub use credentials::ClientCredentials;
pub use provider::GrantType;
