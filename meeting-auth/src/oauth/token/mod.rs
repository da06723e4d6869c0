//! OAuth token types.

mod tokens;

pub use tokens::TokenResponse;
