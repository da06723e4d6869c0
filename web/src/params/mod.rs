//! This module holds typed parameters for various endpoint inputs.
//!
//! Query strings and JSON bodies are deserialized into these structs before any
//! domain code runs, so a handler only ever sees well-typed input.

pub(crate) mod api;
pub(crate) mod meeting_sdk;
pub(crate) mod oauth;
