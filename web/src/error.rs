use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    Web(WebErrorKind),
}

/// Errors raised by the web layer itself, before any domain code runs.
#[derive(Debug, PartialEq)]
pub enum WebErrorKind {
    /// A required request input is missing or malformed.
    Input(String),
    /// The caller did not present the API bearer token.
    Auth,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

fn error_body(status: StatusCode, error: Value) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Web(WebErrorKind::Input(message)) => {
                error_body(StatusCode::BAD_REQUEST, Value::String(message))
            }
            Error::Web(WebErrorKind::Auth) => {
                error_body(StatusCode::UNAUTHORIZED, json!("Unauthorized"))
            }
            Error::Domain(domain_error) => {
                let message = domain_error.message();
                match domain_error.error_kind {
                    DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                        InternalErrorKind::Invalid(_) => {
                            error_body(StatusCode::BAD_REQUEST, Value::String(message))
                        }
                        InternalErrorKind::Unauthenticated => {
                            error_body(StatusCode::UNAUTHORIZED, Value::String(message))
                        }
                        InternalErrorKind::Config(name) => {
                            error!("Request failed, {name} is not configured");
                            error_body(StatusCode::INTERNAL_SERVER_ERROR, Value::String(message))
                        }
                        InternalErrorKind::Other(_) => {
                            error!("Internal error: {message}");
                            error_body(StatusCode::INTERNAL_SERVER_ERROR, Value::String(message))
                        }
                    },
                    DomainErrorKind::External(external_error_kind) => match external_error_kind {
                        // Zoom's own error body is the most useful thing to hand back.
                        ExternalErrorKind::Upstream(response) => {
                            warn!("Zoom rejected request with {}: {}", response.status, response.body);
                            error_body(StatusCode::INTERNAL_SERVER_ERROR, response.body)
                        }
                        ExternalErrorKind::Network | ExternalErrorKind::Other(_) => {
                            warn!("Call to Zoom failed: {message}");
                            error_body(StatusCode::INTERNAL_SERVER_ERROR, Value::String(message))
                        }
                    },
                }
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self::Domain(err.into())
    }
}
