//! Error types.
//!
//! Two layers: [`Error`] for infrastructure failures that stop a service
//! (binding, config), and [`RecordError`] for per-request failures that are
//! rendered as HTTP responses.

use std::net::AddrParseError;

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Failures that prevent a service from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
}

/// A request that could not be satisfied against the record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No record carries the requested identifier.
    #[error("no record with id `{0}`")]
    NotFound(String),

    /// The body did not decode, or a required field is empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record with this identifier already exists.
    #[error("a record with id `{0}` already exists")]
    Conflict(String),
}

impl RecordError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Conflict(_) => "conflict",
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::InvalidInput(_) => Status::BadRequest,
            Self::Conflict(_) => Status::Conflict,
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: String,
}

/// Renders as `{"error":{"kind":"not_found","message":"..."}}`.
impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: ErrorBody { kind: self.kind(), message: self.to_string() },
        };
        match serde_json::to_vec(&envelope) {
            Ok(bytes) => Response::builder().status(self.status()).json(bytes),
            Err(e) => {
                error!("failed to encode error payload: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_structured_payload() {
        let res = RecordError::NotFound("9".into()).into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["error"]["kind"], "not_found");
        assert_eq!(body["error"]["message"], "no record with id `9`");
    }

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(RecordError::InvalidInput("x".into()).into_response().status_code(), 400);
        assert_eq!(RecordError::Conflict("1".into()).into_response().status_code(), 409);
    }
}
