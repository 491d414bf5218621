//! Response shaping for the browser.
//!
//! # Responsibilities
//! - Define the gateway's own error taxonomy (`ApiError`)
//! - Render every failure as a JSON envelope `{ "error": ... }`
//! - Convert handler panics into the same envelope
//!
//! # Design Decisions
//! - Backend failures keep the backend's status; only the body is reshaped
//! - Network failures map to fixed statuses (500, or 503 for endpoints
//!   with an explicit deadline)

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Message used when a backend error body carries nothing readable.
pub const GENERIC_ERROR: &str = "Request failed";

/// Errors produced by the gateway itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// An `action` discriminator nobody handles (strict mode only).
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Not found")]
    NotFound,

    /// Backend unreachable or too slow on an endpoint with a fallback collection.
    #[error("Backend service unavailable")]
    Unavailable { collection: &'static str },

    /// Backend unreachable, or an unexpected failure in a handler.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = Map::new();
        body.insert("error".into(), Value::String(self.to_string()));
        if let ApiError::Unavailable { collection } = self {
            body.insert(collection.into(), Value::Array(Vec::new()));
        }
        (status, Json(Value::Object(body))).into_response()
    }
}

/// `{ "error": error }` with an arbitrary status.
pub fn error_envelope(status: StatusCode, error: Value) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

/// Pull a human-readable error out of a backend error body.
///
/// Prefers `message`, then `error` (string or structured), then the whole
/// object; anything unparseable becomes [`GENERIC_ERROR`].
pub fn backend_error_message(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut map)) => {
            for key in ["message", "error"] {
                match map.remove(key) {
                    Some(Value::Null) | None => {}
                    Some(Value::String(s)) if s.is_empty() => {}
                    Some(value) => return value,
                }
            }
            if map.is_empty() {
                Value::String(GENERIC_ERROR.into())
            } else {
                Value::Object(map)
            }
        }
        Ok(Value::String(s)) if !s.is_empty() => Value::String(s),
        _ => Value::String(GENERIC_ERROR.into()),
    }
}

/// Panic handler for `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}
