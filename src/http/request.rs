//! Request capture for forwarding.
//!
//! # Responsibilities
//! - Attach a unique request ID (UUID v4) as early as possible
//! - Capture the pieces of a browser request that a backend call needs:
//!   method, raw query, cookie, request id and body
//! - Validate JSON bodies before anything is sent upstream
//!
//! # Design Decisions
//! - JSON bodies are kept as the original bytes and forwarded unchanged;
//!   the parsed value is only used to read discriminators and required fields
//! - Multipart bodies are opaque and keep their original content type

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::FromRequest,
    http::{
        header::{CONTENT_TYPE, COOKIE},
        HeaderName, HeaderValue, Method, Request,
    },
};
use serde_json::Value;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use url::form_urlencoded;

use crate::http::response::ApiError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that assigns `x-request-id` to requests lacking one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer that copies `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Body of a browser request, as it will be sent upstream.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// Validated JSON, original bytes.
    Json(Bytes),
    /// Multipart form data, forwarded byte-for-byte.
    Multipart { content_type: HeaderValue, bytes: Bytes },
}

/// A browser request reduced to what forwarding needs.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub method: Method,
    pub query: Option<String>,
    pub cookie: Option<HeaderValue>,
    pub request_id: Option<HeaderValue>,
    pub payload: Payload,
    /// Parsed form of a JSON payload.
    pub json: Option<Value>,
}

impl Inbound {
    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// A string or number field of the JSON body.
    pub fn body_field(&self, name: &str) -> Option<String> {
        match self.json.as_ref()?.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Query parameter first, then body field. Empty values count as absent.
    pub fn param(&self, name: &str) -> Option<String> {
        self.query_param(name)
            .or_else(|| self.body_field(name))
            .filter(|v| !v.trim().is_empty())
    }

    /// Like [`Inbound::param`], but missing values are a validation error.
    pub fn require(&self, name: &str) -> Result<String, ApiError> {
        self.param(name)
            .ok_or_else(|| ApiError::validation(format!("{} is required", name)))
    }

    /// Require each named field of the JSON body.
    pub fn require_body(&self, names: &[&str]) -> Result<(), ApiError> {
        for name in names {
            let present = match self.json.as_ref().and_then(|v| v.get(*name)) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(ApiError::validation(format!("{} is required", name)));
            }
        }
        Ok(())
    }

    /// The `action` discriminator: query string, then JSON body.
    pub fn action(&self) -> Option<String> {
        self.param("action")
    }

    /// The query string without the named parameters.
    ///
    /// Kept pairs are copied byte for byte; only keys are decoded to compare.
    pub fn query_without(&self, names: &[&str]) -> Option<String> {
        let query = self.query.as_deref()?;
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| {
                form_urlencoded::parse(pair.as_bytes())
                    .next()
                    .is_none_or(|(key, _)| !names.contains(&key.as_ref()))
            })
            .collect();
        if kept.is_empty() {
            return None;
        }
        Some(kept.join("&"))
    }
}

impl<S: Send + Sync> FromRequest<S> for Inbound {
    type Rejection = ApiError;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        // RequestBodyLimitLayer bounds the size upstream of this point.
        let bytes = to_bytes(body, usize::MAX).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            ApiError::validation("Unable to read request body")
        })?;

        let content_type = parts.headers.get(CONTENT_TYPE).cloned();
        let is_multipart = content_type
            .as_ref()
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/"));

        let (payload, json) = match content_type {
            Some(content_type) if is_multipart => (Payload::Multipart { content_type, bytes }, None),
            _ if bytes.iter().all(u8::is_ascii_whitespace) => (Payload::Empty, None),
            _ => {
                let value: Value = serde_json::from_slice(&bytes)
                    .map_err(|_| ApiError::validation("Invalid JSON body"))?;
                (Payload::Json(bytes), Some(value))
            }
        };

        let cookie = parts.headers.get(COOKIE).cloned();
        let request_id = parts.headers.get(X_REQUEST_ID).cloned();

        Ok(Inbound {
            method: parts.method,
            query: parts.uri.query().map(str::to_string),
            cookie,
            request_id,
            payload,
            json,
        })
    }
}
