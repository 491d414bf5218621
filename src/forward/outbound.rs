//! Description of one backend call.

use axum::http::{HeaderValue, Method};

use crate::http::request::{Inbound, Payload};

/// What the browser gets when the backend never answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// 500 `{ "error": "Internal server error" }`.
    Internal,
    /// 503 with an empty `collection` list; the call also gets the short deadline.
    Unavailable { collection: &'static str },
    /// 200 `null`.
    Null,
}

/// How a successful backend body is relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Body and content type exactly as the backend sent them.
    #[default]
    Passthrough,
    /// Binary PDF, served as `application/pdf`.
    Pdf,
}

/// A backend request derived from a browser request.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub method: Method,
    /// Logical path below the backend base, e.g. `/exam/42/start`.
    pub path: String,
    /// Path template used as the metrics label, e.g. `/exam/{id}/start`.
    pub target: String,
    pub query: Option<String>,
    pub payload: Payload,
    pub cookie: Option<HeaderValue>,
    pub request_id: Option<HeaderValue>,
    pub fallback: Fallback,
    pub body_kind: BodyKind,
}

impl Outbound {
    /// A bare call with no body, cookie or query.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method,
            target: path.clone(),
            path,
            query: None,
            payload: Payload::Empty,
            cookie: None,
            request_id: None,
            fallback: Fallback::Internal,
            body_kind: BodyKind::Passthrough,
        }
    }

    /// Same method, query, body and cookie as the browser request.
    pub fn from_inbound(inbound: &Inbound, path: impl Into<String>) -> Self {
        Self {
            query: inbound.query.clone(),
            payload: inbound.payload.clone(),
            cookie: inbound.cookie.clone(),
            request_id: inbound.request_id.clone(),
            ..Self::new(inbound.method.clone(), path)
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_cookie(mut self, cookie: Option<HeaderValue>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn pdf(mut self) -> Self {
        self.body_kind = BodyKind::Pdf;
        self
    }
}
