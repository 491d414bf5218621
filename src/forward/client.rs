//! Backend client and response relay.
//!
//! # Responsibilities
//! - Turn an `Outbound` into one reqwest call against the backend base
//! - Relay the backend's status and body to the browser
//! - Reshape backend errors and network failures into JSON envelopes
//!
//! # Design Decisions
//! - One pooled client for the whole process; no retries
//! - Redirects are relayed, never followed
//! - Every call has a deadline below the outer request timeout: the short
//!   one for `Unavailable` endpoints, `backend_secs` for the rest

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    http::{
        header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, LOCATION},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::TimeoutConfig;
use crate::forward::outbound::{BodyKind, Fallback, Outbound};
use crate::http::request::{Payload, X_REQUEST_ID};
use crate::http::response::{backend_error_message, error_envelope, ApiError};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A backend call that produced no response.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ForwardError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Timeout(_) => "timeout",
            ForwardError::Request(e) if e.is_timeout() => "timeout",
            ForwardError::Request(e) if e.is_connect() => "connect",
            ForwardError::Request(e) if e.is_body() || e.is_decode() => "body",
            ForwardError::Request(_) => "request",
        }
    }
}

/// A fully read backend response.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"))
    }

    /// The body parsed as JSON, if it is JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Shared HTTP client bound to one base address.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base: Arc<Url>,
    unavailable_timeout: Duration,
    backend_timeout: Duration,
}

/// reqwest client shared by the API and page forwarders.
pub fn build_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

impl Forwarder {
    pub fn new(base_url: &str, timeouts: &TimeoutConfig) -> Result<Self, BuildError> {
        Ok(Self::with_client(build_client(timeouts)?, Url::parse(base_url)?, timeouts))
    }

    pub fn with_client(client: reqwest::Client, base: Url, timeouts: &TimeoutConfig) -> Self {
        Self {
            client,
            base: Arc::new(base),
            unavailable_timeout: Duration::from_secs(timeouts.unavailable_secs),
            backend_timeout: Duration::from_secs(timeouts.backend_secs),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a logical backend path.
    ///
    /// Each segment is percent-encoded; `.` and `..` segments are dropped so
    /// user-supplied ids cannot climb out of the resource path.
    pub fn url_for(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = (*self.base).clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.set_query(query.filter(|q| !q.is_empty()));
        url
    }

    /// Send the call and read the full response.
    pub async fn fetch(&self, outbound: &Outbound) -> Result<BackendResponse, ForwardError> {
        let deadline = self.deadline(outbound.fallback);
        tokio::time::timeout(deadline, self.send(outbound))
            .await
            .map_err(|_| ForwardError::Timeout(deadline))?
    }

    /// Time a call may take before its fallback answers instead.
    pub fn deadline(&self, fallback: Fallback) -> Duration {
        match fallback {
            Fallback::Unavailable { .. } => self.unavailable_timeout,
            Fallback::Internal | Fallback::Null => self.backend_timeout,
        }
    }

    async fn send(&self, outbound: &Outbound) -> Result<BackendResponse, ForwardError> {
        let url = self.url_for(&outbound.path, outbound.query.as_deref());
        let mut request = self
            .client
            .request(outbound.method.clone(), url)
            .header(ACCEPT, "application/json");

        match &outbound.payload {
            Payload::Empty => {}
            Payload::Json(bytes) => {
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .body(bytes.clone());
            }
            Payload::Multipart { content_type, bytes } => {
                request = request
                    .header(CONTENT_TYPE, content_type.clone())
                    .body(bytes.clone());
            }
        }
        if let Some(cookie) = &outbound.cookie {
            request = request.header(COOKIE, cookie.clone());
        }
        if let Some(request_id) = &outbound.request_id {
            request = request.header(X_REQUEST_ID, request_id.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(BackendResponse {
            status,
            headers,
            body,
        })
    }

    /// Forward the call and turn the outcome into a browser response.
    pub async fn forward(&self, outbound: Outbound) -> Response {
        self.forward_with(outbound, relay).await
    }

    /// Like [`Forwarder::forward`] with a custom relay for the backend response.
    pub async fn forward_with<F>(&self, outbound: Outbound, on_response: F) -> Response
    where
        F: FnOnce(BackendResponse, BodyKind) -> Response,
    {
        let start = Instant::now();
        let method = outbound.method.to_string();

        tracing::debug!(
            method = %method,
            backend_path = %outbound.path,
            "Forwarding to backend"
        );

        match self.fetch(&outbound).await {
            Ok(response) => {
                metrics::record_request(&method, response.status.as_u16(), &outbound.target, start);
                if response.status.is_client_error() || response.status.is_server_error() {
                    tracing::info!(
                        method = %method,
                        backend_path = %outbound.path,
                        status = response.status.as_u16(),
                        "Backend returned an error"
                    );
                }
                on_response(response, outbound.body_kind)
            }
            Err(e) => {
                tracing::error!(
                    method = %method,
                    backend_path = %outbound.path,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Backend unreachable"
                );
                metrics::record_upstream_failure(&outbound.target, e.kind());
                fallback_response(outbound.fallback)
            }
        }
    }
}

/// Browser response for a backend that produced no response.
pub fn fallback_response(fallback: Fallback) -> Response {
    match fallback {
        Fallback::Internal => ApiError::Internal.into_response(),
        Fallback::Unavailable { collection } => ApiError::Unavailable { collection }.into_response(),
        Fallback::Null => (StatusCode::OK, Json(Value::Null)).into_response(),
    }
}

/// Default relay: success and redirect responses pass through, errors
/// become envelopes.
pub fn relay(response: BackendResponse, kind: BodyKind) -> Response {
    if !response.status.is_success() && !response.status.is_redirection() {
        return error_envelope(response.status, backend_error_message(&response.body));
    }

    let mut builder = Response::builder().status(response.status);
    let content_type = match kind {
        BodyKind::Pdf => Some(HeaderValue::from_static("application/pdf")),
        BodyKind::Passthrough => response.headers.get(CONTENT_TYPE).cloned(),
    };
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    for name in [CONTENT_DISPOSITION, LOCATION] {
        if let Some(value) = response.headers.get(&name) {
            builder = builder.header(name, value.clone());
        }
    }

    builder.body(Body::from(response.body)).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build relayed response");
        ApiError::Internal.into_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::Method;
    use serde_json::json;

    fn forwarder(base: &str) -> Forwarder {
        Forwarder::new(base, &TimeoutConfig::default()).unwrap()
    }

    fn backend(status: u16, content_type: &str, body: &'static [u8]) -> BackendResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        BackendResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_url_for() {
        let f = forwarder("http://localhost:4000");
        assert_eq!(f.url_for("/exam/42/start", None).as_str(), "http://localhost:4000/exam/42/start");
        assert_eq!(
            f.url_for("/jobs", Some("search=rust&page=2")).as_str(),
            "http://localhost:4000/jobs?search=rust&page=2"
        );
        assert_eq!(f.url_for("/jobs", Some("")).as_str(), "http://localhost:4000/jobs");
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let f = forwarder("https://api.example.com/v1/");
        assert_eq!(f.url_for("/courses", None).as_str(), "https://api.example.com/v1/courses");
    }

    #[test]
    fn test_url_for_encodes_untrusted_segments() {
        let f = forwarder("http://localhost:4000");
        assert_eq!(f.url_for("/exam/../admin/stats", None).as_str(), "http://localhost:4000/exam/admin/stats");
        assert_eq!(f.url_for("/companies/a b?c", None).as_str(), "http://localhost:4000/companies/a%20b%3Fc");
    }

    #[tokio::test]
    async fn test_relay_success_passthrough() {
        let response = relay(backend(201, "application/json", br#"{"id":7}"#), BodyKind::Passthrough);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), br#"{"id":7}"#);
    }

    #[tokio::test]
    async fn test_relay_error_keeps_status() {
        let response = relay(
            backend(409, "application/json", br#"{"message":"Already applied"}"#),
            BodyKind::Passthrough,
        );
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Already applied" }));
    }

    #[tokio::test]
    async fn test_relay_redirect_keeps_location() {
        let mut response = backend(302, "text/plain", b"Found");
        response
            .headers
            .insert(LOCATION, HeaderValue::from_static("https://pay.example.com/checkout/abc"));
        let response = relay(response, BodyKind::Passthrough);
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "https://pay.example.com/checkout/abc");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), b"Found");
    }

    #[test]
    fn test_deadline_by_fallback() {
        let timeouts = TimeoutConfig {
            unavailable_secs: 2,
            backend_secs: 7,
            ..TimeoutConfig::default()
        };
        let f = Forwarder::new("http://localhost:4000", &timeouts).unwrap();
        assert_eq!(f.deadline(Fallback::Unavailable { collection: "goals" }), Duration::from_secs(2));
        assert_eq!(f.deadline(Fallback::Internal), Duration::from_secs(7));
        assert_eq!(f.deadline(Fallback::Null), Duration::from_secs(7));
    }

    #[test]
    fn test_relay_pdf_forces_content_type() {
        let response = relay(backend(200, "application/octet-stream", b"%PDF-1.7"), BodyKind::Pdf);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    }

    #[tokio::test]
    async fn test_fallbacks() {
        let response = fallback_response(Fallback::Null);
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), b"null");

        assert_eq!(fallback_response(Fallback::Internal).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            fallback_response(Fallback::Unavailable { collection: "skills" }).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_uses_fallback() {
        // Port 9 (discard) is closed on test hosts; the connect fails fast.
        let f = forwarder("http://127.0.0.1:9");
        let response = f.forward(Outbound::new(Method::GET, "/notifications")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
