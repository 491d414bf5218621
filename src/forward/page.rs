//! Page traffic forwarding.
//!
//! Requests that are not API calls and got past the session gate go to the
//! page renderer unchanged. Without a configured renderer they are 404s.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::http::response::{error_envelope, ApiError};
use crate::observability::metrics;

/// Hop-by-hop headers are never forwarded in either direction.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn copy_end_to_end(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if !is_hop_by_hop(name) && name != header::HOST {
            to.append(name.clone(), value.clone());
        }
    }
}

/// Forwarder for the page renderer.
#[derive(Debug, Clone)]
pub struct PageProxy {
    client: reqwest::Client,
    upstream: Option<Arc<Url>>,
    max_body_size: usize,
    timeout: Duration,
}

impl PageProxy {
    pub fn new(client: reqwest::Client, upstream: Option<Url>, max_body_size: usize, timeout: Duration) -> Self {
        Self {
            client,
            upstream: upstream.map(Arc::new),
            max_body_size,
            timeout,
        }
    }

    pub async fn forward(&self, request: Request<Body>) -> Response {
        let path = request.uri().path().to_string();
        if path == "/api" || path.starts_with("/api/") {
            return ApiError::NotFound.into_response();
        }
        let Some(upstream) = &self.upstream else {
            return ApiError::NotFound.into_response();
        };

        let start = Instant::now();
        let method = request.method().clone();
        let mut url = (**upstream).clone();
        url.set_path(&path);
        url.set_query(request.uri().query());

        let (parts, body) = request.into_parts();
        let body = match to_bytes(body, self.max_body_size).await {
            Ok(bytes) => bytes,
            Err(_) => {
                return error_envelope(StatusCode::PAYLOAD_TOO_LARGE, json!("Request body too large"))
            }
        };

        let mut headers = HeaderMap::new();
        copy_end_to_end(&parts.headers, &mut headers);

        let result = self
            .client
            .request(method.clone(), url)
            .timeout(self.timeout)
            .headers(headers)
            .body(body)
            .send()
            .await;

        let upstream_response = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Page upstream error");
                metrics::record_upstream_failure("page", "request");
                return error_envelope(StatusCode::BAD_GATEWAY, json!("Upstream request failed"));
            }
        };

        let status = upstream_response.status();
        let upstream_headers = upstream_response.headers().clone();
        let body = match upstream_response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Failed to read page upstream body");
                return error_envelope(StatusCode::BAD_GATEWAY, json!("Upstream request failed"));
            }
        };
        metrics::record_request(method.as_str(), status.as_u16(), "page", start);

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        copy_end_to_end(&upstream_headers, response.headers_mut());
        response
    }
}

/// Router fallback: page traffic and unknown API paths.
pub async fn page_handler(State(proxy): State<PageProxy>, request: Request<Body>) -> Response {
    proxy.forward(request).await
}
