//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use edu_gateway::config::GatewayConfig;
use edu_gateway::{HttpServer, Shutdown};

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\nfake certificate";

/// Answers long after every gateway deadline.
async fn hang() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!([]))
}

fn cookie_of(headers: &HeaderMap) -> Value {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, |v| Value::String(v.to_string()))
}

/// A stand-in for the API backend.
fn backend_router() -> Router {
    Router::new()
        .route(
            "/exam/{id}",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "message": "Exam not found" }))) }),
        )
        .route(
            "/courses",
            get(|headers: HeaderMap| async move {
                Json(json!({ "data": [{ "title": "Rust 101" }], "cookie": cookie_of(&headers) }))
            }),
        )
        .route(
            "/jobs",
            get(|| async { Json(json!([{ "title": "Rust developer" }])) }),
        )
        .route(
            "/jobs/post",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({ "received": body, "cookie": cookie_of(&headers) })),
                )
            }),
        )
        .route(
            "/goals",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!([]))
            }),
        )
        .route(
            "/resources",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))) }),
        )
        .route(
            "/forums/search",
            get(|| async { Json(json!({ "forums": [{ "topic": "ownership" }] })) }),
        )
        .route("/notifications", get(hang))
        .route("/subscriptions/me", get(hang))
        .route("/chat/search", get(hang))
        .route(
            "/certificates/pdf",
            get(|| async {
                ([(header::CONTENT_TYPE, "application/octet-stream")], PDF_BYTES).into_response()
            }),
        )
}

/// Start the mock backend on an ephemeral port.
pub async fn start_mock_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, backend_router()).await;
    });
    addr
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn config_for(backend: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.backend.base_url = Some(format!("http://{}", backend));
    config.timeouts.unavailable_secs = 1;
    config.timeouts.backend_secs = 1;
    config
}

/// A running gateway. Dropping it shuts the server down.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    Gateway { addr, shutdown }
}

/// Client that neither follows redirects nor uses a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
