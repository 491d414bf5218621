//! Global search.
//!
//! One browser query fans out to six independent backend queries. They run
//! concurrently, each under the forwarder's per-call deadline, and each one
//! degrades to an empty list on its own; the response is always 200.

use axum::{extract::State, http::Method, routing::get, Json, Router};
use futures_util::future::join_all;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::api::AppState;
use crate::forward::{BackendResponse, Outbound};
use crate::http::request::Inbound;
use crate::http::response::ApiError;
use crate::observability::metrics;

/// A backend query contributing one category of results.
struct Source {
    path: &'static str,
    param: &'static str,
    /// Key the backend may wrap the list in.
    key: &'static str,
}

static SOURCES: [Source; 6] = [
    Source { path: "/jobs", param: "search", key: "jobs" },
    Source { path: "/courses", param: "search", key: "courses" },
    Source { path: "/resources", param: "search", key: "resources" },
    Source { path: "/profile/public", param: "search", key: "users" },
    Source { path: "/forums/search", param: "q", key: "forums" },
    Source { path: "/chat/search", param: "q", key: "messages" },
];

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct SearchResults {
    pub jobs: Vec<Value>,
    pub courses: Vec<Value>,
    pub resources: Vec<Value>,
    pub users: Vec<Value>,
    pub forums: Vec<Value>,
    pub messages: Vec<Value>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search))
}

/// The list inside a backend body: a bare array, or one under a
/// conventional wrapper key.
pub fn extract_list(body: Value, key: &str) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["data", "items", "results", key]
            .into_iter()
            .find_map(|k| match map.remove(k) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn to_list(response: BackendResponse, key: &str) -> Vec<Value> {
    if !response.status.is_success() {
        return Vec::new();
    }
    response.json().map(|body| extract_list(body, key)).unwrap_or_default()
}

async fn search(State(state): State<AppState>, inbound: Inbound) -> Result<Json<SearchResults>, ApiError> {
    let query = inbound.require("q")?;

    let calls = SOURCES.iter().map(|source| {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair(source.param, &query)
            .finish();
        let outbound = Outbound::new(Method::GET, source.path)
            .with_query(Some(encoded))
            .with_cookie(inbound.cookie.clone());
        let forwarder = state.forwarder.clone();
        async move {
            match forwarder.fetch(&outbound).await {
                Ok(response) => to_list(response, source.key),
                Err(e) => {
                    tracing::warn!(
                        backend_path = source.path,
                        error = %e,
                        "Search source failed"
                    );
                    metrics::record_upstream_failure(source.path, e.kind());
                    Vec::new()
                }
            }
        }
    });

    let mut lists = join_all(calls).await.into_iter();
    let mut next = || lists.next().unwrap_or_default();

    Ok(Json(SearchResults {
        jobs: next(),
        courses: next(),
        resources: next(),
        users: next(),
        forums: next(),
        messages: next(),
    }))
}
