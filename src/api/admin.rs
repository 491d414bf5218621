//! Admin dashboard handlers. Authorization is the backend's call.

use axum::{
    extract::State,
    response::Response,
    routing::{get, put},
    Router,
};

use crate::api::AppState;
use crate::http::request::Inbound;
use crate::http::response::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/users", get(users))
        .route("/api/admin/users/role", put(set_role))
}

async fn stats(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/admin/stats").await
}

async fn users(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/admin/users").await
}

async fn set_role(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    inbound.require_body(&["userId", "role"])?;
    Ok(state.pass(&inbound, "/admin/users/role").await)
}
