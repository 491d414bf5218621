//! Profile and account settings handlers.

use axum::{
    extract::State,
    response::Response,
    routing::{get, post, put},
    Router,
};

use crate::api::AppState;
use crate::http::request::{Inbound, Payload};
use crate::http::response::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(profile).put(profile))
        .route("/api/profile/avatar", post(avatar))
        .route("/api/profile/public", get(public_profile))
        .route("/api/settings/password", put(change_password))
}

async fn profile(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/profile").await
}

/// Avatar upload; the multipart body goes through untouched.
async fn avatar(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    if !matches!(inbound.payload, Payload::Multipart { .. }) {
        return Err(ApiError::validation("Avatar upload must be multipart/form-data"));
    }
    Ok(state.pass(&inbound, "/profile/avatar").await)
}

async fn public_profile(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/profile/public").await
}

async fn change_password(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    inbound.require_body(&["currentPassword", "newPassword"])?;
    Ok(state.pass(&inbound, "/settings/password").await)
}
