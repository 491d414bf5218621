//! Forums, chat search, mentorship and notifications.

use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::forward::Outbound;
use crate::http::request::Inbound;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/forums", get(forums).post(forums))
        .route("/api/forums/search", get(search_forums))
        .route("/api/chat/search", get(search_chat))
        .route("/api/mentorship/mentors", get(mentors))
        .route("/api/mentorship/request/{id}", post(request_mentor))
        .route("/api/notifications", get(notifications))
        .route("/api/notifications/read-all", post(read_all))
}

async fn forums(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/forums").await
}

async fn search_forums(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/forums/search").await
}

async fn search_chat(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/chat/search").await
}

async fn mentors(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/mentorship/mentors").await
}

async fn request_mentor(State(state): State<AppState>, Path(id): Path<String>, inbound: Inbound) -> Response {
    let outbound = Outbound::from_inbound(&inbound, format!("/mentorship/request/{}", id))
        .with_target("/mentorship/request/{id}");
    state.forwarder.forward(outbound).await
}

async fn notifications(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/notifications").await
}

async fn read_all(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/notifications/read-all").await
}
