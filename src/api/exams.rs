//! Exam handlers.

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
        .route("/api/exam", get(exams).post(exams))
        .route("/api/exam/categories", get(categories))
        .route("/api/exam/generate-questions", post(generate_questions))
        .route("/api/exam/{id}", get(exam).put(exam))
        .route("/api/exam/{id}/start", post(start_exam))
}

/// List (with filters) or create.
async fn exams(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/exam").await
}

async fn categories(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/exam/categories").await
}

async fn generate_questions(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/exam/generate-questions").await
}

/// Fetch or update one exam.
async fn exam(State(state): State<AppState>, Path(id): Path<String>, inbound: Inbound) -> Response {
    let outbound = Outbound::from_inbound(&inbound, format!("/exam/{}", id)).with_target("/exam/{id}");
    state.forwarder.forward(outbound).await
}

async fn start_exam(State(state): State<AppState>, Path(id): Path<String>, inbound: Inbound) -> Response {
    let outbound =
        Outbound::from_inbound(&inbound, format!("/exam/{}/start", id)).with_target("/exam/{id}/start");
    state.forwarder.forward(outbound).await
}
