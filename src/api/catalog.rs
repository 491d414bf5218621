//! Course, resource and company handlers.

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::forward::Outbound;
use crate::http::request::Inbound;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/courses", get(courses).post(courses))
        .route("/api/resources", get(resources).post(resources))
        .route("/api/companies/{id}", get(company))
}

async fn courses(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/courses").await
}

async fn resources(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/resources").await
}

async fn company(State(state): State<AppState>, Path(id): Path<String>, inbound: Inbound) -> Response {
    let outbound = Outbound::from_inbound(&inbound, format!("/companies/{}", id)).with_target("/companies/{id}");
    state.forwarder.forward(outbound).await
}
