//! Session Gate Middleware.
//! Redirects anonymous visitors away from protected pages.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::observability::metrics;
use crate::session::{GateDecision, SessionGate};

pub async fn session_gate_middleware(
    State(gate): State<Arc<SessionGate>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    let decision = match gate.evaluate(path, req.headers()) {
        Ok(decision) => decision,
        Err(e) => {
            // Fail open: the backend still verifies the token on API calls.
            tracing::error!(path = %path, error = %e, "Session gate failed, passing request through");
            metrics::record_session_decision("error");
            return next.run(req).await;
        }
    };

    metrics::record_session_decision(decision.label());

    match decision {
        GateDecision::Pass => next.run(req).await,
        GateDecision::DemoPass => {
            tracing::debug!(path = %path, "Demo page served without session");
            next.run(req).await
        }
        GateDecision::Redirect { location } => {
            tracing::debug!(path = %path, location = %location, "No session, redirecting to login");
            Redirect::temporary(&location).into_response()
        }
    }
}
