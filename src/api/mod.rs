//! Browser-facing API handlers.
//!
//! Every handler mirrors one backend resource under `/api`. Most are a single
//! forward; families that multiplex several backend endpoints resolve an
//! `action` first (see `forward::action`).

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod certificates;
pub mod community;
pub mod exams;
pub mod jobs;
pub mod profile;
pub mod progress;
pub mod search;
pub mod subscriptions;
pub mod wellness;

use std::sync::Arc;

use axum::{response::Response, routing::get, Json, Router};
use serde::Serialize;

use crate::forward::action::{render_path, select, template_params, ActionSet};
use crate::forward::{Forwarder, Outbound};
use crate::http::request::Inbound;
use crate::http::response::ApiError;
use crate::session::cookie::CookiePolicy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Forwarder,
    pub cookies: Arc<CookiePolicy>,
    /// Reject unknown `action` values instead of using the default.
    pub strict_actions: bool,
}

impl AppState {
    /// Forward with the browser's method, query, body and cookie.
    pub async fn pass(&self, inbound: &Inbound, path: impl Into<String>) -> Response {
        self.forwarder.forward(Outbound::from_inbound(inbound, path)).await
    }

    /// Resolve the `action` discriminator for a family.
    pub fn select<A: ActionSet>(&self, inbound: &Inbound) -> Result<A, ApiError> {
        select(inbound, self.strict_actions)
    }

    /// Backend call for a resolved action.
    ///
    /// Placeholders are filled from the request and, like `action` itself,
    /// removed from the forwarded query string.
    pub fn action_outbound<A: ActionSet>(&self, action: A, inbound: &Inbound) -> Result<Outbound, ApiError> {
        let template = action.path_template();
        let path = render_path(template, inbound)?;

        let mut consumed = template_params(template);
        consumed.push("action");

        Ok(Outbound::from_inbound(inbound, path)
            .with_target(template)
            .with_query(inbound.query_without(&consumed)))
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// All `/api` routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(auth::routes())
        .merge(exams::routes())
        .merge(catalog::routes())
        .merge(profile::routes())
        .merge(admin::routes())
        .merge(progress::routes())
        .merge(jobs::routes())
        .merge(community::routes())
        .merge(subscriptions::routes())
        .merge(wellness::routes())
        .merge(certificates::routes())
        .merge(search::routes())
        .with_state(state)
}
