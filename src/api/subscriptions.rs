//! Subscription handlers.
//!
//! `me` is read on most page loads to decide what to show; an unreachable
//! backend reads as "no active subscription" (`null`) rather than an error.

use axum::{extract::State, http::Method, response::Response, routing::get, Router};

use crate::api::AppState;
use crate::forward::action::ActionSet;
use crate::forward::Fallback;
use crate::http::request::Inbound;
use crate::http::response::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    Plans,
    Me,
    Subscribe,
}

impl SubscriptionAction {
    pub fn fallback(self) -> Fallback {
        match self {
            SubscriptionAction::Plans => Fallback::Unavailable { collection: "plans" },
            SubscriptionAction::Me => Fallback::Null,
            SubscriptionAction::Subscribe => Fallback::Internal,
        }
    }
}

impl ActionSet for SubscriptionAction {
    const FAMILY: &'static str = "subscriptions";
    const ALL: &'static [Self] = &[
        SubscriptionAction::Plans,
        SubscriptionAction::Me,
        SubscriptionAction::Subscribe,
    ];

    fn name(self) -> &'static str {
        match self {
            SubscriptionAction::Plans => "plans",
            SubscriptionAction::Me => "me",
            SubscriptionAction::Subscribe => "subscribe",
        }
    }

    fn path_template(self) -> &'static str {
        match self {
            SubscriptionAction::Plans => "/subscriptions/plans",
            SubscriptionAction::Me => "/subscriptions/me",
            SubscriptionAction::Subscribe => "/subscriptions",
        }
    }

    fn default_for(method: &Method) -> Self {
        if method == Method::GET {
            SubscriptionAction::Plans
        } else {
            SubscriptionAction::Subscribe
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/subscriptions", get(subscriptions).post(subscriptions))
}

async fn subscriptions(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let action = state.select::<SubscriptionAction>(&inbound)?;
    let outbound = state.action_outbound(action, &inbound)?.with_fallback(action.fallback());
    Ok(state.forwarder.forward(outbound).await)
}
