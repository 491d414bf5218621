//! Goals, skills and gamification handlers.
//!
//! Goals and skills back dashboard widgets that must render even when the
//! backend is down: their calls carry the short deadline and degrade to a
//! 503 with an empty list.

use axum::{
    extract::{Path, State},
    http::Method,
    response::Response,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::forward::action::ActionSet;
use crate::forward::{Fallback, Outbound};
use crate::http::request::Inbound;
use crate::http::response::ApiError;

const GOALS_FALLBACK: Fallback = Fallback::Unavailable { collection: "goals" };
const SKILLS_FALLBACK: Fallback = Fallback::Unavailable { collection: "skills" };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalAction {
    List,
    Upsert,
    Progress,
    Complete,
    Delete,
}

impl ActionSet for GoalAction {
    const FAMILY: &'static str = "goals";
    const ALL: &'static [Self] = &[
        GoalAction::List,
        GoalAction::Upsert,
        GoalAction::Progress,
        GoalAction::Complete,
        GoalAction::Delete,
    ];

    fn name(self) -> &'static str {
        match self {
            GoalAction::List => "list",
            GoalAction::Upsert => "upsert",
            GoalAction::Progress => "progress",
            GoalAction::Complete => "complete",
            GoalAction::Delete => "delete",
        }
    }

    fn path_template(self) -> &'static str {
        match self {
            GoalAction::List | GoalAction::Upsert => "/goals",
            GoalAction::Progress => "/goals/progress",
            GoalAction::Complete => "/goals/complete",
            GoalAction::Delete => "/goals/delete",
        }
    }

    fn default_for(method: &Method) -> Self {
        if method == Method::GET {
            GoalAction::List
        } else {
            GoalAction::Upsert
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/goals", get(goals).post(goals))
        .route("/api/skills", get(skill_tree).post(complete_skill))
        .route("/api/gamification/{*path}", get(gamification).post(gamification))
}

async fn goals(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let action = state.select::<GoalAction>(&inbound)?;
    let outbound = state.action_outbound(action, &inbound)?.with_fallback(GOALS_FALLBACK);
    Ok(state.forwarder.forward(outbound).await)
}

async fn skill_tree(State(state): State<AppState>, inbound: Inbound) -> Response {
    let outbound = Outbound::from_inbound(&inbound, "/skills/tree").with_fallback(SKILLS_FALLBACK);
    state.forwarder.forward(outbound).await
}

async fn complete_skill(State(state): State<AppState>, inbound: Inbound) -> Response {
    let outbound = Outbound::from_inbound(&inbound, "/skills/complete").with_fallback(SKILLS_FALLBACK);
    state.forwarder.forward(outbound).await
}

async fn gamification(State(state): State<AppState>, Path(path): Path<String>, inbound: Inbound) -> Response {
    let outbound = Outbound::from_inbound(&inbound, format!("/gamification/{}", path))
        .with_target("/gamification/{path}");
    state.forwarder.forward(outbound).await
}
