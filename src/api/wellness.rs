//! Wellness handlers: mindfulness sessions, mood logs and counselling slots.

use axum::{extract::State, http::Method, response::Response, routing::get, Router};

use crate::api::AppState;
use crate::forward::action::ActionSet;
use crate::http::request::Inbound;
use crate::http::response::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellnessAction {
    Mindfulness,
    Logs,
    Slots,
    StudyLog,
    Book,
}

impl ActionSet for WellnessAction {
    const FAMILY: &'static str = "wellness";
    const ALL: &'static [Self] = &[
        WellnessAction::Mindfulness,
        WellnessAction::Logs,
        WellnessAction::Slots,
        WellnessAction::StudyLog,
        WellnessAction::Book,
    ];

    fn name(self) -> &'static str {
        match self {
            WellnessAction::Mindfulness => "mindfulness",
            WellnessAction::Logs => "logs",
            WellnessAction::Slots => "slots",
            WellnessAction::StudyLog => "study-log",
            WellnessAction::Book => "book",
        }
    }

    fn path_template(self) -> &'static str {
        match self {
            WellnessAction::Mindfulness => "/wellness/mindfulness",
            WellnessAction::Logs => "/wellness/logs",
            WellnessAction::Slots => "/wellness/slots",
            WellnessAction::StudyLog => "/wellness/study-log",
            WellnessAction::Book => "/wellness/slots/{slotId}/book",
        }
    }

    fn default_for(method: &Method) -> Self {
        if method == Method::GET {
            WellnessAction::Mindfulness
        } else {
            WellnessAction::Logs
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/wellness", get(wellness).post(wellness))
}

async fn wellness(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let action = state.select::<WellnessAction>(&inbound)?;
    Ok(state.forwarder.forward(state.action_outbound(action, &inbound)?).await)
}
