//! Job board and scholarship handlers.

use axum::{extract::State, http::Method, response::Response, routing::get, Router};

use crate::api::AppState;
use crate::forward::action::ActionSet;
use crate::http::request::Inbound;
use crate::http::response::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobsAction {
    List,
    Apply,
    Resume,
    Applications,
    Post,
    Applicants,
    SetStatus,
}

impl ActionSet for JobsAction {
    const FAMILY: &'static str = "jobs";
    const ALL: &'static [Self] = &[
        JobsAction::List,
        JobsAction::Apply,
        JobsAction::Resume,
        JobsAction::Applications,
        JobsAction::Post,
        JobsAction::Applicants,
        JobsAction::SetStatus,
    ];

    fn name(self) -> &'static str {
        match self {
            JobsAction::List => "list",
            JobsAction::Apply => "apply",
            JobsAction::Resume => "resume",
            JobsAction::Applications => "applications",
            JobsAction::Post => "post",
            JobsAction::Applicants => "applicants",
            JobsAction::SetStatus => "set-status",
        }
    }

    fn path_template(self) -> &'static str {
        match self {
            JobsAction::List => "/jobs",
            JobsAction::Apply => "/jobs/apply",
            JobsAction::Resume => "/jobs/resume",
            JobsAction::Applications => "/jobs/applications",
            JobsAction::Post => "/jobs/post",
            JobsAction::Applicants => "/jobs/applicants",
            JobsAction::SetStatus => "/jobs/set-status",
        }
    }

    fn default_for(_method: &Method) -> Self {
        JobsAction::List
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScholarshipAction {
    Mine,
    Award,
}

impl ActionSet for ScholarshipAction {
    const FAMILY: &'static str = "scholarships";
    const ALL: &'static [Self] = &[ScholarshipAction::Mine, ScholarshipAction::Award];

    fn name(self) -> &'static str {
        match self {
            ScholarshipAction::Mine => "mine",
            ScholarshipAction::Award => "award",
        }
    }

    fn path_template(self) -> &'static str {
        match self {
            ScholarshipAction::Mine => "/scholarships/mine",
            ScholarshipAction::Award => "/scholarships/award",
        }
    }

    fn default_for(_method: &Method) -> Self {
        ScholarshipAction::Mine
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/jobs", get(jobs).post(jobs))
        .route("/api/scholarships", get(scholarships).post(scholarships))
}

async fn jobs(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let action = state.select::<JobsAction>(&inbound)?;
    Ok(state.forwarder.forward(state.action_outbound(action, &inbound)?).await)
}

async fn scholarships(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let action = state.select::<ScholarshipAction>(&inbound)?;
    Ok(state.forwarder.forward(state.action_outbound(action, &inbound)?).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support;
    use crate::http::request::Payload;
    use serde_json::json;

    #[test]
    fn test_every_job_action_has_a_path() {
        for action in JobsAction::ALL {
            assert_eq!(JobsAction::from_name(action.name()), Some(*action));
            assert!(action.path_template().starts_with("/jobs"));
        }
        assert_eq!(JobsAction::from_name("set-status"), Some(JobsAction::SetStatus));
    }

    #[test]
    fn test_job_post_keeps_body_and_drops_action() {
        let state = test_support::state();
        let body = json!({ "title": "Rust dev", "type": "full-time", "companyName": "Acme" });
        let inbound = test_support::inbound(Method::POST, Some("action=post"), Some(body.clone()));

        let action = state.select::<JobsAction>(&inbound).unwrap();
        assert_eq!(action, JobsAction::Post);

        let outbound = state.action_outbound(action, &inbound).unwrap();
        assert_eq!(outbound.path, "/jobs/post");
        assert_eq!(outbound.method, Method::POST);
        assert!(outbound.query.is_none());
        match outbound.payload {
            Payload::Json(bytes) => assert_eq!(serde_json::from_slice::<serde_json::Value>(&bytes).unwrap(), body),
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_action_in_body_selects_award() {
        let state = test_support::state();
        let inbound = test_support::inbound(Method::POST, None, Some(json!({ "action": "award", "userId": 4 })));
        assert_eq!(state.select::<ScholarshipAction>(&inbound).unwrap(), ScholarshipAction::Award);
    }
}
