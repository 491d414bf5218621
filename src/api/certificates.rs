//! Certificate handlers, including the binary PDF export.

use axum::{extract::State, http::Method, response::Response, routing::get, Router};

use crate::api::AppState;
use crate::forward::action::ActionSet;
use crate::http::request::Inbound;
use crate::http::response::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateAction {
    Mine,
    Templates,
    Verify,
    Issue,
    Pdf,
}

impl ActionSet for CertificateAction {
    const FAMILY: &'static str = "certificates";
    const ALL: &'static [Self] = &[
        CertificateAction::Mine,
        CertificateAction::Templates,
        CertificateAction::Verify,
        CertificateAction::Issue,
        CertificateAction::Pdf,
    ];

    fn name(self) -> &'static str {
        match self {
            CertificateAction::Mine => "mine",
            CertificateAction::Templates => "templates",
            CertificateAction::Verify => "verify",
            CertificateAction::Issue => "issue",
            CertificateAction::Pdf => "pdf",
        }
    }

    fn path_template(self) -> &'static str {
        match self {
            CertificateAction::Mine => "/certificates/mine",
            CertificateAction::Templates => "/certificates/templates",
            CertificateAction::Verify => "/certificates/verify/{code}",
            CertificateAction::Issue => "/certificates/issue",
            CertificateAction::Pdf => "/certificates/pdf",
        }
    }

    fn default_for(_method: &Method) -> Self {
        CertificateAction::Mine
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/certificates", get(certificates).post(certificates))
}

async fn certificates(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let action = state.select::<CertificateAction>(&inbound)?;
    let mut outbound = state.action_outbound(action, &inbound)?;
    if action == CertificateAction::Pdf {
        outbound = outbound.pdf();
    }
    Ok(state.forwarder.forward(outbound).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support;

    #[test]
    fn test_verify_code_from_query() {
        let state = test_support::state();
        let inbound = test_support::inbound(Method::GET, Some("action=verify&code=AB-12"), None);
        let action = state.select::<CertificateAction>(&inbound).unwrap();
        let outbound = state.action_outbound(action, &inbound).unwrap();
        assert_eq!(outbound.path, "/certificates/verify/AB-12");
        assert!(outbound.query.is_none());
    }

    #[test]
    fn test_verify_without_code_is_rejected() {
        let state = test_support::state();
        let inbound = test_support::inbound(Method::GET, Some("action=verify"), None);
        let err = state.action_outbound(CertificateAction::Verify, &inbound).unwrap_err();
        assert_eq!(err.to_string(), "code is required");
    }
}
