//! Session gate decisions.
//!
//! Decides, before any page is rendered, whether a request may proceed or
//! must be sent to the login page. The backend is never contacted.

use axum::http::HeaderMap;
use thiserror::Error;
use url::form_urlencoded;

use crate::config::SessionConfig;
use crate::routing::{RouteClass, RouteTable};
use crate::session::cookie::CookieError;
use crate::session::token::SessionToken;

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through unchanged.
    Pass,
    /// Protected demo page reached without a session; let it through.
    DemoPass,
    /// Send the visitor to the login page.
    Redirect { location: String },
}

impl GateDecision {
    pub fn label(&self) -> &'static str {
        match self {
            GateDecision::Pass => "pass",
            GateDecision::DemoPass => "demo_pass",
            GateDecision::Redirect { .. } => "redirect",
        }
    }
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("unreadable session cookie: {0}")]
    Cookie(#[from] CookieError),
}

/// Cookie-presence access check over a static route table.
#[derive(Debug)]
pub struct SessionGate {
    table: RouteTable,
    cookie_name: String,
    login_path: String,
}

impl SessionGate {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            table: RouteTable::from_config(config),
            cookie_name: config.cookie_name.clone(),
            login_path: config.login_path.clone(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Decide for a path given whether a token was found.
    pub fn decide(&self, path: &str, token: Option<&SessionToken>) -> GateDecision {
        match self.table.classify(path) {
            RouteClass::Bypass | RouteClass::Public => GateDecision::Pass,
            RouteClass::Protected if token.is_some() => GateDecision::Pass,
            RouteClass::Protected if self.table.is_demo(path) => GateDecision::DemoPass,
            RouteClass::Protected => GateDecision::Redirect {
                location: self.login_location(path),
            },
        }
    }

    /// Read the session cookie from `headers` and decide.
    pub fn evaluate(&self, path: &str, headers: &HeaderMap) -> Result<GateDecision, GateError> {
        if self.table.classify(path) == RouteClass::Bypass {
            return Ok(GateDecision::Pass);
        }
        let token = SessionToken::from_headers(headers, &self.cookie_name)?;
        Ok(self.decide(path, token.as_ref()))
    }

    fn login_location(&self, from: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("from", from)
            .finish();
        format!("{}?{}", self.login_path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    fn gate() -> SessionGate {
        SessionGate::new(&SessionConfig::default())
    }

    fn token() -> SessionToken {
        SessionToken::new("opaque").unwrap()
    }

    #[test]
    fn test_protected_without_token_redirects() {
        let decision = gate().decide("/exam/7", None);
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/login?from=%2Fexam%2F7".to_string()
            }
        );
    }

    #[test]
    fn test_protected_with_token_passes() {
        assert_eq!(gate().decide("/settings", Some(&token())), GateDecision::Pass);
    }

    #[test]
    fn test_demo_dashboard_passes_without_token() {
        let gate = gate();
        assert_eq!(gate.decide("/dashboard/student", None), GateDecision::DemoPass);
        assert!(matches!(gate.decide("/dashboard/admin", None), GateDecision::Redirect { .. }));
        assert_eq!(gate.decide("/dashboard/student", Some(&token())), GateDecision::Pass);
    }

    #[test]
    fn test_public_and_bypass_ignore_token() {
        let gate = gate();
        for path in ["/", "/about", "/api/goals", "/_next/data/x.json", "/logo.svg"] {
            assert_eq!(gate.decide(path, None), GateDecision::Pass, "{}", path);
            assert_eq!(gate.decide(path, Some(&token())), GateDecision::Pass, "{}", path);
        }
    }

    #[test]
    fn test_evaluate_reads_cookie() {
        let gate = gate();
        let mut headers = HeaderMap::new();
        assert!(matches!(
            gate.evaluate("/profile", &headers).unwrap(),
            GateDecision::Redirect { .. }
        ));

        headers.insert(COOKIE, HeaderValue::from_static("token=xyz"));
        assert_eq!(gate.evaluate("/profile", &headers).unwrap(), GateDecision::Pass);
    }

    #[test]
    fn test_evaluate_rejects_unreadable_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_bytes(b"token=\xff").unwrap());

        assert!(gate().evaluate("/profile", &headers).is_err());
        // Bypassed paths never look at cookies.
        assert_eq!(gate().evaluate("/api/profile", &headers).unwrap(), GateDecision::Pass);
    }
}
