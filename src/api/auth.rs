//! Authentication handlers.
//!
//! Login is the only place the gateway writes the session cookie, and
//! logout the only place it clears it; neither inspects the token.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::forward::client::{relay, BackendResponse};
use crate::forward::{BodyKind, Outbound};
use crate::http::request::Inbound;
use crate::http::response::ApiError;
use crate::session::cookie::CookiePolicy;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/verify-reset-code", post(verify_reset_code))
        .route("/api/auth/reset-password", post(reset_password))
}

/// Token carried in a successful login body, if any.
fn login_token(response: &BackendResponse) -> Option<String> {
    if !response.status.is_success() {
        return None;
    }
    let body = response.json()?;
    body.get("token")
        .and_then(Value::as_str)
        .or_else(|| body.get("accessToken").and_then(Value::as_str))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Relay the login response, adding the session cookie on success.
fn relay_login(cookies: &CookiePolicy, response: BackendResponse, kind: BodyKind) -> Response {
    let token = login_token(&response);
    let backend_cookies: Vec<HeaderValue> = if response.status.is_success() {
        response.headers.get_all(SET_COOKIE).iter().cloned().collect()
    } else {
        Vec::new()
    };

    let mut relayed = relay(response, kind);
    let headers = relayed.headers_mut();
    for cookie in backend_cookies {
        headers.append(SET_COOKIE, cookie);
    }
    if let Some(token) = token {
        match HeaderValue::from_str(&cookies.issue(&token)) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Login token is not a valid cookie value"),
        }
    }
    relayed
}

async fn login(State(state): State<AppState>, inbound: Inbound) -> Response {
    let cookies = state.cookies.clone();
    state
        .forwarder
        .forward_with(Outbound::from_inbound(&inbound, "/auth/login"), move |response, kind| {
            relay_login(&cookies, response, kind)
        })
        .await
}

async fn me(State(state): State<AppState>, inbound: Inbound) -> Response {
    state.pass(&inbound, "/auth/me").await
}

async fn logout(State(state): State<AppState>) -> Response {
    let mut response = Json(json!({ "success": true })).into_response();
    match HeaderValue::from_str(&state.cookies.clear()) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Failed to build logout cookie"),
    }
    response
}

async fn forgot_password(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    inbound.require_body(&["email"])?;
    Ok(state.pass(&inbound, "/auth/forgot-password").await)
}

async fn verify_reset_code(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    inbound.require_body(&["email", "code"])?;
    Ok(state.pass(&inbound, "/auth/verify-reset-code").await)
}

async fn reset_password(State(state): State<AppState>, inbound: Inbound) -> Result<Response, ApiError> {
    let has_password = ["newPassword", "password"]
        .into_iter()
        .any(|field| inbound.require_body(&[field]).is_ok());
    if !has_password {
        return Err(ApiError::validation("newPassword is required"));
    }
    Ok(state.pass(&inbound, "/auth/reset-password").await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};

    fn policy() -> CookiePolicy {
        CookiePolicy {
            name: "token".into(),
            max_age_secs: 3600,
            secure: false,
        }
    }

    fn backend(status: StatusCode, body: &'static str) -> BackendResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        BackendResponse {
            status,
            headers,
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn test_successful_login_sets_cookie() {
        let response = relay_login(
            &policy(),
            backend(StatusCode::OK, r#"{"token":"abc","user":{"id":1}}"#),
            BodyKind::Passthrough,
        );
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("token=abc; Path=/; Max-Age=3600; HttpOnly; SameSite=Lax"));
    }

    #[test]
    fn test_login_token_lookup() {
        assert_eq!(login_token(&backend(StatusCode::OK, r#"{"accessToken":"xyz"}"#)), Some("xyz".into()));
        assert_eq!(
            login_token(&backend(StatusCode::OK, r#"{"token":null,"accessToken":"xyz"}"#)),
            Some("xyz".into())
        );
        assert_eq!(login_token(&backend(StatusCode::OK, r#"{"token":""}"#)), None);
        assert_eq!(login_token(&backend(StatusCode::OK, "not json")), None);
    }

    #[test]
    fn test_failed_login_sets_no_cookie() {
        let response = relay_login(
            &policy(),
            backend(StatusCode::UNAUTHORIZED, r#"{"message":"Invalid credentials","token":"x"}"#),
            BodyKind::Passthrough,
        );
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let response = logout(State(crate::api::test_support::state())).await;
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_forgot_password_requires_email() {
        let inbound = crate::api::test_support::inbound(axum::http::Method::POST, None, Some(json!({})));
        let err = forgot_password(State(crate::api::test_support::state()), inbound)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }
}
