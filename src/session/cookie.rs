//! Session cookie reading and writing.

use axum::http::{header::COOKIE, HeaderMap};
use thiserror::Error;

use crate::config::GatewayConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    #[error("cookie header is not valid UTF-8")]
    NotUtf8,
}

/// Look up a cookie by name across every `Cookie` header.
///
/// The first occurrence wins. Values are returned as sent, unquoted.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Result<Option<String>, CookieError> {
    for header in headers.get_all(COOKIE) {
        let raw = header.to_str().map_err(|_| CookieError::NotUtf8)?;
        for pair in raw.split(';') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == name {
                return Ok(Some(value.trim().trim_matches('"').to_string()));
            }
        }
    }
    Ok(None)
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(name: &str, token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn cleared_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax",
        name
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Attributes of the session cookie as issued and cleared by the gateway.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl CookiePolicy {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            name: config.session.cookie_name.clone(),
            max_age_secs: config.session.cookie_max_age_secs,
            secure: config.secure_cookies(),
        }
    }

    pub fn issue(&self, token: &str) -> String {
        session_cookie(&self.name, token, self.max_age_secs, self.secure)
    }

    pub fn clear(&self) -> String {
        cleared_cookie(&self.name, self.secure)
    }
}
