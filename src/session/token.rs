//! Opaque session token.

use std::fmt;

use axum::http::HeaderMap;

use crate::session::cookie::{find_cookie, CookieError};

/// The value of the session cookie.
///
/// Never parsed or verified here. Signature and expiry are the backend's
/// concern; the gateway only asks whether one is present.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw cookie value. Empty values are not tokens.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Read the token from the request's cookies.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Result<Option<Self>, CookieError> {
        Ok(find_cookie(headers, cookie_name)?.and_then(Self::new))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    #[test]
    fn test_empty_cookie_is_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token="));

        assert_eq!(SessionToken::from_headers(&headers, "token").unwrap(), None);
    }

    #[test]
    fn test_debug_hides_value() {
        let token = SessionToken::new("secret").unwrap();
        assert_eq!(format!("{:?}", token), "SessionToken(..)");
        assert_eq!(token.as_str(), "secret");
    }
}
