//! Security response headers.
//!
//! # Responsibilities
//! - Add `X-Content-Type-Options`, `X-Frame-Options` and `Referrer-Policy`
//!   to every response
//!
//! # Design Decisions
//! - Values set by the page renderer or the backend win; these are only
//!   filled in when absent

use axum::{
    http::{
        header::{REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        HeaderName, HeaderValue,
    },
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Default security headers and their values.
pub fn defaults() -> [(HeaderName, HeaderValue); 3] {
    [
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (REFERRER_POLICY, HeaderValue::from_static("strict-origin-when-cross-origin")),
    ]
}

/// Layer the default security headers onto a router.
pub fn apply(router: Router) -> Router {
    defaults()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(name, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::IntoResponse, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_headers_added_unless_present() {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .route(
                "/framed",
                get(|| async { ([(X_FRAME_OPTIONS, "SAMEORIGIN")], "ok").into_response() }),
            );
        let router = apply(router);

        let response = router
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[X_FRAME_OPTIONS], "DENY");

        let response = router
            .oneshot(Request::get("/framed").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[X_FRAME_OPTIONS], "SAMEORIGIN");
    }
}
