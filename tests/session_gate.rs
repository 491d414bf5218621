//! Session gate behaviour over HTTP.

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let dead = common::dead_address().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    let res = common::client().get(gateway.url("/exam/7")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/login?from=%2Fexam%2F7");
}

#[tokio::test]
async fn test_session_cookie_passes_gate() {
    let dead = common::dead_address().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    // No page renderer configured: getting past the gate means a 404.
    let res = common::client()
        .get(gateway.url("/exam/7"))
        .header("cookie", "theme=dark; token=abc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreadable_cookie_header_fails_open() {
    let dead = common::dead_address().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    let cookie = reqwest::header::HeaderValue::from_bytes(b"token=\xff").unwrap();
    let res = common::client()
        .get(gateway.url("/exam/7"))
        .header(reqwest::header::COOKIE, cookie)
        .send()
        .await
        .unwrap();
    assert_ne!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_demo_page_open_without_session() {
    let dead = common::dead_address().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    let res = common::client().get(gateway.url("/dashboard/student")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = common::client().get(gateway.url("/dashboard/teacher")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_assets_and_api_bypass_gate() {
    let dead = common::dead_address().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    for path in ["/_next/static/chunk.js", "/dashboard/logo.png", "/api/health"] {
        let res = common::client().get(gateway.url(path)).send().await.unwrap();
        assert_ne!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{} was gated", path);
    }
}

#[tokio::test]
async fn test_public_pages_are_open() {
    let dead = common::dead_address().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    for path in ["/", "/login", "/about"] {
        let res = common::client().get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}
