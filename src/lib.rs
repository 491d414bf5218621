//! Edge gateway for the education platform.
//!
//! Sits between browsers and two upstreams: the API backend and the page
//! renderer. Page requests pass a cookie-presence session gate; `/api`
//! requests are forwarded to the backend with the browser's cookie and
//! relayed back with failures normalized to JSON envelopes.

// Core subsystems
pub mod api;
pub mod config;
pub mod forward;
pub mod http;
pub mod routing;
pub mod session;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
