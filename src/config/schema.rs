//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default backend address used when nothing (or a relative URL) is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Deployment environment; controls the `Secure` cookie attribute.
    pub environment: Environment,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Backend API location.
    pub backend: BackendConfig,

    /// Page renderer that receives gated, non-API traffic.
    pub frontend: FrontendConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Session gate settings.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening settings.
    pub security: SecurityConfig,
}

impl GatewayConfig {
    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.session
            .secure_cookie
            .unwrap_or(self.environment == Environment::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Backend API configuration.
///
/// When `base_url` is unset the loader consults `API_URL`, then
/// `NEXT_PUBLIC_API_URL`, then falls back to [`DEFAULT_BACKEND_URL`].
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

/// Page renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FrontendConfig {
    /// Absolute URL of the page renderer. Without it, non-API paths get a 404.
    pub upstream_url: Option<String>,
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outbound connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for a browser request in seconds.
    pub request_secs: u64,

    /// Deadline for endpoints that degrade to 503 instead of waiting.
    pub unavailable_secs: u64,

    /// Deadline for every other backend call, including each search source.
    /// Kept below `request_secs` so a hung backend still gets a JSON answer.
    pub backend_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            unavailable_secs: 5,
            backend_secs: 25,
        }
    }
}

/// Session gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie whose presence marks a session.
    pub cookie_name: String,

    /// Where anonymous visitors of protected pages are sent.
    pub login_path: String,

    /// Path prefixes that require a session cookie.
    pub protected_prefixes: Vec<String>,

    /// Path prefixes that are never gated (assets, framework internals, API).
    pub bypass_prefixes: Vec<String>,

    /// Protected page that stays reachable without a session (demo mode).
    pub demo_path: Option<String>,

    /// Lifetime of the cookie issued on login.
    pub cookie_max_age_secs: u64,

    /// Force the `Secure` attribute on or off. Defaults to production only.
    pub secure_cookie: Option<bool>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let protected = [
            "/dashboard",
            "/courses",
            "/exam",
            "/profile",
            "/settings",
            "/chat",
            "/admin",
            "/jobs",
            "/wellness",
            "/resume",
            "/subscriptions",
        ];
        let bypass = ["/_next", "/api", "/static", "/favicon.ico"];

        Self {
            cookie_name: "token".to_string(),
            login_path: "/login".to_string(),
            protected_prefixes: protected.iter().map(|p| p.to_string()).collect(),
            bypass_prefixes: bypass.iter().map(|p| p.to_string()).collect(),
            demo_path: Some("/dashboard/student".to_string()),
            cookie_max_age_secs: 7 * 24 * 3600,
            secure_cookie: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Reject unknown `action` discriminators instead of using the default.
    pub strict_actions: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 10 * 1024 * 1024, // 10MB, avatar uploads
            strict_actions: false,
        }
    }
}
