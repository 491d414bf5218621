//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::config::schema::{BackendConfig, GatewayConfig, DEFAULT_BACKEND_URL};
use crate::config::validation::{validate_config, ValidationError};

/// Server-side variable naming the backend base address.
pub const API_URL_ENV: &str = "API_URL";

/// Public-prefixed variable naming the same address; consulted second.
pub const PUBLIC_API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Validate the built-in defaults.
pub fn default_config() -> Result<GatewayConfig, ConfigError> {
    let config = GatewayConfig::default();
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the backend base address for this process.
///
/// Precedence: config file, `API_URL`, `NEXT_PUBLIC_API_URL`, default.
pub fn resolve_backend_url(config: &BackendConfig) -> String {
    resolve_backend_url_from(
        config.base_url.as_deref(),
        env::var(API_URL_ENV).ok().as_deref(),
        env::var(PUBLIC_API_URL_ENV).ok().as_deref(),
    )
}

/// Pure form of [`resolve_backend_url`].
///
/// The first non-empty candidate wins. A relative value resolves to the
/// default local backend rather than to the next candidate.
pub fn resolve_backend_url_from(
    configured: Option<&str>,
    api_url: Option<&str>,
    public_api_url: Option<&str>,
) -> String {
    let candidate = [configured, api_url, public_api_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty());

    match candidate {
        Some(value) if is_absolute_http(value) => value.trim_end_matches('/').to_string(),
        Some(value) => {
            tracing::warn!(
                configured = %value,
                fallback = DEFAULT_BACKEND_URL,
                "Backend URL is relative, using default local backend"
            );
            DEFAULT_BACKEND_URL.to_string()
        }
        None => DEFAULT_BACKEND_URL.to_string(),
    }
}

pub(crate) fn is_absolute_http(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}
