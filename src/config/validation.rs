//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that would make the
//! gateway misbehave at runtime. All errors are collected, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::loader::is_absolute_http;
use crate::config::schema::GatewayConfig;
use crate::routing::matcher::is_under_prefix;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if let Some(upstream) = &config.frontend.upstream_url {
        if !is_absolute_http(upstream) {
            errors.push(ValidationError::new(
                "frontend.upstream_url",
                "must be an absolute http(s) URL",
            ));
        }
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("timeouts.connect_secs", timeouts.connect_secs),
        ("timeouts.request_secs", timeouts.request_secs),
        ("timeouts.unavailable_secs", timeouts.unavailable_secs),
        ("timeouts.backend_secs", timeouts.backend_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be greater than zero"));
        }
    }
    for (field, value) in [
        ("timeouts.unavailable_secs", timeouts.unavailable_secs),
        ("timeouts.backend_secs", timeouts.backend_secs),
    ] {
        if value >= timeouts.request_secs {
            errors.push(ValidationError::new(field, "must be less than timeouts.request_secs"));
        }
    }

    let session = &config.session;
    if session.cookie_name.is_empty()
        || session
            .cookie_name
            .chars()
            .any(|c| matches!(c, '=' | ';' | ',' | ' ' | '\t'))
    {
        errors.push(ValidationError::new(
            "session.cookie_name",
            "must be a non-empty cookie token",
        ));
    }

    if !session.login_path.starts_with('/') {
        errors.push(ValidationError::new("session.login_path", "must start with '/'"));
    } else if session
        .protected_prefixes
        .iter()
        .any(|prefix| is_under_prefix(&session.login_path, prefix))
    {
        errors.push(ValidationError::new(
            "session.login_path",
            "is itself protected and would redirect to itself",
        ));
    }

    if let Some(demo) = &session.demo_path {
        if !demo.starts_with('/') {
            errors.push(ValidationError::new("session.demo_path", "must start with '/'"));
        }
    }

    for (field, prefixes) in [
        ("session.protected_prefixes", &session.protected_prefixes),
        ("session.bypass_prefixes", &session.bypass_prefixes),
    ] {
        for prefix in prefixes {
            if !prefix.starts_with('/') {
                errors.push(ValidationError::new(
                    field,
                    format!("'{}' must start with '/'", prefix),
                ));
            }
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "is not a socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
