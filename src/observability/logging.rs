//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! this crate and `tower_http` logs at info.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter directive for a configured level.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!("edu_gateway={},tower_http=info", config.log_level)
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(config).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let mut config = ObservabilityConfig::default();
        config.log_level = "debug".into();
        assert_eq!(default_directive(&config), "edu_gateway=debug,tower_http=info");
    }
}
