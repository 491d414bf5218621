//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Start the metrics exporter when enabled
//! - Build the server and bind its listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Logging is initialized by the caller, before this runs, so config
//!   errors are still reported through it when possible
//! - The listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{default_config, load_config, ConfigError, GatewayConfig};
use crate::http::server::ServerError;
use crate::http::HttpServer;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("server: {0}")]
    Server(#[from] ServerError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// Configuration from `path`, or the validated defaults.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, StartupError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    Ok(config)
}

/// Start the Prometheus exporter if metrics are enabled.
pub fn start_metrics(config: &GatewayConfig) {
    if !config.observability.metrics_enabled {
        return;
    }
    // Validation has already checked the address.
    match config.observability.metrics_address.parse::<SocketAddr>() {
        Ok(addr) => metrics::init_metrics(addr),
        Err(e) => tracing::error!(
            metrics_address = %config.observability.metrics_address,
            error = %e,
            "Failed to parse metrics address"
        ),
    }
}

/// Build the server and bind its listener.
pub async fn bind(config: GatewayConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    Ok((server, listener))
}
