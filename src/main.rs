//! Education platform edge gateway.
//!
//! # Architecture Overview
//!
//! ```text
//! Browser request
//!     → request id + trace span
//!     → session gate (protected page without cookie → 307 /login?from=...)
//!     → /api/...  → api handlers → API backend (cookie forwarded)
//!     → other     → page proxy   → page renderer
//!     ← status relayed; failures as { "error": ... }
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use edu_gateway::lifecycle::{startup, Shutdown};
use edu_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "edu-gateway")]
#[command(about = "Session gate and API forwarder for the education platform", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match startup::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("edu-gateway: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "edu-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        unavailable_timeout_secs = config.timeouts.unavailable_secs,
        backend_timeout_secs = config.timeouts.backend_secs,
        "Configuration loaded"
    );

    startup::start_metrics(&config);

    let (server, listener) = match startup::bind(config).await {
        Ok(bound) => bound,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    shutdown.on_os_signal();

    if let Err(e) = server.run(listener, rx).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
