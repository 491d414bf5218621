//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared backend client, forwarders and session gate
//! - Create the Axum router: `/api` handlers first, page fallback last
//! - Wire up middleware (tracing, request ID, limits, panics, headers, gate)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::Url;

use crate::api::{self, AppState};
use crate::config::{resolve_backend_url, GatewayConfig};
use crate::forward::client::{build_client, BuildError};
use crate::forward::page::page_handler;
use crate::forward::{Forwarder, PageProxy};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::panic_response;
use crate::security::{access_control::session_gate_middleware, headers};
use crate::session::cookie::CookiePolicy;
use crate::session::SessionGate;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("backend client: {0}")]
    Backend(#[from] BuildError),
    #[error("invalid frontend upstream URL: {0}")]
    Upstream(url::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let backend_url = resolve_backend_url(&config.backend);
        let client = build_client(&config.timeouts).map_err(BuildError::from)?;

        let forwarder = Forwarder::with_client(
            client.clone(),
            Url::parse(&backend_url).map_err(BuildError::from)?,
            &config.timeouts,
        );
        let upstream = config
            .frontend
            .upstream_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(ServerError::Upstream)?;
        let pages = PageProxy::new(
            client,
            upstream,
            config.security.max_body_size,
            Duration::from_secs(config.timeouts.backend_secs),
        );

        tracing::info!(
            backend = %forwarder.base_url(),
            frontend = ?config.frontend.upstream_url,
            environment = ?config.environment,
            "Forwarders configured"
        );

        let state = AppState {
            forwarder,
            cookies: Arc::new(CookiePolicy::from_config(&config)),
            strict_actions: config.security.strict_actions,
        };
        let gate = Arc::new(SessionGate::new(&config.session));

        let router = Self::build_router(&config, state, pages, gate);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers wrap outward: the request ID is set before tracing sees the
    /// request, and the gate runs innermost, after limits and panic capture.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState, pages: PageProxy, gate: Arc<SessionGate>) -> Router {
        let page_routes = Router::new().fallback(page_handler).with_state(pages);

        let mut router = api::router(state)
            .merge(page_routes)
            .layer(middleware::from_fn_with_state(gate, session_gate_middleware));

        if config.security.enable_headers {
            router = headers::apply(router);
        }

        router
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
