//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! Backend address:
//!     backend.base_url → API_URL → NEXT_PUBLIC_API_URL → http://localhost:4000
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route classification table never
//!   changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config, load_config, resolve_backend_url, ConfigError};
pub use schema::{
    BackendConfig, Environment, FrontendConfig, GatewayConfig, ListenerConfig,
    ObservabilityConfig, SecurityConfig, SessionConfig, TimeoutConfig,
};
