//! Session gate subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming page request (path, Cookie headers)
//!     → routing::RouteTable (bypass / protected / public)
//!     → cookie.rs (find session cookie)
//!     → token.rs (opaque presence check)
//!     → gate.rs (Pass / DemoPass / Redirect to login?from=...)
//! ```
//!
//! # Design Decisions
//! - Only presence of the cookie is consulted; no signature or expiry check
//! - Evaluation errors fail open (see `security::access_control`)

pub mod cookie;
pub mod gate;
pub mod token;

pub use gate::{GateDecision, GateError, SessionGate};
pub use token::SessionToken;
