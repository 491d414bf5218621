//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, browser request → Inbound)
//!     → [session gate] (security::access_control)
//!     → api handlers or page fallback (forward)
//!     → response.rs (JSON error envelopes)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{Inbound, Payload, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{HttpServer, ServerError};
