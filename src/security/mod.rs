//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (session gate: pass, demo pass, or redirect)
//!     → Pass to api handlers / page fallback
//! Outgoing response:
//!     → headers.rs (nosniff, frame and referrer policy)
//! ```
//!
//! # Design Decisions
//! - The gate checks cookie presence only; the backend owns authentication
//! - Gate evaluation errors fail open and are logged

pub mod access_control;
pub mod headers;
