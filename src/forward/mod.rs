//! Route forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! api handler (browser path, Inbound)
//!     → action.rs (pick backend endpoint from `action`, if multiplexed)
//!     → outbound.rs (method, path, query, body, cookie, fallback)
//!     → client.rs (reqwest call, optional deadline)
//!     → client.rs relay (status passthrough / error envelope / fallback)
//!     → browser
//!
//! page fallback (non-API paths after the session gate)
//!     → page.rs → page renderer
//! ```
//!
//! # Design Decisions
//! - Stateless: every call is independent, nothing is cached or retried
//! - The backend's status code always reaches the browser
//! - Network failures never escape as transport errors

pub mod action;
pub mod client;
pub mod outbound;
pub mod page;

pub use action::{ActionSet, Dispatch};
pub use client::{BackendResponse, ForwardError, Forwarder};
pub use outbound::{BodyKind, Fallback, Outbound};
pub use page::PageProxy;
