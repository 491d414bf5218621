//! Page route classification.
//!
//! # Data Flow
//! ```text
//! Incoming page path
//!     → table.rs (bypass? protected? public?)
//!     → matcher.rs (evaluate prefix / exact / asset conditions)
//!     → Return: RouteClass
//!
//! Table Compilation (at startup):
//!     SessionConfig
//!     → Compile matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same path always gets the same class

pub mod matcher;
pub mod table;

pub use table::{RouteClass, RouteTable};
