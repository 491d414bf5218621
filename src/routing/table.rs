//! Route classification table.
//!
//! # Responsibilities
//! - Compile the session config into matchers once, at startup
//! - Classify a page path as bypassed, protected or public
//! - Recognise the demo-mode page
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Bypass rules are checked before protection rules
//! - Anything not listed is public

use crate::config::SessionConfig;
use crate::routing::matcher::{AnyMatcher, ExactPathMatcher, Matcher, StaticAssetMatcher};

/// How the session gate treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Assets, framework internals and API proxies; never gated.
    Bypass,
    /// Requires a session cookie.
    Protected,
    /// Everything else.
    Public,
}

/// Static classification of page paths.
#[derive(Debug)]
pub struct RouteTable {
    bypass: AnyMatcher,
    protected: AnyMatcher,
    demo: Option<ExactPathMatcher>,
}

impl RouteTable {
    /// Compile the table from session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut bypass = AnyMatcher::prefixes(&config.bypass_prefixes);
        bypass.push(Box::new(StaticAssetMatcher));

        Self {
            bypass,
            protected: AnyMatcher::prefixes(&config.protected_prefixes),
            demo: config.demo_path.as_deref().map(ExactPathMatcher::new),
        }
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.bypass.matches(path) {
            RouteClass::Bypass
        } else if self.protected.matches(path) {
            RouteClass::Protected
        } else {
            RouteClass::Public
        }
    }

    /// Whether `path` is the page left open without a session.
    pub fn is_demo(&self, path: &str) -> bool {
        self.demo.as_ref().is_some_and(|m| m.matches(path))
    }
}
