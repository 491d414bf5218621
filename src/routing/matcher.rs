//! Path matching logic.
//!
//! # Responsibilities
//! - Match path prefixes on segment boundaries
//! - Match a single exact page path
//! - Recognise static asset requests by file extension
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A trailing slash is ignored (`/dashboard/` equals `/dashboard`)
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Returns true if `path` is `prefix` itself or lies below it.
///
/// `/admin` covers `/admin` and `/admin/users` but not `/administrator`.
pub fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        is_under_prefix(path, &self.prefix)
    }
}

/// Matches exactly one path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: normalize(path.as_ref()).to_string(),
        }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        normalize(path) == self.path
    }
}

/// Matches paths whose last segment carries a file extension.
#[derive(Debug, Clone, Default)]
pub struct StaticAssetMatcher;

impl Matcher for StaticAssetMatcher {
    fn matches(&self, path: &str) -> bool {
        let last = path.rsplit('/').next().unwrap_or_default();
        match last.rfind('.') {
            Some(dot) => dot > 0 && dot + 1 < last.len(),
            None => false,
        }
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// One prefix matcher per entry.
    pub fn prefixes<S: AsRef<str>>(prefixes: &[S]) -> Self {
        Self::new(
            prefixes
                .iter()
                .map(|p| Box::new(PathPrefixMatcher::new(p.as_ref())) as Box<dyn Matcher>)
                .collect(),
        )
    }

    pub fn push(&mut self, matcher: Box<dyn Matcher>) {
        self.matchers.push(matcher);
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
