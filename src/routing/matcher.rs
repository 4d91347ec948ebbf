//! Route matching logic.
//!
//! # Responsibilities
//! - Match the leading path segment against a configured prefix
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - `/users` matches `/users` and `/users/...` but not `/usersfoo`
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix on a segment boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    /// A trailing slash on the prefix is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.len() > 1 && prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// The normalized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` starts with this prefix on a segment boundary.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || self.prefix == "/",
            None => false,
        }
    }
}
