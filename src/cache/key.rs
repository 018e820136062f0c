//! Cache Key Module
//!
//! Builds request fingerprints from an operation name and its parameters.

use std::fmt;

use serde_json::Value;

// == Cache Key ==
/// Deterministic fingerprint of a request.
///
/// Parameter values are rendered as JSON, so string values are quoted and
/// escaped and no two distinct parameter sets can render to the same key.
/// No normalization is applied: `"Rust"` and `"rust "` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    // == Constructor ==
    /// Builds a key from an operation name and ordered `(name, value)` pairs.
    pub fn new(operation: &str, params: &[(&str, Value)]) -> Self {
        let mut key = String::from(operation);
        for (name, value) in params {
            key.push('|');
            key.push_str(name);
            key.push('=');
            key.push_str(&value.to_string());
        }
        Self(key)
    }

    /// Key for a full-text search request.
    pub fn search(query: &str, limit: u32, offset: u32) -> Self {
        Self::new(
            "search",
            &[
                ("query", Value::from(query)),
                ("limit", Value::from(limit)),
                ("offset", Value::from(offset)),
            ],
        )
    }

    /// Key for a page request.
    pub fn page(slug: &str, include_content: bool, validate_links: bool) -> Self {
        Self::new(
            "page",
            &[
                ("slug", Value::from(slug)),
                ("include_content", Value::from(include_content)),
                ("validate_links", Value::from(validate_links)),
            ],
        )
    }

    /// Key for an edit request listing.
    pub fn edit_requests(slug: &str, limit: u32, offset: u32) -> Self {
        Self::new(
            "edit_requests",
            &[
                ("slug", Value::from(slug)),
                ("limit", Value::from(limit)),
                ("offset", Value::from(offset)),
            ],
        )
    }

    /// Returns the rendered key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CacheKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
