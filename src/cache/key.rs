//! Cache Key Derivation
//!
//! Maps a request descriptor (path + query parameters) to a canonical key.
//! Parameters are sorted by name so the key does not depend on the order in
//! which the client sent them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

// == Cache Key ==
/// Canonical cache key of the form `path?a=1&b=2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    // == Derive ==
    /// Derives the key for `path` with the given query parameters.
    ///
    /// The `?` separator is always emitted, so a request without parameters
    /// yields `path?`.
    pub fn derive(path: &str, query: &HashMap<String, String>) -> Self {
        let sorted: BTreeMap<&str, &str> = query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let joined = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        Self(format!("{}?{}", path, joined))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key belongs to `path` itself or one of its sub-paths.
    ///
    /// `/api/data` covers `/api/data?…` and `/api/data/7?…` but not
    /// `/api/database?…`.
    pub fn is_under(&self, path: &str) -> bool {
        match self.0.strip_prefix(path) {
            Some(rest) => rest.starts_with('?') || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
