//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// == Consistency Policy ==
/// How mutations keep the cached collection coherent with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsistencyPolicy {
    /// Mutations only refresh the cache key of the mutating request itself.
    /// Earlier reads stay cached under their own key until they expire.
    OwnKey,
    /// Mutations also drop every entry under the collection path before
    /// refreshing their own key, so the next read reloads from the store.
    #[default]
    PathPrefix,
}

impl FromStr for ConsistencyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "own-key" | "own_key" => Ok(Self::OwnKey),
            "path-prefix" | "path_prefix" => Ok(Self::PathPrefix),
            other => Err(format!("unknown consistency policy '{}'", other)),
        }
    }
}

impl fmt::Display for ConsistencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnKey => f.write_str("own-key"),
            Self::PathPrefix => f.write_str("path-prefix"),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the collection
    pub data_file: PathBuf,
    /// Cache-wide TTL in seconds for entries set without one (0 = never expire)
    pub default_ttl: u64,
    /// TTL in seconds the handlers apply to every cached response
    pub response_ttl: u64,
    /// Interval in seconds between passive expiry sweeps
    pub check_period: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Cache coherence behaviour on mutation
    pub consistency: ConsistencyPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_FILE` - Collection file (default: ./large-file.json)
    /// - `DEFAULT_TTL` - Cache-wide default TTL in seconds (default: 100)
    /// - `CACHE_TTL` - TTL for cached responses in seconds (default: 600)
    /// - `CHECK_PERIOD` - Expiry sweep interval in seconds (default: 120)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `CACHE_CONSISTENCY` - `own-key` or `path-prefix` (default: path-prefix)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            data_file: env::var("DATA_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            response_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.response_ttl),
            check_period: parse_var::<u64>("CHECK_PERIOD")
                .filter(|p| *p > 0)
                .unwrap_or(defaults.check_period),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            consistency: parse_var("CACHE_CONSISTENCY").unwrap_or(defaults.consistency),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./large-file.json"),
            default_ttl: 100,
            response_ttl: 600,
            check_period: 120,
            server_port: 3001,
            consistency: ConsistencyPolicy::PathPrefix,
        }
    }
}
