//! Response DTOs for the collection API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::store::Document;

/// Response body for POST /api/data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub message: String,
    /// The document as received
    pub new_data: Document,
}

impl CreateResponse {
    pub fn new(new_data: Document) -> Self {
        Self {
            message: "Data added and cache updated".to_string(),
            new_data,
        }
    }
}

/// Response body for PUT /api/data/:id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: String,
    /// The partial document that was merged
    pub updated_data: Document,
}

impl UpdateResponse {
    pub fn new(updated_data: Document) -> Self {
        Self {
            message: "Data updated and cache refreshed".to_string(),
            updated_data,
        }
    }
}

/// Response body for DELETE /api/data/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn new() -> Self {
        Self {
            message: "Data deleted and cache updated".to_string(),
        }
    }
}

impl Default for DeleteResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for POST /api/update-data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub message: String,
    /// The collection now held in the cache
    pub updated_data: Value,
}

impl RefreshResponse {
    pub fn new(updated_data: Value) -> Self {
        Self {
            message: "Cache updated with new data".to_string(),
            updated_data,
        }
    }
}

/// Response body for GET /api/cache-stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped after their TTL elapsed
    pub expired: u64,
    /// Entries currently held
    pub keys: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            keys: stats.keys,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
