//! Cache Module
//!
//! Response cache with TTL expiration and request-derived keys.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::ResponseCache;
