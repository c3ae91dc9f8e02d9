//! Document Store Module
//!
//! The persisted collection behind the cache. A store reads and writes the
//! whole collection at once; each call is atomic only at that granularity.

mod document;
mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use document::{
    has_id, merge, parse_collection, parse_id, position_of, to_compact, to_pretty, Document,
};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

// == Store Error ==
/// Failures of the underlying document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored collection is not a JSON array of objects: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),
}

// == Document Store ==
/// Whole-collection persistence.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the stored collection exactly as persisted.
    async fn read_raw(&self) -> Result<String, StoreError>;

    /// Replaces the stored collection.
    async fn write(&self, docs: &[Document]) -> Result<(), StoreError>;

    /// Reads and parses the stored collection.
    async fn read(&self) -> Result<Vec<Document>, StoreError> {
        let raw = self.read_raw().await?;
        parse_collection(&raw)
    }
}
