//! JSON file store
//!
//! Keeps the collection in a single pretty-printed JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use super::{to_pretty, Document, DocumentStore, StoreError};

/// Collection persisted as one JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Ensure Exists ==
    /// Creates the file with an empty collection if it is missing, along
    /// with any missing parent directories.
    ///
    /// Returns true when the file had to be created.
    pub async fn ensure_exists(&self) -> Result<bool, StoreError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, to_pretty(&[])?).await?;
        info!("Created empty collection at {}", self.path.display());
        Ok(true)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read_raw(&self) -> Result<String, StoreError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    async fn write(&self, docs: &[Document]) -> Result<(), StoreError> {
        let contents = to_pretty(docs)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}
