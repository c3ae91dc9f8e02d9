//! In-memory store
//!
//! Holds the persisted text in memory and counts reads and writes. Failures
//! can be switched on to exercise the error paths of the handlers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{to_pretty, Document, DocumentStore, StoreError};

#[derive(Debug)]
pub struct MemoryStore {
    contents: Mutex<String>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates a store whose persisted text is exactly `raw`.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(raw.into()),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Creates a store holding `docs` serialized as a file would be.
    pub fn with_documents(docs: &[Document]) -> Result<Self, StoreError> {
        Ok(Self::new(to_pretty(docs)?))
    }

    /// Current persisted text.
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    /// Number of `read_raw` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        // A poisoned guard still holds a complete string
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("[]")
    }
}

fn injected(op: &str) -> StoreError {
    StoreError::Io(std::io::Error::other(format!("injected {op} failure")))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_raw(&self) -> Result<String, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("read"));
        }
        Ok(self.contents())
    }

    async fn write(&self, docs: &[Document]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("write"));
        }
        let contents = to_pretty(docs)?;
        *self.lock() = contents;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
