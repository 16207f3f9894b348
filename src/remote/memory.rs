//! In-memory document backend with switchable failures, for tests and embedders

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DocumentError, DocumentStore};
use crate::vocab::Collection;

/// In-process document kept as serialized JSON, with switchable failures
#[derive(Debug)]
pub struct MemoryDocumentStore {
    document: Mutex<String>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            document: Mutex::new("[]".to_string()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Start from an existing collection
    pub fn with_topics(topics: &Collection) -> Result<Self, DocumentError> {
        let store = Self::new();
        *store.lock() = serde_json::to_string(topics)?;
        Ok(store)
    }

    /// Make every subsequent fetch fail until reset
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw JSON currently stored
    pub fn raw(&self) -> String {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch_all(&self) -> Result<Collection, DocumentError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DocumentError::Unavailable("reads are disabled".to_string()));
        }
        let document = self.lock();
        Ok(serde_json::from_str(&document)?)
    }

    async fn replace_all(&self, topics: &Collection) -> Result<(), DocumentError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DocumentError::Unavailable("writes are disabled".to_string()));
        }
        let serialized = serde_json::to_string(topics)?;
        *self.lock() = serialized;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
