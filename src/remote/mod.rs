//! Backends for the topic document
//!
//! Every backend stores the whole collection as a single JSON array. There is
//! no partial update: a write always replaces the entire document.

pub mod file;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::vocab::Collection;

pub use file::FileDocumentStore;
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Whole-document persistence
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the full collection
    async fn fetch_all(&self) -> Result<Collection, DocumentError>;

    /// Overwrite the remote document with `topics`
    async fn replace_all(&self, topics: &Collection) -> Result<(), DocumentError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Box<T> {
    async fn fetch_all(&self) -> Result<Collection, DocumentError> {
        (**self).fetch_all().await
    }

    async fn replace_all(&self, topics: &Collection) -> Result<(), DocumentError> {
        (**self).replace_all(topics).await
    }
}
