//! Vocabook: vocabulary topics kept in a single shared JSON document.

pub mod config;
pub mod remote;
pub mod vocab;

pub use config::{AppConfig, Backend, ConfigError};
pub use remote::{DocumentError, DocumentStore};
pub use vocab::{Collection, PendingProgress, StoreError, Topic, TopicStore, TopicView, Word, WordFields};
