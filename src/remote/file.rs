//! Local JSON file holding the topic document
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! document, so a crash mid-write never leaves a truncated collection behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{DocumentError, DocumentStore};
use crate::vocab::Collection;

pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn fetch_all(&self) -> Result<Collection, DocumentError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let topics: Collection = serde_json::from_str(&content)?;
        Ok(topics)
    }

    async fn replace_all(&self, topics: &Collection) -> Result<(), DocumentError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, serde_json::to_string_pretty(topics)?).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}
