//! In-memory mirror of the topic document
//!
//! Every mutation builds a complete candidate collection, hands it to the
//! document backend and adopts it only after the backend confirms the write.
//! A failed write leaves the in-memory collection exactly as it was.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::clock::{Clock, SystemClock};
use super::ids::IdGenerator;
use super::models::*;
use crate::remote::{DocumentError, DocumentStore};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(TopicId),

    #[error("Word {word_id} not found in topic {topic_id}")]
    WordNotFound { topic_id: TopicId, word_id: WordId },

    #[error("Unable to save changes: {0}")]
    Persistence(#[source] DocumentError),

    #[error("Unable to load topics: {0}")]
    Load(#[source] DocumentError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub struct TopicStore<S> {
    backend: S,
    topics: Collection,
    loaded: bool,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
}

impl<S: DocumentStore> TopicStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    pub fn with_clock(backend: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            topics: Vec::new(),
            loaded: false,
            clock,
            ids: IdGenerator::new(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Whether a load has succeeded at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All topics in document order
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, topic_id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// Fetch the full collection and replace the in-memory state with it
    pub async fn load(&mut self) -> Result<&[Topic]> {
        match self.backend.fetch_all().await {
            Ok(topics) => {
                log::info!("Loaded {} topics", topics.len());
                self.topics = topics;
                self.loaded = true;
                Ok(&self.topics)
            }
            Err(e) => {
                log::warn!("Failed to load topics: {}", e);
                Err(StoreError::Load(e))
            }
        }
    }

    // ==================== Topic Operations ====================

    /// Create an empty topic
    pub async fn create_topic(&mut self, name: &str) -> Result<Topic> {
        let name = validate_name(name)?;
        let now = self.clock.now();
        let topics = &self.topics;
        let id = self.ids.next(now, |id| topics.iter().any(|t| t.id == id));

        let topic = Topic::new(id, name, now);
        let mut candidate = self.topics.clone();
        candidate.push(topic.clone());

        self.commit(candidate).await?;
        log::info!("Created topic {} ({})", topic.id, topic.name);
        Ok(topic)
    }

    /// Rename a topic
    pub async fn update_topic(&mut self, topic_id: TopicId, name: &str) -> Result<Topic> {
        let name = validate_name(name)?;
        let now = self.clock.now();

        let (candidate, topic) = self.candidate_with(topic_id, |topic| {
            topic.name = name;
            topic.touch(now);
            Ok(topic.clone())
        })?;

        self.commit(candidate).await?;
        log::info!("Renamed topic {} to {}", topic.id, topic.name);
        Ok(topic)
    }

    /// Delete a topic together with all of its words.
    ///
    /// Callers must obtain explicit confirmation from the user first.
    pub async fn delete_topic(&mut self, topic_id: TopicId) -> Result<Topic> {
        let pos = self
            .topics
            .iter()
            .position(|t| t.id == topic_id)
            .ok_or(StoreError::TopicNotFound(topic_id))?;

        let mut candidate = self.topics.clone();
        let removed = candidate.remove(pos);

        self.commit(candidate).await?;
        log::info!("Deleted topic {} with {} words", removed.id, removed.words.len());
        Ok(removed)
    }

    // ==================== Word Operations ====================

    /// Add a word to a topic
    pub async fn create_word(&mut self, topic_id: TopicId, fields: WordFields) -> Result<Word> {
        let fields = fields.normalized().map_err(StoreError::Validation)?;
        let now = self.clock.now();
        let ids = &mut self.ids;

        let (candidate, word) = candidate_from(&self.topics, topic_id, |topic| {
            let id = ids.next(now, |id| topic.words.iter().any(|w| w.id == id));
            let word = Word::new(id, fields, now);
            topic.words.push(word.clone());
            topic.touch(now);
            Ok(word)
        })?;

        self.commit(candidate).await?;
        log::info!("Added word {} to topic {}", word.id, topic_id);
        Ok(word)
    }

    /// Replace a word's editable fields
    pub async fn update_word(&mut self, topic_id: TopicId, word_id: WordId, fields: WordFields) -> Result<Word> {
        let fields = fields.normalized().map_err(StoreError::Validation)?;
        let now = self.clock.now();

        let (candidate, word) = self.candidate_with(topic_id, |topic| {
            let word = topic
                .words
                .iter_mut()
                .find(|w| w.id == word_id)
                .ok_or(StoreError::WordNotFound { topic_id, word_id })?;
            word.apply(fields);
            let word = word.clone();
            topic.touch(now);
            Ok(word)
        })?;

        self.commit(candidate).await?;
        log::info!("Updated word {} in topic {}", word_id, topic_id);
        Ok(word)
    }

    /// Remove a word from a topic
    pub async fn delete_word(&mut self, topic_id: TopicId, word_id: WordId) -> Result<Word> {
        let now = self.clock.now();

        let (candidate, removed) = self.candidate_with(topic_id, |topic| {
            let pos = topic
                .words
                .iter()
                .position(|w| w.id == word_id)
                .ok_or(StoreError::WordNotFound { topic_id, word_id })?;
            let removed = topic.words.remove(pos);
            topic.touch(now);
            Ok(removed)
        })?;

        self.commit(candidate).await?;
        log::info!("Deleted word {} from topic {}", word_id, topic_id);
        Ok(removed)
    }

    // ==================== Progress ====================

    /// Add accumulated correct answers to the topic's words.
    ///
    /// Deltas for words no longer in the topic are ignored. Returns the number
    /// of words whose count changed; when that is zero nothing is written and
    /// the topic keeps its `last_updated`.
    pub async fn flush_progress(&mut self, topic_id: TopicId, deltas: &HashMap<WordId, u32>) -> Result<usize> {
        let now = self.clock.now();

        let (candidate, changed) = self.candidate_with(topic_id, |topic| {
            let mut changed = 0;
            for word in topic.words.iter_mut() {
                match deltas.get(&word.id) {
                    Some(&delta) if delta > 0 => {
                        word.correct_count = word.correct_count.saturating_add(delta);
                        changed += 1;
                    }
                    _ => {}
                }
            }
            topic.touch(now);
            Ok(changed)
        })?;

        if changed < deltas.len() {
            log::debug!(
                "Ignoring {} pending counts for words missing from topic {}",
                deltas.len() - changed,
                topic_id
            );
        }
        if changed == 0 {
            return Ok(0);
        }

        self.commit(candidate).await?;
        log::info!("Saved progress for {} words in topic {}", changed, topic_id);
        Ok(changed)
    }

    // ==================== Internals ====================

    fn candidate_with<T>(
        &self,
        topic_id: TopicId,
        edit: impl FnOnce(&mut Topic) -> Result<T>,
    ) -> Result<(Collection, T)> {
        candidate_from(&self.topics, topic_id, edit)
    }

    /// Persist `candidate` and adopt it only if the backend accepted it
    async fn commit(&mut self, candidate: Collection) -> Result<()> {
        match self.backend.replace_all(&candidate).await {
            Ok(()) => {
                log::debug!("Persisted collection of {} topics", candidate.len());
                self.topics = candidate;
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to save topics: {}", e);
                Err(StoreError::Persistence(e))
            }
        }
    }
}

/// Clone `topics` and apply `edit` to the topic with `topic_id` inside the clone
fn candidate_from<T>(
    topics: &[Topic],
    topic_id: TopicId,
    edit: impl FnOnce(&mut Topic) -> Result<T>,
) -> Result<(Collection, T)> {
    let mut candidate = topics.to_vec();
    let topic = candidate
        .iter_mut()
        .find(|t| t.id == topic_id)
        .ok_or(StoreError::TopicNotFound(topic_id))?;
    let value = edit(topic)?;
    Ok((candidate, value))
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("Topic name is required".to_string()));
    }
    Ok(name.to_string())
}
