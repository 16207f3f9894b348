//! Unsaved correct-answer counts for one review session
//!
//! Counts accumulate locally and reach the document only through [`PendingProgress::flush`].
//! Entries are always positive: decrementing to zero removes the entry, and
//! decrementing an absent entry does nothing, so saved counts never go down.

use std::collections::{HashMap, HashSet};

use super::models::{TopicId, Word, WordId};
use super::store::{Result, TopicStore};
use crate::remote::DocumentStore;

/// What a flush did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing pending for a word still in the topic; no write was attempted
    NothingToSave,
    /// Pending counts were written for this many words
    Saved { words: usize },
}

#[derive(Debug, Default, Clone)]
pub struct PendingProgress {
    deltas: HashMap<WordId, u32>,
    completed: HashSet<WordId>,
}

impl PendingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one correct answer. Returns the new pending count.
    pub fn increment(&mut self, word_id: WordId) -> u32 {
        let delta = self.deltas.entry(word_id).or_insert(0);
        *delta += 1;
        *delta
    }

    /// Take back one pending correct answer. Returns the new pending count.
    pub fn decrement(&mut self, word_id: WordId) -> u32 {
        let Some(delta) = self.deltas.get_mut(&word_id) else {
            return 0;
        };
        *delta -= 1;
        let remaining = *delta;
        if remaining == 0 {
            self.deltas.remove(&word_id);
        }
        remaining
    }

    pub fn pending(&self, word_id: WordId) -> u32 {
        self.deltas.get(&word_id).copied().unwrap_or(0)
    }

    pub fn deltas(&self) -> &HashMap<WordId, u32> {
        &self.deltas
    }

    pub fn has_pending(&self) -> bool {
        !self.deltas.is_empty()
    }

    /// Flip the session-only completed mark. Returns whether the word is now completed.
    pub fn toggle_completed(&mut self, word_id: WordId) -> bool {
        if self.completed.remove(&word_id) {
            false
        } else {
            self.completed.insert(word_id);
            true
        }
    }

    pub fn is_completed(&self, word_id: WordId) -> bool {
        self.completed.contains(&word_id)
    }

    /// Card checkbox: checking an unchecked word also counts one correct
    /// answer, unchecking only clears the mark.
    pub fn check(&mut self, word_id: WordId) -> bool {
        if !self.is_completed(word_id) {
            self.increment(word_id);
        }
        self.toggle_completed(word_id)
    }

    /// Saved count plus whatever is pending for this word
    pub fn effective_count(&self, word: &Word) -> u32 {
        word.correct_count.saturating_add(self.pending(word.id))
    }

    /// Write all pending counts for `topic_id` in one save.
    ///
    /// Local state is cleared only when the save succeeds; on failure it is
    /// kept so the user can try again.
    pub async fn flush<S: DocumentStore>(
        &mut self,
        store: &mut TopicStore<S>,
        topic_id: TopicId,
    ) -> Result<FlushOutcome> {
        if self.deltas.is_empty() {
            return Ok(FlushOutcome::NothingToSave);
        }

        let words = store.flush_progress(topic_id, &self.deltas).await?;
        self.deltas.clear();
        self.completed.clear();
        if words == 0 {
            return Ok(FlushOutcome::NothingToSave);
        }
        Ok(FlushOutcome::Saved { words })
    }

    /// Drop everything without saving. Returns how many words had pending counts.
    pub fn discard(&mut self) -> usize {
        let dropped = self.deltas.len();
        if dropped > 0 {
            log::warn!("Discarding unsaved progress for {} words", dropped);
        }
        self.deltas.clear();
        self.completed.clear();
        dropped
    }
}
