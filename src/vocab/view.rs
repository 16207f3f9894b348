//! State scoped to one open topic: pending progress plus the review mask

use serde::Serialize;

use super::display::{CardFace, CardText, DisplayMode, ReviewMask};
use super::listing::sorted_words;
use super::models::{Topic, TopicId, Word, WordId};
use super::progress::{FlushOutcome, PendingProgress};
use super::store::{Result, StoreError, TopicStore};
use crate::remote::DocumentStore;

/// A word as the review screen shows it
#[derive(Debug, Clone)]
pub struct WordCard<'a> {
    pub word: &'a Word,
    pub effective_count: u32,
    pub pending: u32,
    pub completed: bool,
    pub face: CardFace<'a>,
}

/// Serializable snapshot of a card, with masked text left out
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub id: WordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eng: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
    pub correct_count: u32,
    pub pending: u32,
    pub completed: bool,
}

fn visible(text: CardText<'_>) -> Option<String> {
    (!text.hidden).then(|| text.text.to_string())
}

impl From<&WordCard<'_>> for CardSnapshot {
    fn from(card: &WordCard<'_>) -> Self {
        Self {
            id: card.word.id,
            eng: visible(card.face.eng),
            ru: visible(card.face.ru),
            example: card.face.example.and_then(visible),
            synonym: card.face.synonym.and_then(visible),
            correct_count: card.effective_count,
            pending: card.pending,
            completed: card.completed,
        }
    }
}

pub struct TopicView {
    topic_id: TopicId,
    progress: PendingProgress,
    mask: ReviewMask,
}

impl TopicView {
    pub fn new(topic_id: TopicId, mode: DisplayMode) -> Self {
        Self {
            topic_id,
            progress: PendingProgress::new(),
            mask: ReviewMask::new(mode),
        }
    }

    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    pub fn progress(&self) -> &PendingProgress {
        &self.progress
    }

    pub fn mask(&self) -> &ReviewMask {
        &self.mask
    }

    pub fn mask_mut(&mut self) -> &mut ReviewMask {
        &mut self.mask
    }

    /// The topic this view shows, or `None` when it no longer exists
    pub fn topic<'s, S: DocumentStore>(&self, store: &'s TopicStore<S>) -> Option<&'s Topic> {
        store.topic(self.topic_id)
    }

    /// Cards newest first, or `None` when the topic is missing
    pub fn cards<'s, S: DocumentStore>(&self, store: &'s TopicStore<S>) -> Option<Vec<WordCard<'s>>> {
        let topic = self.topic(store)?;
        let cards = sorted_words(topic)
            .into_iter()
            .map(|word| WordCard {
                word,
                effective_count: self.progress.effective_count(word),
                pending: self.progress.pending(word.id),
                completed: self.progress.is_completed(word.id),
                face: self.mask.card(word),
            })
            .collect();
        Some(cards)
    }

    pub fn increment<S: DocumentStore>(&mut self, store: &TopicStore<S>, word_id: WordId) -> Result<u32> {
        self.require_word(store, word_id)?;
        Ok(self.progress.increment(word_id))
    }

    pub fn decrement<S: DocumentStore>(&mut self, store: &TopicStore<S>, word_id: WordId) -> Result<u32> {
        self.require_word(store, word_id)?;
        Ok(self.progress.decrement(word_id))
    }

    pub fn check<S: DocumentStore>(&mut self, store: &TopicStore<S>, word_id: WordId) -> Result<bool> {
        self.require_word(store, word_id)?;
        Ok(self.progress.check(word_id))
    }

    pub fn reveal<S: DocumentStore>(&mut self, store: &TopicStore<S>, word_id: WordId) -> Result<()> {
        self.require_word(store, word_id)?;
        self.mask.reveal(word_id);
        Ok(())
    }

    pub fn reveal_synonym<S: DocumentStore>(&mut self, store: &TopicStore<S>, word_id: WordId) -> Result<()> {
        self.require_word(store, word_id)?;
        self.mask.reveal_synonym(word_id);
        Ok(())
    }

    pub async fn flush<S: DocumentStore>(&mut self, store: &mut TopicStore<S>) -> Result<FlushOutcome> {
        self.progress.flush(store, self.topic_id).await
    }

    /// Close the view, dropping unsaved progress. Returns how many words lost pending counts.
    pub fn leave(mut self) -> usize {
        self.progress.discard()
    }

    fn require_word<S: DocumentStore>(&self, store: &TopicStore<S>, word_id: WordId) -> Result<()> {
        let topic = self
            .topic(store)
            .ok_or(StoreError::TopicNotFound(self.topic_id))?;
        if topic.word(word_id).is_none() {
            return Err(StoreError::WordNotFound {
                topic_id: self.topic_id,
                word_id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryDocumentStore;
    use crate::vocab::clock::ManualClock;
    use crate::vocab::models::WordFields;
    use chrono::Utc;
    use std::sync::Arc;

    fn create_test_store() -> TopicStore<MemoryDocumentStore> {
        TopicStore::with_clock(MemoryDocumentStore::new(), Arc::new(ManualClock::new(Utc::now())))
    }

    #[test]
    fn test_missing_topic_is_not_found_state() {
        let store = create_test_store();
        let view = TopicView::new(404, DisplayMode::English);
        assert!(view.topic(&store).is_none());
        assert!(view.cards(&store).is_none());
    }

    #[tokio::test]
    async fn test_cards_reflect_pending_and_mask() {
        let mut store = create_test_store();
        let topic = store.create_topic("Animals").await.unwrap();
        let cat = store.create_word(topic.id, WordFields::new("cat", "кошка")).await.unwrap();
        let dog = store.create_word(topic.id, WordFields::new("dog", "собака")).await.unwrap();

        let mut view = TopicView::new(topic.id, DisplayMode::English);
        view.check(&store, cat.id).unwrap();
        view.reveal(&store, dog.id).unwrap();

        let cards = view.cards(&store).unwrap();
        assert_eq!(cards[0].word.id, dog.id);
        assert!(!cards[0].face.ru.hidden);
        assert_eq!(cards[1].effective_count, 1);
        assert!(cards[1].completed);
        assert!(cards[1].face.ru.hidden);

        let snapshot = CardSnapshot::from(&cards[1]);
        assert_eq!(snapshot.eng.as_deref(), Some("cat"));
        assert_eq!(snapshot.ru, None);
    }

    #[tokio::test]
    async fn test_unknown_word_is_rejected() {
        let mut store = create_test_store();
        let topic = store.create_topic("Animals").await.unwrap();

        let mut view = TopicView::new(topic.id, DisplayMode::Russian);
        assert!(matches!(
            view.increment(&store, 5),
            Err(StoreError::WordNotFound { word_id: 5, .. })
        ));
        assert!(!view.progress().has_pending());
    }

    #[tokio::test]
    async fn test_flush_then_leave() {
        let mut store = create_test_store();
        let topic = store.create_topic("Animals").await.unwrap();
        let cat = store.create_word(topic.id, WordFields::new("cat", "кошка")).await.unwrap();

        let mut view = TopicView::new(topic.id, DisplayMode::English);
        view.increment(&store, cat.id).unwrap();
        view.increment(&store, cat.id).unwrap();
        view.decrement(&store, cat.id).unwrap();
        assert_eq!(view.flush(&mut store).await.unwrap(), FlushOutcome::Saved { words: 1 });
        assert_eq!(store.topic(topic.id).unwrap().word(cat.id).unwrap().correct_count, 1);

        view.increment(&store, cat.id).unwrap();
        assert_eq!(view.leave(), 1);
        assert_eq!(store.topic(topic.id).unwrap().word(cat.id).unwrap().correct_count, 1);
    }
}
