//! Vocabulary topics and review state
//!
//! This module provides:
//! - Topic and word models matching the shared JSON document
//! - The topic store with save-then-adopt mutations
//! - Pending correct-answer counts for a review session
//! - Display-mode masking for word cards

pub mod clock;
pub mod display;
pub mod ids;
pub mod listing;
pub mod models;
pub mod progress;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{CardFace, CardText, DisplayMode, ReviewMask};
pub use listing::{sorted_topics, sorted_words, topic_summaries, word_count_label, TopicSummary};
pub use models::*;
pub use progress::{FlushOutcome, PendingProgress};
pub use store::{StoreError, TopicStore};
pub use view::{CardSnapshot, TopicView, WordCard};
