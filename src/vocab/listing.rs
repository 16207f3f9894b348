//! Presentation order and summaries. Nothing here is ever persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::{Topic, TopicId, Word};

/// Topics ordered by most recent modification first
pub fn sorted_topics(topics: &[Topic]) -> Vec<&Topic> {
    let mut sorted: Vec<&Topic> = topics.iter().collect();
    sorted.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    sorted
}

/// Words of a topic ordered newest first
pub fn sorted_words(topic: &Topic) -> Vec<&Word> {
    let mut sorted: Vec<&Word> = topic.words.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Russian noun form for a word count: 1 слово, 3 слова, 5 слов, 21 слово, 12 слов
pub fn word_count_label(count: usize) -> String {
    let form = match (count % 10, count % 100) {
        (_, 11..=14) => "слов",
        (1, _) => "слово",
        (2..=4, _) => "слова",
        _ => "слов",
    };
    format!("{} {}", count, form)
}

/// One row of the topic listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: TopicId,
    pub name: String,
    pub word_count: usize,
    pub total_correct: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl From<&Topic> for TopicSummary {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.clone(),
            word_count: topic.words.len(),
            total_correct: topic.words.iter().map(|w| u64::from(w.correct_count)).sum(),
            created_at: topic.created_at,
            last_updated: topic.last_updated,
        }
    }
}

/// Summaries in listing order
pub fn topic_summaries(topics: &[Topic]) -> Vec<TopicSummary> {
    sorted_topics(topics).into_iter().map(TopicSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::models::WordFields;
    use chrono::Duration;

    #[test]
    fn test_topics_sorted_by_last_updated_desc() {
        let now = Utc::now();
        let mut old = Topic::new(1, "Old".to_string(), now - Duration::days(2));
        let recent = Topic::new(2, "Recent".to_string(), now - Duration::days(1));
        old.touch(now);

        let topics = vec![recent, old];
        let order: Vec<_> = sorted_topics(&topics).iter().map(|t| t.id).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn test_words_sorted_newest_first() {
        let now = Utc::now();
        let mut topic = Topic::new(1, "T".to_string(), now);
        topic.words.push(Word::new(10, WordFields::new("a", "а"), now - Duration::hours(3)));
        topic.words.push(Word::new(11, WordFields::new("b", "б"), now));
        topic.words.push(Word::new(12, WordFields::new("c", "в"), now - Duration::hours(1)));

        let order: Vec<_> = sorted_words(&topic).iter().map(|w| w.id).collect();
        assert_eq!(order, vec![11, 12, 10]);
    }

    #[test]
    fn test_word_count_label() {
        assert_eq!(word_count_label(0), "0 слов");
        assert_eq!(word_count_label(1), "1 слово");
        assert_eq!(word_count_label(3), "3 слова");
        assert_eq!(word_count_label(5), "5 слов");
        assert_eq!(word_count_label(11), "11 слов");
        assert_eq!(word_count_label(14), "14 слов");
        assert_eq!(word_count_label(21), "21 слово");
        assert_eq!(word_count_label(102), "102 слова");
    }

    #[test]
    fn test_summary_totals() {
        let now = Utc::now();
        let mut topic = Topic::new(1, "T".to_string(), now);
        let mut word = Word::new(10, WordFields::new("a", "а"), now);
        word.correct_count = 4;
        topic.words.push(word);
        topic.words.push(Word::new(11, WordFields::new("b", "б"), now));

        let summary = TopicSummary::from(&topic);
        assert_eq!(summary.word_count, 2);
        assert_eq!(summary.total_correct, 4);
    }
}
