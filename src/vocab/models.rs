//! Data models for vocabulary topics and words

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TopicId = i64;
pub type WordId = i64;

/// The whole persisted document: every topic with its words
pub type Collection = Vec<Topic>;

/// A single vocabulary entry, owned by exactly one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    pub eng: String,
    pub ru: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
    #[serde(default)]
    pub correct_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Word {
    pub fn new(id: WordId, fields: WordFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            eng: fields.eng,
            ru: fields.ru,
            example: fields.example,
            synonym: fields.synonym,
            correct_count: 0,
            created_at,
        }
    }

    /// Replace the editable text fields, keeping identity, creation time and progress
    pub fn apply(&mut self, fields: WordFields) {
        self.eng = fields.eng;
        self.ru = fields.ru;
        self.example = fields.example;
        self.synonym = fields.synonym;
    }
}

/// The user-editable part of a word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFields {
    pub eng: String,
    pub ru: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
}

impl WordFields {
    pub fn new(eng: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            eng: eng.into(),
            ru: ru.into(),
            example: None,
            synonym: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonym = Some(synonym.into());
        self
    }

    /// Trim every field and turn blank optional fields into `None`.
    ///
    /// Returns an error message naming the first required field that is blank.
    pub fn normalized(self) -> Result<Self, String> {
        let eng = self.eng.trim().to_string();
        let ru = self.ru.trim().to_string();
        if eng.is_empty() {
            return Err("English word is required".to_string());
        }
        if ru.is_empty() {
            return Err("Russian translation is required".to_string());
        }

        Ok(Self {
            eng,
            ru,
            example: non_blank(self.example),
            synonym: non_blank(self.synonym),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A named group of words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Topic {
    pub fn new(id: TopicId, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at: now,
            last_updated: now,
            words: Vec::new(),
        }
    }

    pub fn word(&self, word_id: WordId) -> Option<&Word> {
        self.words.iter().find(|w| w.id == word_id)
    }

    /// Mark the topic as modified. Never moves `last_updated` behind `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now.max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_json_uses_camel_case_and_skips_missing_optionals() {
        let created = "2024-03-01T10:00:00.000Z".parse::<DateTime<Utc>>().unwrap();
        let word = Word::new(7, WordFields::new("drop off", "доставить"), created);

        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json["correctCount"], 0);
        assert_eq!(json["eng"], "drop off");
        assert!(json.get("example").is_none());
        assert!(json.get("synonym").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_parse_document_written_by_browser_client() {
        let raw = r#"[{
            "id": 1700000000000,
            "name": "Phrasal Verbs",
            "createdAt": "2024-01-05T09:30:00.000Z",
            "lastUpdated": "2024-01-06T11:00:00.000Z",
            "words": [{
                "id": 1700000000500,
                "eng": "give up",
                "ru": "сдаться",
                "example": "Never give up.",
                "correctCount": 4,
                "createdAt": "2024-01-05T09:31:00.000Z"
            }]
        }]"#;

        let topics: Collection = serde_json::from_str(raw).unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].words[0].correct_count, 4);
        assert_eq!(topics[0].words[0].example.as_deref(), Some("Never give up."));
        assert_eq!(topics[0].words[0].synonym, None);
    }

    #[test]
    fn test_normalized_fields() {
        let fields = WordFields::new("  look up ", "искать")
            .with_example("   ")
            .with_synonym(" search ");
        let fields = fields.normalized().unwrap();
        assert_eq!(fields.eng, "look up");
        assert_eq!(fields.example, None);
        assert_eq!(fields.synonym.as_deref(), Some("search"));

        assert!(WordFields::new("", "ру").normalized().is_err());
        assert!(WordFields::new("en", " ").normalized().is_err());
    }

    #[test]
    fn test_apply_keeps_identity_and_progress() {
        let created = Utc::now();
        let mut word = Word::new(3, WordFields::new("a", "б"), created);
        word.correct_count = 5;

        word.apply(WordFields::new("c", "д").with_example("ex"));
        assert_eq!(word.id, 3);
        assert_eq!(word.correct_count, 5);
        assert_eq!(word.created_at, created);
        assert_eq!(word.eng, "c");
        assert_eq!(word.example.as_deref(), Some("ex"));
    }
}
