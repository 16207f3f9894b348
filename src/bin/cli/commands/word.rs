use anyhow::{bail, Context, Result};

use vocabook_lib::vocab::{Word, WordFields, WordId};

use crate::app::App;
use crate::commands::confirm;
use crate::OutputFormat;

fn print_word(word: &Word, message: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(word)?),
        OutputFormat::Plain => {
            println!("{} {} = {}", message, word.eng, word.ru);
            println!("  ID: {}", word.id);
        }
    }
    Ok(())
}

pub async fn run_add(app: &mut App, query: &str, fields: WordFields, format: &OutputFormat) -> Result<()> {
    let topic_id = app.require_topic(query)?;
    let word = app
        .store
        .create_word(topic_id, fields)
        .await
        .context("Unable to add word")?;
    print_word(&word, "Word added:", format)
}

/// Edited fields; anything left as `None` keeps its current value
pub struct WordEdit {
    pub eng: Option<String>,
    pub ru: Option<String>,
    pub example: Option<String>,
    pub synonym: Option<String>,
}

impl WordEdit {
    /// Merge over the current word. An empty string clears an optional field.
    fn merged(self, current: &Word) -> WordFields {
        WordFields {
            eng: self.eng.unwrap_or_else(|| current.eng.clone()),
            ru: self.ru.unwrap_or_else(|| current.ru.clone()),
            example: self.example.or_else(|| current.example.clone()),
            synonym: self.synonym.or_else(|| current.synonym.clone()),
        }
    }
}

pub async fn run_edit(
    app: &mut App,
    query: &str,
    word_id: WordId,
    edit: WordEdit,
    format: &OutputFormat,
) -> Result<()> {
    let topic_id = app.require_topic(query)?;
    let Some(current) = app.store.topic(topic_id).and_then(|t| t.word(word_id)) else {
        bail!("No word with ID {} in this topic", word_id);
    };
    let fields = edit.merged(current);

    let word = app
        .store
        .update_word(topic_id, word_id, fields)
        .await
        .context("Unable to update word")?;
    print_word(&word, "Word updated:", format)
}

pub async fn run_delete(
    app: &mut App,
    query: &str,
    word_id: WordId,
    yes: bool,
    format: &OutputFormat,
) -> Result<()> {
    let topic_id = app.require_topic(query)?;
    let Some(word) = app.store.topic(topic_id).and_then(|t| t.word(word_id)) else {
        bail!("No word with ID {} in this topic", word_id);
    };

    if !yes && !confirm(&format!("Delete word \"{}\"?", word.eng))? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let removed = app
        .store
        .delete_word(topic_id, word_id)
        .await
        .context("Unable to delete word")?;
    print_word(&removed, "Word deleted:", format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_edit_merges_over_current() {
        let current = Word::new(
            1,
            WordFields::new("look up", "искать").with_example("Look it up."),
            Utc::now(),
        );
        let edit = WordEdit {
            eng: None,
            ru: Some("посмотреть".to_string()),
            example: Some(String::new()),
            synonym: Some("search".to_string()),
        };

        let fields = edit.merged(&current);
        assert_eq!(fields.eng, "look up");
        assert_eq!(fields.ru, "посмотреть");
        // Cleared here, dropped entirely by normalization in the store
        assert_eq!(fields.example.as_deref(), Some(""));
        assert_eq!(fields.synonym.as_deref(), Some("search"));
    }
}
