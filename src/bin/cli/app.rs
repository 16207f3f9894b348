use std::path::Path;

use anyhow::{bail, Context, Result};

use vocabook_lib::remote::DocumentStore;
use vocabook_lib::vocab::{Topic, TopicId, TopicStore};
use vocabook_lib::AppConfig;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub store: TopicStore<Box<dyn DocumentStore>>,
}

impl App {
    /// Read configuration, open the document backend and load all topics
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("Failed to load configuration")?;
        let backend = config
            .open_backend()
            .context("Failed to open topic document")?;

        let mut store = TopicStore::new(backend);
        store.load().await.context("Unable to load topics")?;

        Ok(Self { config, store })
    }

    /// Find a topic by id, exact name or case-insensitive name prefix.
    ///
    /// Returns `None` when nothing matches; an ambiguous prefix is an error.
    pub fn resolve_topic(&self, query: &str) -> Result<Option<TopicId>> {
        find_topic(self.store.topics(), query)
    }

    /// Like `resolve_topic`, but a missing topic is an error
    pub fn require_topic(&self, query: &str) -> Result<TopicId> {
        match self.resolve_topic(query)? {
            Some(id) => Ok(id),
            None => bail!("No topic matching '{}'. Run `vocabook-cli topics` to list them.", query),
        }
    }
}

fn find_topic(topics: &[Topic], query: &str) -> Result<Option<TopicId>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    if let Ok(id) = query.parse::<TopicId>() {
        if topics.iter().any(|t| t.id == id) {
            return Ok(Some(id));
        }
    }

    let query_lower = query.to_lowercase();

    // Exact match first
    if let Some(topic) = topics.iter().find(|t| t.name.to_lowercase() == query_lower) {
        return Ok(Some(topic.id));
    }

    // Prefix match
    let matches: Vec<&Topic> = topics
        .iter()
        .filter(|t| t.name.to_lowercase().starts_with(&query_lower))
        .collect();

    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0].id)),
        _ => bail!(
            "Ambiguous topic '{}'. Matches:\n{}",
            query,
            matches
                .iter()
                .map(|t| format!("  - [{}] {}", t.id, t.name))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}
