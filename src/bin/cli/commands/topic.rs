use anyhow::{Context, Result};

use vocabook_lib::vocab::{word_count_label, Topic};

use crate::app::App;
use crate::commands::confirm;
use crate::OutputFormat;

fn print_topic(topic: &Topic, message: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id,
                "name": topic.name,
                "wordCount": topic.words.len(),
                "createdAt": topic.created_at,
                "lastUpdated": topic.last_updated,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} \"{}\"", message, topic.name);
            println!("  ID: {}", topic.id);
        }
    }
    Ok(())
}

pub async fn run_new(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let topic = app
        .store
        .create_topic(name)
        .await
        .context("Unable to create topic")?;
    print_topic(&topic, "Topic created:", format)
}

pub async fn run_rename(app: &mut App, query: &str, name: &str, format: &OutputFormat) -> Result<()> {
    let topic_id = app.require_topic(query)?;
    let topic = app
        .store
        .update_topic(topic_id, name)
        .await
        .context("Unable to update topic")?;
    print_topic(&topic, "Topic updated:", format)
}

pub async fn run_delete(app: &mut App, query: &str, yes: bool, format: &OutputFormat) -> Result<()> {
    let topic_id = app.require_topic(query)?;

    if !yes {
        let topic = app.store.topic(topic_id).context("Topic disappeared")?;
        let question = format!(
            "Delete topic \"{}\" and all {} in it?",
            topic.name,
            word_count_label(topic.words.len())
        );
        if !confirm(&question)? {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let removed = app
        .store
        .delete_topic(topic_id)
        .await
        .context("Unable to delete topic")?;
    print_topic(&removed, "Topic deleted:", format)
}
