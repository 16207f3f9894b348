use anyhow::Result;

use vocabook_lib::vocab::{word_count_label, CardSnapshot, DisplayMode, TopicView};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Print the "topic not found" screen
pub fn print_not_found(query: &str, use_color: bool) {
    println!("{}", terminal::paint("Topic not found", Color::BOLD, use_color));
    println!("Nothing matches '{}'. Run `vocabook-cli topics` to go back to the list.", query);
}

pub fn run(
    app: &App,
    query: &str,
    mode: DisplayMode,
    reveal_all: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let Some(topic_id) = app.resolve_topic(query)? else {
        print_not_found(query, use_color);
        return Ok(());
    };

    let mut view = TopicView::new(topic_id, mode);
    if reveal_all {
        if let Some(topic) = view.topic(&app.store) {
            let ids: Vec<_> = topic.words.iter().map(|w| w.id).collect();
            for id in ids {
                view.mask_mut().reveal(id);
            }
        }
    }

    let (Some(topic), Some(cards)) = (view.topic(&app.store), view.cards(&app.store)) else {
        print_not_found(query, use_color);
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id,
                "name": topic.name,
                "mode": mode,
                "words": cards.iter().map(CardSnapshot::from).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&topic.name, Color::BOLD, use_color));
            println!(
                "{}",
                terminal::paint(&word_count_label(topic.words.len()), Color::DIM, use_color)
            );
            println!();

            if cards.is_empty() {
                println!("No words yet. Add one with `vocabook-cli word add`.");
            }
            for (i, card) in cards.iter().enumerate() {
                for line in terminal::render_card(i + 1, card, use_color) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
