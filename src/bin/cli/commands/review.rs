//! Interactive review session over stdin

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use vocabook_lib::remote::DocumentStore;
use vocabook_lib::vocab::{DisplayMode, FlushOutcome, TopicStore, TopicView, WordId};

use crate::app::App;
use crate::commands::is_yes;
use crate::commands::words::print_not_found;
use crate::render::terminal::{self, Color};

const HELP: &str = "\
Commands (N is the card number):
  +N / -N   add or take back a correct answer
  c N       tick the checkbox (ticking counts +1)
  r N       reveal the card
  y N       reveal the synonym only
  m         switch between hiding Russian and hiding English
  s         save progress
  l         show the cards again
  q         quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCommand {
    Increment(usize),
    Decrement(usize),
    Check(usize),
    Reveal(usize),
    RevealSynonym(usize),
    FlipMode,
    Save,
    List,
    Help,
    Quit,
}

fn card_number(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Not a card number: '{}'", raw.trim())),
    }
}

pub fn parse_command(line: &str) -> Result<ReviewCommand, String> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('+') {
        return card_number(rest).map(ReviewCommand::Increment);
    }
    if let Some(rest) = line.strip_prefix('-') {
        return card_number(rest).map(ReviewCommand::Decrement);
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let argument = parts.next();

    let with_number = |make: fn(usize) -> ReviewCommand| match argument {
        Some(raw) => card_number(raw).map(make),
        None => Err(format!("'{}' needs a card number", command)),
    };

    match command {
        "c" => with_number(ReviewCommand::Check),
        "r" => with_number(ReviewCommand::Reveal),
        "y" => with_number(ReviewCommand::RevealSynonym),
        "m" => Ok(ReviewCommand::FlipMode),
        "s" => Ok(ReviewCommand::Save),
        "l" => Ok(ReviewCommand::List),
        "?" | "h" | "help" => Ok(ReviewCommand::Help),
        "q" | "quit" | "exit" => Ok(ReviewCommand::Quit),
        "" => Err("Type ? for help".to_string()),
        other => Err(format!("Unknown command '{}'. Type ? for help", other)),
    }
}

fn print_cards<S: DocumentStore>(view: &TopicView, store: &TopicStore<S>, use_color: bool) {
    let (Some(topic), Some(cards)) = (view.topic(store), view.cards(store)) else {
        return;
    };

    let hidden = match view.mask().mode() {
        DisplayMode::English => "Russian hidden",
        DisplayMode::Russian => "English hidden",
    };
    println!(
        "{}  {}",
        terminal::paint(&topic.name, Color::BOLD, use_color),
        terminal::paint(hidden, Color::DIM, use_color)
    );
    if cards.is_empty() {
        println!("No words yet.");
    }
    for (i, card) in cards.iter().enumerate() {
        for line in terminal::render_card(i + 1, card, use_color) {
            println!("{}", line);
        }
    }
}

/// Word behind a 1-based card number
fn word_at<S: DocumentStore>(view: &TopicView, store: &TopicStore<S>, number: usize) -> Option<WordId> {
    view.cards(store)?.get(number - 1).map(|card| card.word.id)
}

pub async fn run(app: &mut App, query: &str, mode: Option<DisplayMode>, use_color: bool) -> Result<()> {
    let Some(topic_id) = app.resolve_topic(query)? else {
        print_not_found(query, use_color);
        return Ok(());
    };

    let mut view = TopicView::new(topic_id, mode.unwrap_or(app.config.display_mode));
    print_cards(&view, &app.store, use_color);
    println!("{}", terminal::paint("Type ? for help.", Color::DIM, use_color));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let target = match command {
            ReviewCommand::Increment(n)
            | ReviewCommand::Decrement(n)
            | ReviewCommand::Check(n)
            | ReviewCommand::Reveal(n)
            | ReviewCommand::RevealSynonym(n) => match word_at(&view, &app.store, n) {
                Some(word_id) => Some(word_id),
                None => {
                    println!("No card number {}", n);
                    continue;
                }
            },
            _ => None,
        };

        let result = match (command, target) {
            (ReviewCommand::Increment(_), Some(id)) => view
                .increment(&app.store, id)
                .map(|pending| println!("+1 ({} unsaved)", pending)),
            (ReviewCommand::Decrement(_), Some(id)) => view
                .decrement(&app.store, id)
                .map(|pending| println!("-1 ({} unsaved)", pending)),
            (ReviewCommand::Check(_), Some(id)) => view.check(&app.store, id).map(|checked| {
                if checked {
                    println!("Marked done. Progress is saved when you press s.");
                } else {
                    println!("Unmarked.");
                }
            }),
            (ReviewCommand::Reveal(_), Some(id)) => {
                view.reveal(&app.store, id).map(|_| print_cards(&view, &app.store, use_color))
            }
            (ReviewCommand::RevealSynonym(_), Some(id)) => {
                view.reveal_synonym(&app.store, id).map(|_| print_cards(&view, &app.store, use_color))
            }
            (ReviewCommand::FlipMode, _) => {
                view.mask_mut().flip();
                print_cards(&view, &app.store, use_color);
                Ok(())
            }
            (ReviewCommand::Save, _) => view.flush(&mut app.store).await.map(|outcome| match outcome {
                FlushOutcome::NothingToSave => println!("Nothing to save."),
                FlushOutcome::Saved { words } => println!("Progress saved for {} words.", words),
            }),
            (ReviewCommand::List, _) => {
                print_cards(&view, &app.store, use_color);
                Ok(())
            }
            (ReviewCommand::Help, _) => {
                println!("{}", HELP);
                Ok(())
            }
            (ReviewCommand::Quit, _) => {
                if view.progress().has_pending() {
                    print!("Unsaved progress will be lost. Quit anyway? [y/N] ");
                    std::io::stdout().flush()?;
                    let answer = lines.next_line().await?.unwrap_or_default();
                    if !is_yes(&answer) {
                        continue;
                    }
                }
                break;
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            println!("{}", terminal::paint(&e.to_string(), Color::RED, use_color));
        }
    }

    let dropped = view.leave();
    if dropped > 0 {
        println!("Discarded unsaved progress for {} words.", dropped);
    }
    Ok(())
}
