mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vocabook_lib::vocab::{DisplayMode, WordFields, WordId};

#[derive(Parser)]
#[command(name = "vocabook-cli", about = "Vocabulary topics and flashcard review", version)]
struct Cli {
    /// Path to a config file (default: <config dir>/vocabook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List topics, most recently updated first
    Topics,

    /// Create, rename or delete a topic
    #[command(subcommand)]
    Topic(TopicCommand),

    /// Show the words of a topic, newest first
    Words {
        /// Topic ID or name (case-insensitive prefix match)
        topic: String,
        /// Which side stays visible: english or russian
        #[arg(long)]
        mode: Option<DisplayMode>,
        /// Show every card uncovered
        #[arg(long)]
        reveal: bool,
    },

    /// Add, edit or delete a word
    #[command(subcommand)]
    Word(WordCommand),

    /// Review a topic interactively and save progress
    Review {
        /// Topic ID or name
        topic: String,
        /// Which side stays visible: english or russian
        #[arg(long)]
        mode: Option<DisplayMode>,
    },
}

#[derive(Subcommand)]
enum TopicCommand {
    /// Create a topic
    New {
        /// Topic name
        name: String,
    },

    /// Rename a topic
    Rename {
        /// Topic ID or name
        topic: String,
        /// New name
        name: String,
    },

    /// Delete a topic and all of its words
    Rm {
        /// Topic ID or name
        topic: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WordCommand {
    /// Add a word to a topic
    Add {
        /// Topic ID or name
        topic: String,
        /// English word
        #[arg(long)]
        eng: String,
        /// Russian translation
        #[arg(long)]
        ru: String,
        /// Example sentence
        #[arg(long)]
        example: Option<String>,
        /// Synonym
        #[arg(long)]
        synonym: Option<String>,
    },

    /// Edit a word; omitted fields keep their value, "" clears example/synonym
    Edit {
        /// Topic ID or name
        topic: String,
        /// Word ID
        word: WordId,
        #[arg(long)]
        eng: Option<String>,
        #[arg(long)]
        ru: Option<String>,
        #[arg(long)]
        example: Option<String>,
        #[arg(long)]
        synonym: Option<String>,
    },

    /// Delete a word
    Rm {
        /// Topic ID or name
        topic: String,
        /// Word ID
        word: WordId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.config.as_deref()).await?;

    match cli.command {
        Command::Topics => {
            commands::topics::run(&app, &cli.format, use_color)?;
        }
        Command::Topic(subcmd) => match subcmd {
            TopicCommand::New { name } => {
                commands::topic::run_new(&mut app, &name, &cli.format).await?;
            }
            TopicCommand::Rename { topic, name } => {
                commands::topic::run_rename(&mut app, &topic, &name, &cli.format).await?;
            }
            TopicCommand::Rm { topic, yes } => {
                commands::topic::run_delete(&mut app, &topic, yes, &cli.format).await?;
            }
        },
        Command::Words { topic, mode, reveal } => {
            let mode = mode.unwrap_or(app.config.display_mode);
            commands::words::run(&app, &topic, mode, reveal, &cli.format, use_color)?;
        }
        Command::Word(subcmd) => match subcmd {
            WordCommand::Add { topic, eng, ru, example, synonym } => {
                let fields = WordFields { eng, ru, example, synonym };
                commands::word::run_add(&mut app, &topic, fields, &cli.format).await?;
            }
            WordCommand::Edit { topic, word, eng, ru, example, synonym } => {
                let edit = commands::word::WordEdit { eng, ru, example, synonym };
                commands::word::run_edit(&mut app, &topic, word, edit, &cli.format).await?;
            }
            WordCommand::Rm { topic, word, yes } => {
                commands::word::run_delete(&mut app, &topic, word, yes, &cli.format).await?;
            }
        },
        Command::Review { topic, mode } => {
            commands::review::run(&mut app, &topic, mode, use_color).await?;
        }
    }

    Ok(())
}
