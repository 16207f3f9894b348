use anyhow::Result;

use vocabook_lib::vocab::topic_summaries;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summaries = topic_summaries(app.store.topics());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Plain => {
            if summaries.is_empty() {
                println!("No topics yet. Create one with `vocabook-cli topic new <name>`.");
                return Ok(());
            }
            for summary in &summaries {
                println!("{}", terminal::render_topic_line(summary, use_color));
            }
        }
    }

    Ok(())
}
