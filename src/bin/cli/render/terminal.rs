use chrono::{DateTime, Local, Utc};
use vocabook_lib::vocab::{CardText, TopicSummary, WordCard};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const STRIKETHROUGH: &str = "\x1b[9m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

const MASK: &str = "░░░░░░";

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d.%m.%Y").to_string()
}

pub fn date_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string()
}

/// Card text, or a fixed-width block when it is still covered
pub fn card_text(text: CardText<'_>) -> String {
    if text.hidden {
        MASK.to_string()
    } else {
        text.text.to_string()
    }
}

/// One line per topic in the listing
pub fn render_topic_line(summary: &TopicSummary, use_color: bool) -> String {
    format!(
        "{} {}  {}  {}",
        paint(&format!("[{}]", summary.id), Color::GRAY, use_color),
        paint(&summary.name, Color::BOLD, use_color),
        vocabook_lib::vocab::word_count_label(summary.word_count),
        paint(
            &format!(
                "created {} · updated {}",
                date(summary.created_at),
                date_time(summary.last_updated)
            ),
            Color::DIM,
            use_color
        ),
    )
}

/// A word card, numbered by its position in the listing
pub fn render_card(index: usize, card: &WordCard<'_>, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let checkbox = if card.completed { "[x]" } else { "[ ]" };
    let checkbox = if card.completed {
        paint(checkbox, Color::GREEN, use_color)
    } else {
        checkbox.to_string()
    };

    lines.push(format!(
        "{:>3}. {} {} = {}",
        index,
        checkbox,
        paint(&card_text(card.face.eng), Color::BOLD, use_color),
        card_text(card.face.ru),
    ));

    if let Some(example) = card.face.example {
        lines.push(format!(
            "       {} {}",
            paint("Example:", Color::GRAY, use_color),
            card_text(example)
        ));
    }
    if let Some(synonym) = card.face.synonym {
        lines.push(format!(
            "       {} {}",
            paint("Synonym:", Color::GRAY, use_color),
            card_text(synonym)
        ));
    }

    let pending = if card.pending > 0 {
        paint(&format!(" (+{} unsaved)", card.pending), Color::YELLOW, use_color)
    } else {
        String::new()
    };
    lines.push(format!(
        "       {}  ✓ {}{}",
        paint(&date(card.word.created_at), Color::DIM, use_color),
        card.effective_count,
        pending
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_text_masks_hidden() {
        let shown = CardText { text: "cat", hidden: false };
        let hidden = CardText { text: "кошка", hidden: true };
        assert_eq!(card_text(shown), "cat");
        assert_eq!(card_text(hidden), MASK);
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("x", Color::RED, false), "x");
        assert_eq!(paint("x", Color::RED, true), "\x1b[31mx\x1b[0m");
    }
}
