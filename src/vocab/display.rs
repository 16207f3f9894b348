//! Which side of a word card is hidden during review
//!
//! Reveals are recorded against the current epoch. Changing the display mode
//! bumps the epoch, which re-masks every card without touching the reveal maps.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::models::{Word, WordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// English shown, Russian hidden until revealed
    #[default]
    English,
    /// Russian shown, English hidden until revealed
    Russian,
}

impl DisplayMode {
    pub fn flipped(self) -> Self {
        match self {
            Self::English => Self::Russian,
            Self::Russian => Self::English,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Russian => write!(f, "russian"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" | "eng" => Ok(Self::English),
            "russian" | "ru" => Ok(Self::Russian),
            other => Err(format!("Unknown display mode: {}", other)),
        }
    }
}

/// A piece of card text and whether it is currently covered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardText<'a> {
    pub text: &'a str,
    pub hidden: bool,
}

impl<'a> CardText<'a> {
    fn new(text: &'a str, hidden: bool) -> Self {
        Self { text, hidden }
    }
}

/// What a card shows right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFace<'a> {
    pub eng: CardText<'a>,
    pub ru: CardText<'a>,
    pub example: Option<CardText<'a>>,
    pub synonym: Option<CardText<'a>>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewMask {
    mode: DisplayMode,
    epoch: u64,
    revealed: HashMap<WordId, u64>,
    synonym_revealed: HashMap<WordId, u64>,
}

impl ReviewMask {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Switch mode. Every card is masked again if the mode actually changed.
    pub fn set_mode(&mut self, mode: DisplayMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.epoch += 1;
        true
    }

    pub fn flip(&mut self) -> DisplayMode {
        self.set_mode(self.mode.flipped());
        self.mode
    }

    /// Uncover the whole card
    pub fn reveal(&mut self, word_id: WordId) {
        self.revealed.insert(word_id, self.epoch);
    }

    /// Uncover only the synonym line
    pub fn reveal_synonym(&mut self, word_id: WordId) {
        self.synonym_revealed.insert(word_id, self.epoch);
    }

    pub fn is_revealed(&self, word_id: WordId) -> bool {
        self.revealed.get(&word_id) == Some(&self.epoch)
    }

    pub fn is_synonym_revealed(&self, word_id: WordId) -> bool {
        self.is_revealed(word_id) || self.synonym_revealed.get(&word_id) == Some(&self.epoch)
    }

    pub fn card<'a>(&self, word: &'a Word) -> CardFace<'a> {
        let revealed = self.is_revealed(word.id);
        CardFace {
            eng: CardText::new(&word.eng, self.mode == DisplayMode::Russian && !revealed),
            ru: CardText::new(&word.ru, self.mode == DisplayMode::English && !revealed),
            example: word.example.as_deref().map(|t| CardText::new(t, !revealed)),
            synonym: word
                .synonym
                .as_deref()
                .map(|t| CardText::new(t, !self.is_synonym_revealed(word.id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::models::WordFields;
    use chrono::Utc;

    fn word() -> Word {
        Word::new(
            1,
            WordFields::new("take off", "взлетать")
                .with_example("The plane took off.")
                .with_synonym("depart"),
            Utc::now(),
        )
    }

    #[test]
    fn test_english_mode_hides_russian() {
        let mask = ReviewMask::new(DisplayMode::English);
        let word = word();
        let card = mask.card(&word);
        assert!(!card.eng.hidden);
        assert!(card.ru.hidden);
        assert!(card.example.unwrap().hidden);
        assert!(card.synonym.unwrap().hidden);
    }

    #[test]
    fn test_reveal_uncovers_card() {
        let mut mask = ReviewMask::new(DisplayMode::Russian);
        let word = word();
        assert!(mask.card(&word).eng.hidden);

        mask.reveal(word.id);
        let card = mask.card(&word);
        assert!(!card.eng.hidden);
        assert!(!card.ru.hidden);
        assert!(!card.example.unwrap().hidden);
        assert!(!card.synonym.unwrap().hidden);
    }

    #[test]
    fn test_synonym_reveal_is_independent() {
        let mut mask = ReviewMask::new(DisplayMode::English);
        let word = word();
        mask.reveal_synonym(word.id);

        let card = mask.card(&word);
        assert!(!card.synonym.unwrap().hidden);
        assert!(card.ru.hidden);
        assert!(card.example.unwrap().hidden);
    }

    #[test]
    fn test_mode_change_remasks_everything() {
        let mut mask = ReviewMask::new(DisplayMode::English);
        mask.reveal(1);
        mask.reveal_synonym(2);

        assert_eq!(mask.flip(), DisplayMode::Russian);
        assert_eq!(mask.epoch(), 1);
        assert!(!mask.is_revealed(1));
        assert!(!mask.is_synonym_revealed(2));

        // Reveals made in an old epoch stay hidden after switching back
        mask.flip();
        assert!(!mask.is_revealed(1));
    }

    #[test]
    fn test_setting_same_mode_keeps_reveals() {
        let mut mask = ReviewMask::new(DisplayMode::English);
        mask.reveal(1);
        assert!(!mask.set_mode(DisplayMode::English));
        assert!(mask.is_revealed(1));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("EN".parse::<DisplayMode>().unwrap(), DisplayMode::English);
        assert_eq!("russian".parse::<DisplayMode>().unwrap(), DisplayMode::Russian);
        assert!("de".parse::<DisplayMode>().is_err());
    }
}
