//! Difficulty levels and their starting conditions.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    /// Rich, fully-equipped hunter for exercising the game by hand.
    Test,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Test];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected e/n/h/test)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "easy" => Ok(Self::Easy),
            "n" | "normal" => Ok(Self::Normal),
            "h" | "hard" => Ok(Self::Hard),
            "test" => Ok(Self::Test),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

/// Starting conditions and town odds for one difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCfg {
    /// Probability that a freshly generated town is tough.
    pub toughness: f64,
    /// Fraction of the buy price the shop pays back.
    pub markdown: f64,
    pub starting_gold: i32,
    #[serde(default)]
    pub starting_kit: Vec<Item>,
}

impl DifficultyCfg {
    #[must_use]
    pub fn easy() -> Self {
        Self {
            toughness: 0.2,
            markdown: 0.75,
            starting_gold: 20,
            starting_kit: Vec::new(),
        }
    }

    #[must_use]
    pub fn normal() -> Self {
        Self {
            toughness: 0.4,
            markdown: 0.5,
            starting_gold: 10,
            starting_kit: Vec::new(),
        }
    }

    #[must_use]
    pub fn hard() -> Self {
        Self {
            toughness: 0.75,
            markdown: 0.25,
            starting_gold: 10,
            starting_kit: Vec::new(),
        }
    }

    #[must_use]
    pub fn test() -> Self {
        Self {
            starting_gold: 100,
            starting_kit: vec![
                Item::Water,
                Item::Rope,
                Item::Machete,
                Item::Horse,
                Item::Boat,
                Item::Boots,
            ],
            ..Self::normal()
        }
    }
}
