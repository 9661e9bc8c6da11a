//! Game configuration: difficulty presets and shop prices.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::difficulty::{Difficulty, DifficultyCfg};
use crate::item::Item;
use crate::shop::PriceList;

const STATIC_CONFIG: &str = include_str!("../assets/game.json");

/// Errors raised when configuration cannot be read or violates invariants.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{difficulty} {field} must be between 0.00 and 1.00 (got {value:.2})")]
    RangeViolation {
        difficulty: Difficulty,
        field: &'static str,
        value: f64,
    },
    #[error("{difficulty} starting gold must not be negative (got {value})")]
    NegativeGold { difficulty: Difficulty, value: i32 },
    #[error("price of {item} must not be negative (got {value})")]
    NegativePrice { item: Item, value: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "DifficultyCfg::easy")]
    pub easy: DifficultyCfg,
    #[serde(default = "DifficultyCfg::normal")]
    pub normal: DifficultyCfg,
    #[serde(default = "DifficultyCfg::hard")]
    pub hard: DifficultyCfg,
    #[serde(default = "DifficultyCfg::test")]
    pub test: DifficultyCfg,
    #[serde(default)]
    pub prices: PriceList,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyCfg::easy(),
            normal: DifficultyCfg::normal(),
            hard: DifficultyCfg::hard(),
            test: DifficultyCfg::test(),
            prices: PriceList::default(),
        }
    }
}

impl GameConfig {
    /// Load the configuration bundled with the crate, falling back to defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(STATIC_CONFIG).unwrap_or_default()
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub const fn preset(&self, difficulty: Difficulty) -> &DifficultyCfg {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::Test => &self.test,
        }
    }

    /// Check probabilities, gold and prices.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            let preset = self.preset(difficulty);
            for (field, value) in [("toughness", preset.toughness), ("markdown", preset.markdown)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::RangeViolation {
                        difficulty,
                        field,
                        value,
                    });
                }
            }
            if preset.starting_gold < 0 {
                return Err(ConfigError::NegativeGold {
                    difficulty,
                    value: preset.starting_gold,
                });
            }
        }
        if let Some(item) = Item::ALL.into_iter().find(|item| self.prices.price(*item) < 0) {
            return Err(ConfigError::NegativePrice {
                item,
                value: self.prices.price(item),
            });
        }
        Ok(())
    }
}
