//! Kit items the hunter can carry, buy and sell.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Water,
    Rope,
    Machete,
    Horse,
    Boat,
    Boots,
    Shovel,
}

impl Item {
    pub const ALL: [Self; 7] = [
        Self::Water,
        Self::Rope,
        Self::Machete,
        Self::Horse,
        Self::Boat,
        Self::Boots,
        Self::Shovel,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Rope => "Rope",
            Self::Machete => "Machete",
            Self::Horse => "Horse",
            Self::Boat => "Boat",
            Self::Boots => "Boots",
            Self::Shovel => "Shovel",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a name does not match any item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item `{0}`")]
pub struct ParseItemError(pub String);

impl FromStr for Item {
    type Err = ParseItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseItemError(wanted.to_string()))
    }
}
