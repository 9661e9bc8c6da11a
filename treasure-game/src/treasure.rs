//! Treasure buried under each town.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasureKind {
    Crown,
    Trophy,
    Gem,
    Dust,
}

impl TreasureKind {
    pub const ALL: [Self; 4] = [Self::Crown, Self::Trophy, Self::Gem, Self::Dust];

    /// Treasures that count toward the collection; dust never does.
    pub const COLLECTIBLE: [Self; 3] = [Self::Crown, Self::Trophy, Self::Gem];

    /// Draw one of the four kinds uniformly.
    ///
    /// # Panics
    ///
    /// Panics if the source returns an index outside the treasure table.
    pub fn choose(rng: &mut impl RandomSource) -> Self {
        let last = i32::try_from(Self::ALL.len() - 1).expect("treasure table fits in i32");
        let index = rng.uniform_int(0, last);
        usize::try_from(index)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
            .expect("treasure draw within table")
    }

    #[must_use]
    pub const fn is_collectible(self) -> bool {
        !matches!(self, Self::Dust)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crown => "crown",
            Self::Trophy => "trophy",
            Self::Gem => "gem",
            Self::Dust => "dust",
        }
    }

    /// Label with the article used in narration ("a crown", "dust").
    #[must_use]
    pub const fn with_article(self) -> &'static str {
        match self {
            Self::Crown => "a crown",
            Self::Trophy => "a trophy",
            Self::Gem => "a gem",
            Self::Dust => "dust",
        }
    }
}

impl fmt::Display for TreasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
