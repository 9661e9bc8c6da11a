//! Terrain surrounding a town and the item needed to cross it.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hunter::Traveler;
use crate::item::Item;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Mountains,
    Ocean,
    Plains,
    Desert,
    Jungle,
    Marsh,
}

impl TerrainKind {
    pub const ALL: [Self; 6] = [
        Self::Mountains,
        Self::Ocean,
        Self::Plains,
        Self::Desert,
        Self::Jungle,
        Self::Marsh,
    ];

    #[must_use]
    pub const fn required_item(self) -> Item {
        match self {
            Self::Mountains => Item::Rope,
            Self::Ocean => Item::Boat,
            Self::Plains => Item::Horse,
            Self::Desert => Item::Water,
            Self::Jungle => Item::Machete,
            Self::Marsh => Item::Boots,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mountains => "Mountains",
            Self::Ocean => "Ocean",
            Self::Plains => "Plains",
            Self::Desert => "Desert",
            Self::Jungle => "Jungle",
            Self::Marsh => "Marsh",
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable terrain assignment for one town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    kind: TerrainKind,
    required_item: Item,
}

impl Terrain {
    #[must_use]
    pub const fn new(kind: TerrainKind) -> Self {
        Self {
            kind,
            required_item: kind.required_item(),
        }
    }

    /// Pick one of the six terrains with equal probability.
    ///
    /// # Panics
    ///
    /// Panics if the source returns an index outside the terrain table.
    pub fn choose(rng: &mut impl RandomSource) -> Self {
        let last = i32::try_from(TerrainKind::ALL.len() - 1).expect("terrain table fits in i32");
        let index = rng.uniform_int(0, last);
        let kind = usize::try_from(index)
            .ok()
            .and_then(|idx| TerrainKind::ALL.get(idx))
            .copied()
            .expect("terrain draw within table");
        Self::new(kind)
    }

    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.label()
    }

    #[must_use]
    pub const fn required_item(&self) -> Item {
        self.required_item
    }

    #[must_use]
    pub fn can_cross(&self, traveler: &impl Traveler) -> bool {
        traveler.has_item(self.required_item)
    }
}
