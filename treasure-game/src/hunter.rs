//! The hunter: gold, kit and collected treasures, carried from town to town.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::item::Item;
use crate::treasure::TreasureKind;

/// Kit capacity stored inline; one slot per item kind.
pub type Kit = SmallVec<[Item; 8]>;

/// Collected treasures, at most one per kind.
pub type TreasureHoard = SmallVec<[TreasureKind; 4]>;

/// What a town needs from whoever is visiting it.
pub trait Traveler {
    fn name(&self) -> &str;

    fn has_item(&self, item: Item) -> bool;

    /// Drop an item from the kit; does nothing when the item is absent.
    fn remove_item(&mut self, item: Item);

    fn has_treasure(&self, kind: TreasureKind) -> bool;

    fn add_treasure(&mut self, kind: TreasureKind);

    /// Adjust gold by `delta`; the balance may go negative.
    fn change_gold(&mut self, delta: i32);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunter {
    name: String,
    gold: i32,
    #[serde(default)]
    kit: Kit,
    #[serde(default)]
    treasures: TreasureHoard,
}

impl Hunter {
    #[must_use]
    pub fn new(name: &str, gold: i32) -> Self {
        Self {
            name: name.trim().to_string(),
            gold,
            kit: Kit::new(),
            treasures: TreasureHoard::new(),
        }
    }

    /// Start with the given items already packed.
    #[must_use]
    pub fn with_kit(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        for item in items {
            self.add_item(item);
        }
        self
    }

    /// Start with the given treasures already collected.
    #[must_use]
    pub fn with_treasures(mut self, kinds: impl IntoIterator<Item = TreasureKind>) -> Self {
        for kind in kinds {
            self.add_treasure(kind);
        }
        self
    }

    #[must_use]
    pub const fn gold(&self) -> i32 {
        self.gold
    }

    #[must_use]
    pub fn kit(&self) -> &[Item] {
        &self.kit
    }

    #[must_use]
    pub fn treasures(&self) -> &[TreasureKind] {
        &self.treasures
    }

    /// Pack an item. Returns false when one is already in the kit.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.kit.contains(&item) {
            return false;
        }
        self.kit.push(item);
        true
    }

    /// True once every collectible treasure has been found.
    #[must_use]
    pub fn has_all_treasures(&self) -> bool {
        TreasureKind::COLLECTIBLE
            .iter()
            .all(|kind| self.treasures.contains(kind))
    }

    #[must_use]
    pub const fn is_broke(&self) -> bool {
        self.gold <= 0
    }
}

impl Traveler for Hunter {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_item(&self, item: Item) -> bool {
        self.kit.contains(&item)
    }

    fn remove_item(&mut self, item: Item) {
        self.kit.retain(|packed| *packed != item);
    }

    fn has_treasure(&self, kind: TreasureKind) -> bool {
        self.treasures.contains(&kind)
    }

    fn add_treasure(&mut self, kind: TreasureKind) {
        if !self.treasures.contains(&kind) {
            self.treasures.push(kind);
        }
    }

    fn change_gold(&mut self, delta: i32) {
        self.gold = self.gold.saturating_add(delta);
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, entries: &[T]) -> fmt::Result {
    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{entry}")?;
    }
    Ok(())
}

impl fmt::Display for Hunter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has {} gold", self.name, self.gold)?;
        f.write_str("\nKit: ")?;
        if self.kit.is_empty() {
            f.write_str("(empty)")?;
        } else {
            write_list(f, &self.kit)?;
        }
        f.write_str("\nTreasures: ")?;
        if self.treasures.is_empty() {
            f.write_str("none")
        } else {
            write_list(f, &self.treasures)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kit_holds_one_of_each_item() {
        let mut hunter = Hunter::new("Ada", 10);
        assert!(hunter.add_item(Item::Rope));
        assert!(!hunter.add_item(Item::Rope));
        assert_eq!(hunter.kit(), &[Item::Rope]);
    }

    #[test]
    fn removing_missing_item_is_a_no_op() {
        let mut hunter = Hunter::new("Ada", 10).with_kit([Item::Boat]);
        hunter.remove_item(Item::Horse);
        assert_eq!(hunter.kit(), &[Item::Boat]);
        hunter.remove_item(Item::Boat);
        assert!(hunter.kit().is_empty());
        hunter.remove_item(Item::Boat);
        assert!(hunter.kit().is_empty());
    }

    #[test]
    fn gold_may_go_negative() {
        let mut hunter = Hunter::new("Ada", 3);
        hunter.change_gold(-7);
        assert_eq!(hunter.gold(), -4);
        assert!(hunter.is_broke());
        hunter.change_gold(5);
        assert_eq!(hunter.gold(), 1);
        assert!(!hunter.is_broke());
    }

    #[test]
    fn all_three_collectibles_win() {
        let mut hunter = Hunter::new("Ada", 10)
            .with_treasures([TreasureKind::Crown, TreasureKind::Gem, TreasureKind::Dust]);
        assert!(!hunter.has_all_treasures());
        hunter.add_treasure(TreasureKind::Trophy);
        hunter.add_treasure(TreasureKind::Trophy);
        assert!(hunter.has_all_treasures());
        assert_eq!(
            hunter
                .treasures()
                .iter()
                .filter(|kind| **kind == TreasureKind::Trophy)
                .count(),
            1
        );
    }

    #[test]
    fn display_lists_kit_and_treasures() {
        let hunter = Hunter::new("  Ada ", 12)
            .with_kit([Item::Rope, Item::Shovel])
            .with_treasures([TreasureKind::Gem]);
        assert_eq!(
            hunter.to_string(),
            "Ada has 12 gold\nKit: Rope, Shovel\nTreasures: gem"
        );
        assert_eq!(
            Hunter::new("Bo", 0).to_string(),
            "Bo has 0 gold\nKit: (empty)\nTreasures: none"
        );
    }
}
