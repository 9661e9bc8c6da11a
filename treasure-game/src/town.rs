//! Per-town state machine and action resolution.
//!
//! A [`Town`] is built fresh every time the hunter arrives and discarded once
//! they leave. Terrain, toughness and the buried treasure are fixed at
//! construction; the treasure hunt and the gold dig are one-shot actions gated
//! by monotonic flags. Every action returns a typed outcome and also records a
//! narrative in [`Town::latest_news`] for the renderer.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BRAWL_STAKE_MAX, BRAWL_STAKE_MIN, CALM_NO_TROUBLE_CHANCE, DIG_REWARD_MAX, DIG_REWARD_MIN,
    DIG_SUCCESS_THRESHOLD, ITEM_BREAK_CHANCE, TOUGH_NO_TROUBLE_CHANCE,
};
use crate::hunter::{Hunter, Traveler};
use crate::item::Item;
use crate::numbers::clamp_probability;
use crate::rng::RandomSource;
use crate::shop::{Receipt, Shop, ShopAction, ShopError};
use crate::terrain::{Terrain, TerrainKind};
use crate::treasure::TreasureKind;

/// First lines of every brawl narrative.
pub const BRAWL_OPENING: &str = "You want trouble, stranger!  You got it!\nOof! Umph! Ow!";
const BRAWL_WON_TAUNT: &str = "Okay, stranger! You proved yer mettle. Here, take my gold.";
const BRAWL_LOST_TAUNT: &str = "That'll teach you to go lookin' fer trouble in MY town! Now pay up!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveOutcome {
    Blocked {
        missing: Item,
    },
    Crossed {
        item: Item,
        terrain: TerrainKind,
        item_lost: bool,
    },
}

impl LeaveOutcome {
    /// Whether the hunter made it out of town.
    #[must_use]
    pub const fn left(self) -> bool {
        matches!(self, Self::Crossed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasureHuntOutcome {
    AlreadySearched,
    FoundDust,
    Duplicate(TreasureKind),
    Collected(TreasureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigOutcome {
    AlreadyDug,
    NoShovel,
    Gold(i32),
    Dirt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrawlOutcome {
    NoTrouble,
    Won { stake: i32 },
    Lost { stake: i32 },
}

impl BrawlOutcome {
    /// Gold gained (positive) or paid (negative).
    #[must_use]
    pub const fn gold_delta(self) -> i32 {
        match self {
            Self::NoTrouble => 0,
            Self::Won { stake } => stake,
            Self::Lost { stake } => -stake,
        }
    }

    #[must_use]
    pub const fn is_brawl(self) -> bool {
        !matches!(self, Self::NoTrouble)
    }
}

/// Welcome line for a hunter arriving in a town.
#[must_use]
pub fn welcome(hunter_name: &str, is_tough: bool) -> String {
    let tone = if is_tough {
        "It's pretty rough around here, so watch yourself."
    } else {
        "We're just a sleepy little town with mild mannered folk."
    };
    format!("Welcome to town, {hunter_name}.\n{tone}")
}

#[derive(Debug, Clone)]
pub struct Town<R> {
    rng: R,
    shop: Shop,
    terrain: Terrain,
    is_tough: bool,
    treasure: TreasureKind,
    treasure_searched: bool,
    gold_dug: bool,
    latest_news: String,
}

impl<R: RandomSource> Town<R> {
    /// Generate a town for an arriving hunter.
    ///
    /// Draws toughness, then the buried treasure, then the terrain.
    pub fn new(toughness: f64, hunter_name: &str, shop: Shop, mut rng: R) -> Self {
        let is_tough = rng.uniform_float() < clamp_probability(toughness);
        let treasure = TreasureKind::choose(&mut rng);
        let terrain = Terrain::choose(&mut rng);
        debug!(
            "town generated: terrain={} tough={is_tough} treasure={treasure}",
            terrain.name()
        );
        Self {
            rng,
            shop,
            terrain,
            is_tough,
            treasure,
            treasure_searched: false,
            gold_dug: false,
            latest_news: welcome(hunter_name, is_tough),
        }
    }

    /// Try to cross the surrounding terrain.
    ///
    /// Without the required item nothing changes and the attempt can be
    /// retried. With it the crossing always succeeds, but the item breaks half
    /// of the time.
    pub fn attempt_leave(&mut self, hunter: &mut impl Traveler) -> LeaveOutcome {
        let item = self.terrain.required_item();
        if !self.terrain.can_cross(&*hunter) {
            self.latest_news = format!(
                "You can't leave town, {}. You don't have a {item}.",
                hunter.name()
            );
            debug!("crossing blocked: missing {item}");
            return LeaveOutcome::Blocked { missing: item };
        }

        let mut news = format!("You used your {item} to cross the {}.", self.terrain.name());
        let item_lost = self.rng.uniform_float() < ITEM_BREAK_CHANCE;
        if item_lost {
            hunter.remove_item(item);
            news = format!("{news}\nUnfortunately, you lost your {item}.");
        }
        self.latest_news = news;
        debug!(
            "crossed {} with {item} (lost: {item_lost})",
            self.terrain.name()
        );
        LeaveOutcome::Crossed {
            item,
            terrain: self.terrain.kind(),
            item_lost,
        }
    }

    /// Trade with the town's shop.
    ///
    /// # Errors
    ///
    /// Propagates the shop's refusal; the refusal is also narrated.
    pub fn enter_shop(
        &mut self,
        hunter: &mut Hunter,
        action: ShopAction,
    ) -> Result<Receipt, ShopError> {
        let result = self.shop.enter(hunter, action);
        self.latest_news = match &result {
            Ok(receipt) => receipt.to_string(),
            Err(err) => format!("Sorry, {err}."),
        };
        result
    }

    /// Search for the town's buried treasure. Allowed once per town.
    pub fn hunt_treasure(&mut self, hunter: &mut impl Traveler) -> TreasureHuntOutcome {
        if self.treasure_searched {
            self.latest_news = "You already searched for treasure in this town.".to_string();
            return TreasureHuntOutcome::AlreadySearched;
        }
        self.treasure_searched = true;
        self.latest_news = format!("You found {}.", self.treasure.with_article());

        let outcome = if !self.treasure.is_collectible() {
            TreasureHuntOutcome::FoundDust
        } else if hunter.has_treasure(self.treasure) {
            self.latest_news = format!(
                "Unfortunately you already have {}. Try your luck in the next town!",
                self.treasure.with_article()
            );
            TreasureHuntOutcome::Duplicate(self.treasure)
        } else {
            hunter.add_treasure(self.treasure);
            TreasureHuntOutcome::Collected(self.treasure)
        };
        debug!("treasure hunt: {outcome:?}");
        outcome
    }

    /// Dig for gold. Needs a shovel; allowed once per town.
    ///
    /// An attempt without a shovel does not use up the dig.
    pub fn dig_for_gold(&mut self, hunter: &mut impl Traveler) -> DigOutcome {
        if self.gold_dug {
            self.latest_news = "You already dug for gold in this town.".to_string();
            return DigOutcome::AlreadyDug;
        }
        if !hunter.has_item(Item::Shovel) {
            self.latest_news = "You can't dig for gold without a shovel!".to_string();
            return DigOutcome::NoShovel;
        }

        self.gold_dug = true;
        let outcome = if self.rng.uniform_float() > DIG_SUCCESS_THRESHOLD {
            let reward = self.rng.uniform_int(DIG_REWARD_MIN, DIG_REWARD_MAX);
            hunter.change_gold(reward);
            self.latest_news = format!("You dug up {reward} gold!");
            DigOutcome::Gold(reward)
        } else {
            self.latest_news = "You dug but only found dirt.".to_string();
            DigOutcome::Dirt
        };
        debug!("dig: {outcome:?}");
        outcome
    }

    /// Go looking for a brawl. Repeatable.
    ///
    /// Tough towns are quieter to search but harder to win in.
    pub fn look_for_trouble(&mut self, hunter: &mut impl Traveler) -> BrawlOutcome {
        let no_trouble_chance = self.no_trouble_chance();
        if self.rng.uniform_float() <= no_trouble_chance {
            self.latest_news = "You couldn't find any trouble.".to_string();
            return BrawlOutcome::NoTrouble;
        }

        let stake = self.rng.uniform_int(BRAWL_STAKE_MIN, BRAWL_STAKE_MAX);
        let (outcome, taunt, tally) = if self.rng.uniform_float() > no_trouble_chance {
            (
                BrawlOutcome::Won { stake },
                BRAWL_WON_TAUNT,
                format!("You won the brawl and receive {stake} gold."),
            )
        } else {
            (
                BrawlOutcome::Lost { stake },
                BRAWL_LOST_TAUNT,
                format!("You lost the brawl and pay {stake} gold."),
            )
        };
        hunter.change_gold(outcome.gold_delta());
        self.latest_news = format!("{BRAWL_OPENING}\n{taunt}\n{tally}");
        debug!("brawl: {outcome:?}");
        outcome
    }

    const fn no_trouble_chance(&self) -> f64 {
        if self.is_tough {
            TOUGH_NO_TROUBLE_CHANCE
        } else {
            CALM_NO_TROUBLE_CHANCE
        }
    }
}

impl<R> Town<R> {
    #[must_use]
    pub fn latest_news(&self) -> &str {
        &self.latest_news
    }

    #[must_use]
    pub fn describe_terrain(&self) -> String {
        format!(
            "This nice little town is surrounded by {}.",
            self.terrain.name()
        )
    }

    #[must_use]
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    #[must_use]
    pub const fn is_tough(&self) -> bool {
        self.is_tough
    }

    #[must_use]
    pub const fn treasure(&self) -> TreasureKind {
        self.treasure
    }

    #[must_use]
    pub const fn treasure_searched(&self) -> bool {
        self.treasure_searched
    }

    #[must_use]
    pub const fn gold_dug(&self) -> bool {
        self.gold_dug
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    /// The random source this town draws from.
    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Draw::{Float, Int};
    use crate::rng::{Draw, ScriptedSource};

    /// Construction script: toughness roll, treasure index, terrain index.
    fn build(tough: bool, treasure: i32, terrain: i32) -> Town<ScriptedSource> {
        let rng = ScriptedSource::new()
            .float(if tough { 0.1 } else { 0.9 })
            .int(treasure)
            .int(terrain);
        Town::new(0.5, "Ada", Shop::default(), rng)
    }

    fn push_draws(town: &mut Town<ScriptedSource>, draws: &[Draw]) {
        for draw in draws {
            town.rng.push(*draw);
        }
    }

    #[test]
    fn construction_consumes_three_draws_in_order() {
        let town = build(true, 2, 4);
        assert!(town.is_tough());
        assert_eq!(town.treasure(), TreasureKind::Gem);
        assert_eq!(town.terrain().kind(), TerrainKind::Jungle);
        assert_eq!(town.rng().consumed(), 3);
        assert!(!town.treasure_searched());
        assert!(!town.gold_dug());
    }

    #[test]
    fn welcome_depends_on_toughness() {
        let tough = build(true, 0, 0);
        assert_eq!(
            tough.latest_news(),
            "Welcome to town, Ada.\nIt's pretty rough around here, so watch yourself."
        );
        let sleepy = build(false, 0, 0);
        assert_eq!(
            sleepy.latest_news(),
            "Welcome to town, Ada.\nWe're just a sleepy little town with mild mannered folk."
        );
    }

    #[test]
    fn toughness_bounds_are_absolute() {
        let script = |roll| ScriptedSource::new().float(roll).int(0).int(0);
        let never = Town::new(0.0, "Ada", Shop::default(), script(0.0));
        assert!(!never.is_tough());
        let always = Town::new(1.0, "Ada", Shop::default(), script(0.999));
        assert!(always.is_tough());
    }

    #[test]
    fn leave_without_item_is_retryable_and_draw_free() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 10);
        let outcome = town.attempt_leave(&mut hunter);
        assert_eq!(outcome, LeaveOutcome::Blocked { missing: Item::Rope });
        assert!(!outcome.left());
        assert_eq!(
            town.latest_news(),
            "You can't leave town, Ada. You don't have a Rope."
        );
        assert_eq!(town.rng().remaining(), 0);
        assert!(hunter.kit().is_empty());

        hunter.add_item(Item::Rope);
        push_draws(&mut town, &[Float(0.7)]);
        assert!(town.attempt_leave(&mut hunter).left());
    }

    #[test]
    fn leave_keeps_item_on_high_roll() {
        let mut town = build(false, 0, 1);
        let mut hunter = Hunter::new("Ada", 10).with_kit([Item::Boat]);
        push_draws(&mut town, &[Float(0.5)]);
        let outcome = town.attempt_leave(&mut hunter);
        assert_eq!(
            outcome,
            LeaveOutcome::Crossed {
                item: Item::Boat,
                terrain: TerrainKind::Ocean,
                item_lost: false
            }
        );
        assert_eq!(town.latest_news(), "You used your Boat to cross the Ocean.");
        assert!(hunter.has_item(Item::Boat));
    }

    #[test]
    fn leave_breaks_item_on_low_roll() {
        let mut town = build(true, 0, 3);
        let mut hunter = Hunter::new("Ada", 10).with_kit([Item::Water, Item::Shovel]);
        push_draws(&mut town, &[Float(0.49)]);
        let outcome = town.attempt_leave(&mut hunter);
        assert!(outcome.left());
        assert_eq!(
            town.latest_news(),
            "You used your Water to cross the Desert.\nUnfortunately, you lost your Water."
        );
        assert_eq!(hunter.kit(), &[Item::Shovel]);
    }

    #[test]
    fn treasure_hunt_collects_once() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 10);
        assert_eq!(
            town.hunt_treasure(&mut hunter),
            TreasureHuntOutcome::Collected(TreasureKind::Crown)
        );
        assert_eq!(town.latest_news(), "You found a crown.");
        assert!(town.treasure_searched());
        assert_eq!(hunter.treasures(), &[TreasureKind::Crown]);

        assert_eq!(
            town.hunt_treasure(&mut hunter),
            TreasureHuntOutcome::AlreadySearched
        );
        assert_eq!(
            town.latest_news(),
            "You already searched for treasure in this town."
        );
        assert_eq!(hunter.treasures(), &[TreasureKind::Crown]);
    }

    #[test]
    fn dust_marks_search_but_never_collects() {
        let mut town = build(false, 3, 0);
        let mut hunter = Hunter::new("Ada", 10);
        assert_eq!(town.hunt_treasure(&mut hunter), TreasureHuntOutcome::FoundDust);
        assert_eq!(town.latest_news(), "You found dust.");
        assert!(town.treasure_searched());
        assert!(hunter.treasures().is_empty());
    }

    #[test]
    fn duplicate_treasure_is_not_added() {
        let mut town = build(false, 1, 0);
        let mut hunter = Hunter::new("Ada", 10).with_treasures([TreasureKind::Trophy]);
        assert_eq!(
            town.hunt_treasure(&mut hunter),
            TreasureHuntOutcome::Duplicate(TreasureKind::Trophy)
        );
        assert_eq!(
            town.latest_news(),
            "Unfortunately you already have a trophy. Try your luck in the next town!"
        );
        assert_eq!(hunter.treasures(), &[TreasureKind::Trophy]);
        assert!(town.treasure_searched());
    }

    #[test]
    fn dig_without_shovel_stays_available() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 10);
        assert_eq!(town.dig_for_gold(&mut hunter), DigOutcome::NoShovel);
        assert_eq!(town.latest_news(), "You can't dig for gold without a shovel!");
        assert!(!town.gold_dug());

        hunter.add_item(Item::Shovel);
        push_draws(&mut town, &[Float(0.8), Int(13)]);
        assert_eq!(town.dig_for_gold(&mut hunter), DigOutcome::Gold(13));
        assert_eq!(town.latest_news(), "You dug up 13 gold!");
        assert!(town.gold_dug());
        assert_eq!(hunter.gold(), 23);

        hunter.remove_item(Item::Shovel);
        assert_eq!(town.dig_for_gold(&mut hunter), DigOutcome::AlreadyDug);
        hunter.add_item(Item::Shovel);
        assert_eq!(town.dig_for_gold(&mut hunter), DigOutcome::AlreadyDug);
        assert_eq!(town.latest_news(), "You already dug for gold in this town.");
        assert_eq!(hunter.gold(), 23);
        assert_eq!(town.rng().remaining(), 0);
    }

    #[test]
    fn dig_at_threshold_finds_dirt() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 10).with_kit([Item::Shovel]);
        push_draws(&mut town, &[Float(0.5)]);
        assert_eq!(town.dig_for_gold(&mut hunter), DigOutcome::Dirt);
        assert_eq!(town.latest_news(), "You dug but only found dirt.");
        assert!(town.gold_dug());
        assert_eq!(hunter.gold(), 10);
    }

    #[test]
    fn quiet_roll_finds_no_trouble_with_one_draw() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 10);
        push_draws(&mut town, &[Float(0.33)]);
        assert_eq!(town.look_for_trouble(&mut hunter), BrawlOutcome::NoTrouble);
        assert_eq!(town.latest_news(), "You couldn't find any trouble.");
        assert_eq!(hunter.gold(), 10);
        assert_eq!(town.rng().remaining(), 0);
    }

    #[test]
    fn brawl_win_pays_the_stake() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 10);
        push_draws(&mut town, &[Float(0.5), Int(7), Float(0.34)]);
        let outcome = town.look_for_trouble(&mut hunter);
        assert_eq!(outcome, BrawlOutcome::Won { stake: 7 });
        assert_eq!(hunter.gold(), 17);
        assert!(town.latest_news().starts_with("You want trouble, stranger!"));
        assert!(
            town.latest_news()
                .ends_with("You won the brawl and receive 7 gold.")
        );
    }

    #[test]
    fn tough_town_brawl_loss_can_bankrupt() {
        let mut town = build(true, 0, 0);
        let mut hunter = Hunter::new("Ada", 4);
        push_draws(&mut town, &[Float(0.67), Int(10), Float(0.66)]);
        let outcome = town.look_for_trouble(&mut hunter);
        assert_eq!(outcome, BrawlOutcome::Lost { stake: 10 });
        assert_eq!(outcome.gold_delta(), -10);
        assert_eq!(hunter.gold(), -6);
        assert!(town.latest_news().contains("Now pay up!"));
        assert!(
            town.latest_news()
                .ends_with("You lost the brawl and pay 10 gold.")
        );
    }

    #[test]
    fn trouble_is_repeatable() {
        let mut town = build(true, 0, 0);
        let mut hunter = Hunter::new("Ada", 10);
        push_draws(&mut town, &[Float(0.1), Float(0.2), Float(0.3)]);
        for _ in 0..3 {
            assert_eq!(town.look_for_trouble(&mut hunter), BrawlOutcome::NoTrouble);
        }
    }

    #[test]
    fn shop_refusal_is_narrated() {
        let mut town = build(false, 0, 0);
        let mut hunter = Hunter::new("Ada", 1);
        let result = town.enter_shop(&mut hunter, ShopAction::Buy(Item::Horse));
        assert!(result.is_err());
        assert_eq!(
            town.latest_news(),
            "Sorry, a Horse costs 12 gold and you only have 1."
        );
        assert_eq!(hunter.gold(), 1);

        hunter.change_gold(1);
        let receipt = town
            .enter_shop(&mut hunter, ShopAction::Buy(Item::Water))
            .unwrap();
        assert_eq!(receipt.gold_delta, -2);
        assert_eq!(town.latest_news(), receipt.to_string());
        assert!(hunter.has_item(Item::Water));
    }

    #[test]
    fn describe_terrain_names_the_terrain() {
        let town = build(false, 0, 5);
        assert_eq!(
            town.describe_terrain(),
            "This nice little town is surrounded by Marsh."
        );
    }
}
