//! Journey state binding a hunter to the town they are currently visiting.
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GameConfig;
use crate::constants::TOWN_STREAM_DOMAIN;
use crate::difficulty::{Difficulty, DifficultyCfg};
use crate::hunter::{Hunter, Traveler};
use crate::item::Item;
use crate::rng::SeededSource;
use crate::shop::{PriceList, Receipt, Shop, ShopAction, ShopError};
use crate::town::{BrawlOutcome, DigOutcome, LeaveOutcome, Town, TreasureHuntOutcome};
use crate::treasure::TreasureKind;

/// One menu choice, already resolved to its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Buy(Item),
    Sell(Item),
    Move,
    LookForTrouble,
    Dig,
    Hunt,
    Retire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
    InProgress,
    Won,
    Broke,
    Retired,
}

impl JourneyStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Broke => "broke",
            Self::Retired => "retired",
        }
    }
}

impl fmt::Display for JourneyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed result of the town operation an action resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Shop(Result<Receipt, ShopError>),
    Leave(LeaveOutcome),
    Brawl(BrawlOutcome),
    Dig(DigOutcome),
    Treasure(TreasureHuntOutcome),
    Retired,
    /// The journey had already ended; nothing happened.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub action: Action,
    pub outcome: TurnOutcome,
    /// Narrative to show the player for this turn.
    pub news: String,
    pub status: JourneyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub name: String,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub gold: i32,
    pub towns_visited: u64,
    pub treasures: Vec<TreasureKind>,
    pub kit: Vec<Item>,
    pub status: JourneyStatus,
}

#[derive(Debug, Clone)]
pub struct Journey {
    hunter: Hunter,
    difficulty: Difficulty,
    preset: DifficultyCfg,
    prices: PriceList,
    seed: u64,
    towns_visited: u64,
    town: Town<SeededSource>,
    retired: bool,
}

impl Journey {
    /// Start a journey with a hunter outfitted from the difficulty preset.
    #[must_use]
    pub fn new(name: &str, difficulty: Difficulty, seed: u64, cfg: &GameConfig) -> Self {
        let preset = cfg.preset(difficulty);
        let hunter = Hunter::new(name, preset.starting_gold)
            .with_kit(preset.starting_kit.iter().copied());
        Self::with_hunter(hunter, difficulty, seed, cfg)
    }

    /// Start a journey with an already outfitted hunter.
    #[must_use]
    pub fn with_hunter(hunter: Hunter, difficulty: Difficulty, seed: u64, cfg: &GameConfig) -> Self {
        let preset = cfg.preset(difficulty).clone();
        let prices = cfg.prices.clone();
        let town = Self::build_town(&hunter, &preset, &prices, seed, 0);
        info!(
            "journey started: hunter={} difficulty={difficulty} seed={seed}",
            hunter.name()
        );
        Self {
            hunter,
            difficulty,
            preset,
            prices,
            seed,
            towns_visited: 1,
            town,
            retired: false,
        }
    }

    fn build_town(
        hunter: &Hunter,
        preset: &DifficultyCfg,
        prices: &PriceList,
        seed: u64,
        index: u64,
    ) -> Town<SeededSource> {
        let shop = Shop::new(preset.markdown, prices.clone());
        let rng = SeededSource::for_stream(seed, TOWN_STREAM_DOMAIN, index);
        let town = Town::new(preset.toughness, hunter.name(), shop, rng);
        info!(
            "entered town #{index}: {} (tough: {})",
            town.terrain().name(),
            town.is_tough()
        );
        town
    }

    fn enter_next_town(&mut self) {
        self.town = Self::build_town(
            &self.hunter,
            &self.preset,
            &self.prices,
            self.seed,
            self.towns_visited,
        );
        self.towns_visited = self.towns_visited.saturating_add(1);
    }

    /// Apply one action to the current town.
    pub fn perform(&mut self, action: Action) -> Turn {
        if self.status().is_over() {
            return self.turn(action, TurnOutcome::Ignored, self.town.latest_news().to_string());
        }

        let outcome = match action {
            Action::Buy(item) => {
                TurnOutcome::Shop(self.town.enter_shop(&mut self.hunter, ShopAction::Buy(item)))
            }
            Action::Sell(item) => {
                TurnOutcome::Shop(self.town.enter_shop(&mut self.hunter, ShopAction::Sell(item)))
            }
            Action::Move => {
                let leave = self.town.attempt_leave(&mut self.hunter);
                if leave.left() {
                    let crossing = self.town.latest_news().to_string();
                    self.enter_next_town();
                    let news = format!("{crossing}\n\n{}", self.town.latest_news());
                    return self.turn(action, TurnOutcome::Leave(leave), news);
                }
                TurnOutcome::Leave(leave)
            }
            Action::LookForTrouble => {
                TurnOutcome::Brawl(self.town.look_for_trouble(&mut self.hunter))
            }
            Action::Dig => TurnOutcome::Dig(self.town.dig_for_gold(&mut self.hunter)),
            Action::Hunt => TurnOutcome::Treasure(self.town.hunt_treasure(&mut self.hunter)),
            Action::Retire => {
                self.retired = true;
                let news = format!("Fare thee well, {}!", self.hunter.name());
                return self.turn(action, TurnOutcome::Retired, news);
            }
        };
        self.turn(action, outcome, self.town.latest_news().to_string())
    }

    fn turn(&self, action: Action, outcome: TurnOutcome, news: String) -> Turn {
        let status = self.status();
        if status.is_over() && !matches!(outcome, TurnOutcome::Ignored) {
            info!(
                "journey ended: {status:?} after {} towns with {} gold",
                self.towns_visited,
                self.hunter.gold()
            );
        }
        Turn {
            action,
            outcome,
            news,
            status,
        }
    }

    /// An empty purse ends the journey even when the collection is complete.
    #[must_use]
    pub fn status(&self) -> JourneyStatus {
        if self.hunter.is_broke() {
            JourneyStatus::Broke
        } else if self.hunter.has_all_treasures() {
            JourneyStatus::Won
        } else if self.retired {
            JourneyStatus::Retired
        } else {
            JourneyStatus::InProgress
        }
    }

    #[must_use]
    pub const fn hunter(&self) -> &Hunter {
        &self.hunter
    }

    #[must_use]
    pub const fn town(&self) -> &Town<SeededSource> {
        &self.town
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn towns_visited(&self) -> u64 {
        self.towns_visited
    }

    #[must_use]
    pub fn summary(&self) -> JourneySummary {
        JourneySummary {
            name: self.hunter.name().to_string(),
            difficulty: self.difficulty,
            seed: self.seed,
            gold: self.hunter.gold(),
            towns_visited: self.towns_visited,
            treasures: self.hunter.treasures().to_vec(),
            kit: self.hunter.kit().to_vec(),
            status: self.status(),
        }
    }
}
