//! Treasure Hunter Game Engine
//!
//! Platform-agnostic core logic for the Treasure Hunter journey: procedurally
//! generated towns, their one-shot actions and randomized outcomes, the shop,
//! and the hunter who carries gold, kit and treasures between towns.
//! This crate provides all game mechanics without terminal or rendering code.

pub mod config;
mod constants;
pub mod difficulty;
pub mod hunter;
pub mod item;
pub mod journey;
pub mod numbers;
pub mod rng;
pub mod shop;
pub mod terrain;
pub mod town;
pub mod treasure;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use difficulty::{Difficulty, DifficultyCfg, ParseDifficultyError};
pub use hunter::{Hunter, Kit, Traveler, TreasureHoard};
pub use item::{Item, ParseItemError};
pub use journey::{Action, Journey, JourneyStatus, JourneySummary, Turn, TurnOutcome};
pub use rng::{RandomSource, SeededSource};
#[cfg(any(test, feature = "testing"))]
pub use rng::{Draw, ScriptedSource};
pub use shop::{PriceList, Receipt, Shop, ShopAction, ShopError};
pub use terrain::{Terrain, TerrainKind};
pub use town::{BrawlOutcome, DigOutcome, LeaveOutcome, Town, TreasureHuntOutcome, welcome};
pub use treasure::TreasureKind;
