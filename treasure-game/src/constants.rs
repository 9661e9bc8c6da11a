//! Centralized odds and payouts for town actions.
//!
//! The JSON configuration only covers difficulty presets and shop prices.

// Brawling -----------------------------------------------------------------
pub(crate) const TOUGH_NO_TROUBLE_CHANCE: f64 = 0.66;
pub(crate) const CALM_NO_TROUBLE_CHANCE: f64 = 0.33;
pub(crate) const BRAWL_STAKE_MIN: i32 = 1;
pub(crate) const BRAWL_STAKE_MAX: i32 = 10;

// Crossing -----------------------------------------------------------------
pub(crate) const ITEM_BREAK_CHANCE: f64 = 0.5;

// Digging ------------------------------------------------------------------
pub(crate) const DIG_SUCCESS_THRESHOLD: f64 = 0.5;
pub(crate) const DIG_REWARD_MIN: i32 = 1;
pub(crate) const DIG_REWARD_MAX: i32 = 20;

// Seed streams -------------------------------------------------------------
pub(crate) const TOWN_STREAM_DOMAIN: &str = "treasure-hunter/town";
