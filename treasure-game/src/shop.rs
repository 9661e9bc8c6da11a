//! Town shop: buying and selling kit items.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::hunter::{Hunter, Traveler};
use crate::item::Item;
use crate::numbers::{clamp_probability, floor_f64_to_i32};

/// Buy price of every item, in gold.
/// All fields default to the standard price if not specified in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    #[serde(default = "PriceList::default_water")]
    pub water: i32,
    #[serde(default = "PriceList::default_rope")]
    pub rope: i32,
    #[serde(default = "PriceList::default_machete")]
    pub machete: i32,
    #[serde(default = "PriceList::default_horse")]
    pub horse: i32,
    #[serde(default = "PriceList::default_boat")]
    pub boat: i32,
    #[serde(default = "PriceList::default_boots")]
    pub boots: i32,
    #[serde(default = "PriceList::default_shovel")]
    pub shovel: i32,
}

impl PriceList {
    const fn default_water() -> i32 {
        2
    }

    const fn default_rope() -> i32 {
        4
    }

    const fn default_machete() -> i32 {
        6
    }

    const fn default_horse() -> i32 {
        12
    }

    const fn default_boat() -> i32 {
        20
    }

    const fn default_boots() -> i32 {
        8
    }

    const fn default_shovel() -> i32 {
        8
    }

    #[must_use]
    pub const fn price(&self, item: Item) -> i32 {
        match item {
            Item::Water => self.water,
            Item::Rope => self.rope,
            Item::Machete => self.machete,
            Item::Horse => self.horse,
            Item::Boat => self.boat,
            Item::Boots => self.boots,
            Item::Shovel => self.shovel,
        }
    }
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            water: Self::default_water(),
            rope: Self::default_rope(),
            machete: Self::default_machete(),
            horse: Self::default_horse(),
            boat: Self::default_boat(),
            boots: Self::default_boots(),
            shovel: Self::default_shovel(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopAction {
    Buy(Item),
    Sell(Item),
}

/// Completed trade; `gold_delta` is negative for purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub action: ShopAction,
    pub gold_delta: i32,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            ShopAction::Buy(item) => write!(
                f,
                "Ye've got yerself a {item}! Come again soon. ({} gold)",
                self.gold_delta.unsigned_abs()
            ),
            ShopAction::Sell(item) => write!(
                f,
                "Pleasure doin' business with you. You sold your {item} for {} gold.",
                self.gold_delta
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("you already have a {0}")]
    AlreadyOwned(Item),
    #[error("a {item} costs {price} gold and you only have {gold}")]
    CannotAfford { item: Item, price: i32, gold: i32 },
    #[error("you don't have a {0} to sell")]
    NotOwned(Item),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    markdown: f64,
    #[serde(default)]
    prices: PriceList,
}

impl Default for Shop {
    fn default() -> Self {
        Self::new(0.5, PriceList::default())
    }
}

impl Shop {
    /// `markdown` is the fraction of the buy price paid back on a sale.
    #[must_use]
    pub fn new(markdown: f64, prices: PriceList) -> Self {
        Self {
            markdown: clamp_probability(markdown),
            prices,
        }
    }

    #[must_use]
    pub const fn markdown(&self) -> f64 {
        self.markdown
    }

    #[must_use]
    pub const fn buy_price(&self, item: Item) -> i32 {
        self.prices.price(item)
    }

    #[must_use]
    pub fn sell_price(&self, item: Item) -> i32 {
        floor_f64_to_i32(f64::from(self.prices.price(item)) * self.markdown)
    }

    /// Carry out a buy or sell.
    ///
    /// # Errors
    ///
    /// See [`Shop::buy`] and [`Shop::sell`].
    pub fn enter(&self, hunter: &mut Hunter, action: ShopAction) -> Result<Receipt, ShopError> {
        match action {
            ShopAction::Buy(item) => self.buy(hunter, item),
            ShopAction::Sell(item) => self.sell(hunter, item),
        }
    }

    /// Sell an item to the hunter.
    ///
    /// # Errors
    ///
    /// Returns an error if the hunter already owns the item or cannot afford it.
    pub fn buy(&self, hunter: &mut Hunter, item: Item) -> Result<Receipt, ShopError> {
        if hunter.has_item(item) {
            return Err(ShopError::AlreadyOwned(item));
        }
        let price = self.buy_price(item);
        if hunter.gold() < price {
            return Err(ShopError::CannotAfford {
                item,
                price,
                gold: hunter.gold(),
            });
        }
        hunter.change_gold(-price);
        hunter.add_item(item);
        log::debug!("bought {item} for {price} gold");
        Ok(Receipt {
            action: ShopAction::Buy(item),
            gold_delta: -price,
        })
    }

    /// Buy an item back from the hunter at the marked-down price.
    ///
    /// # Errors
    ///
    /// Returns an error if the hunter does not own the item.
    pub fn sell(&self, hunter: &mut Hunter, item: Item) -> Result<Receipt, ShopError> {
        if !hunter.has_item(item) {
            return Err(ShopError::NotOwned(item));
        }
        let paid = self.sell_price(item);
        hunter.remove_item(item);
        hunter.change_gold(paid);
        log::debug!("sold {item} for {paid} gold");
        Ok(Receipt {
            action: ShopAction::Sell(item),
            gold_delta: paid,
        })
    }

    /// One line per item with its buy and sell price.
    #[must_use]
    pub fn inventory_listing(&self) -> String {
        Item::ALL
            .iter()
            .map(|item| {
                format!(
                    "{item}: {} gold (buys back for {})",
                    self.buy_price(*item),
                    self.sell_price(*item)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
