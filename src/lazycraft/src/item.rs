//! Item header parsing
//!
//! Item text copied from the game starts with a block like:
//!
//! ```text
//! Item Class: Jewels
//! Rarity: Magic
//! Flaming Cobalt Jewel of Atrophy
//! --------
//! Stack Size: 3/10
//! ```
//!
//! The `Rarity:` line is the only mandatory anchor. Everything else is best-effort.

use std::fmt;
use once_cell::sync::Lazy;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static RARITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Rarity: (.+)").expect("rarity pattern"));

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Rarity: .+\n(.+)").expect("name pattern"));

static STACK_SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Stack Size: ([\d,]+)/([\d,]+)").expect("stack size pattern")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("item text has no `Rarity:` line")]
    MissingRarity,
}

/// Item rarity as printed on the `Rarity:` line.
///
/// Rarities this crate does not act on are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ItemRarity {
    Normal,
    Magic,
    Rare,
    Unique,
    Currency,
    Gem,
    DivinationCard,
    Other(String),
}

impl ItemRarity {
    pub fn as_str(&self) -> &str {
        match self {
            ItemRarity::Normal => "Normal",
            ItemRarity::Magic => "Magic",
            ItemRarity::Rare => "Rare",
            ItemRarity::Unique => "Unique",
            ItemRarity::Currency => "Currency",
            ItemRarity::Gem => "Gem",
            ItemRarity::DivinationCard => "Divination Card",
            ItemRarity::Other(s) => s,
        }
    }

    /// Maximum (prefix, suffix) counts for rarities that can still gain affixes.
    ///
    /// Only Magic and Rare items are craftable with the currencies this crate
    /// drives; every other rarity reports no open slot.
    pub fn affix_limits(&self) -> Option<(usize, usize)> {
        match self {
            ItemRarity::Magic => Some((1, 1)),
            ItemRarity::Rare => Some((3, 3)),
            _ => None,
        }
    }
}

impl From<&str> for ItemRarity {
    fn from(s: &str) -> Self {
        match s {
            "Normal" => ItemRarity::Normal,
            "Magic" => ItemRarity::Magic,
            "Rare" => ItemRarity::Rare,
            "Unique" => ItemRarity::Unique,
            "Currency" => ItemRarity::Currency,
            "Gem" => ItemRarity::Gem,
            "Divination Card" => ItemRarity::DivinationCard,
            other => ItemRarity::Other(other.to_string()),
        }
    }
}

impl From<String> for ItemRarity {
    fn from(s: String) -> Self {
        ItemRarity::from(s.as_str())
    }
}

impl From<ItemRarity> for String {
    fn from(rarity: ItemRarity) -> Self {
        rarity.as_str().to_string()
    }
}

impl fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header fields of an item. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub rarity: Option<ItemRarity>,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stack: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stack: Option<u32>,
}

/// Extract rarity, name and stack size from item text.
///
/// Missing fields come back as `None`; this never fails.
pub fn parse_item_details(text: &str) -> ItemDetails {
    let rarity = RARITY_PATTERN
        .captures(text)
        .map(|c| ItemRarity::from(c[1].trim()));
    let name = NAME_PATTERN
        .captures(text)
        .map(|c| c[1].trim_end_matches('\r').to_string());

    let (current_stack, max_stack) = match STACK_SIZE_PATTERN.captures(text) {
        Some(c) => (parse_grouped(&c[1]), parse_grouped(&c[2])),
        None => (None, None),
    };

    ItemDetails {
        rarity,
        name,
        current_stack,
        max_stack,
    }
}

/// Rarity of the item, trimmed.
///
/// Fails when the text has no `Rarity:` line, which callers should treat as
/// "not an item" rather than a fatal error.
pub fn item_rarity(text: &str) -> Result<ItemRarity, ParseError> {
    RARITY_PATTERN
        .captures(text)
        .map(|c| ItemRarity::from(c[1].trim()))
        .ok_or(ParseError::MissingRarity)
}

fn parse_grouped(digits: &str) -> Option<u32> {
    digits.replace(',', "").parse().ok()
}
