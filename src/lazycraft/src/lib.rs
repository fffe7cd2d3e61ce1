//! # lazycraft
//!
//! Item text parser and currency craft loop for Path of Exile.
//!
//! This library provides functionality to:
//! - Parse item rarity, name and stack size from copied item text
//! - Extract prefix/suffix mods with tier, tags and placeholder patterns
//! - Work out which affix slots are still open
//! - Match an item's mods against a list of target mods
//! - Drive a Transmutation/Augmentation/Alteration craft until the targets hit
//!
//! ## Example
//!
//! ```
//! use lazycraft::{compare_mods, open_affixes, parse_mods, ModifierType};
//!
//! let text = "Item Class: Jewels\n\
//!     Rarity: Magic\n\
//!     Flaming Cobalt Jewel\n\
//!     --------\n\
//!     { Prefix Modifier \"Flaming\" (Tier: 1) — Damage, Elemental, Fire }\n\
//!     16(14-16)% increased Fire Damage\n";
//!
//! let mods = parse_mods(text);
//! assert_eq!(mods[0].kind, ModifierType::Prefix);
//! assert!(compare_mods(&mods, &["increased Fire Damage"]));
//!
//! let affixes = open_affixes(text).unwrap();
//! assert_eq!(affixes.missing, vec![ModifierType::Suffix]);
//! ```

pub mod affix;
pub mod config;
pub mod craft;
pub mod item;
pub mod library;
pub mod modifier;
pub mod parser;

// Re-export commonly used items
#[doc(inline)]
pub use affix::{open_affixes, AffixStatus};
#[doc(inline)]
pub use config::{ConfigError, CraftConfig, CraftOptions, Delays, ExecutionDelays, StopKey};
#[doc(inline)]
pub use craft::{
    ActionError, ActionExecutor, CancelToken, CraftEvent, CraftOutcome, CraftReport,
    CraftSession, CraftState, Currency, FailureReason, Region, TextSource,
};
#[doc(inline)]
pub use item::{item_rarity, parse_item_details, ItemDetails, ItemRarity, ParseError};
#[doc(inline)]
pub use library::{LibraryError, ModEntry, ModLibrary};
#[doc(inline)]
pub use modifier::{
    compare_mods, extract_general_mod, mod_tier, normalize_mod, parse_mods, Modifier,
    ModifierType,
};
#[doc(inline)]
pub use parser::{ItemSnapshot, ModParser, TextModParser};
