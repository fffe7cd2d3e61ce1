//! Modifier extraction and normalization
//!
//! With advanced descriptions enabled (Ctrl+Alt+C), every mod is printed as a
//! header line in braces followed by its effect line:
//!
//! ```text
//! { Prefix Modifier "Flaming" (Tier: 1) — Damage, Elemental, Fire }
//! 16(14-16)% increased Fire Damage
//! { Suffix Modifier "of Atrophy" (Tier: 1) — Damage, Chaos }
//! +6(6-8)% to Chaos Damage over Time Multiplier
//! ```
//!
//! Two placeholder forms are derived from each effect line:
//! - the *normalized* value replaces percentage ranges with `#%` and `+N` forms
//!   with `#`, which is what user targets are matched against;
//! - the *general* pattern replaces every number, identifying the kind of mod
//!   regardless of tier or roll.

use std::fmt;
use once_cell::sync::Lazy;

use regex::Regex;
use serde::{Deserialize, Serialize};

static MOD_BLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{ (.+?) \}\r?\n(.+)").expect("mod block pattern"));

static TIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Tier: (\d+)").expect("tier pattern"));

static TAGS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"— (.+)").expect("tags pattern"));

static RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)-(\d+)").expect("range pattern"));

/// `16(14-16)%`, `(14-16)%` and `16%` all collapse to `#%`.
static PERCENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\d+-?\d*\)?%").expect("percent pattern"));

/// `+6` and `+(6-8)` collapse to `#`.
static PLUS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+\(?\d+-?\d*\)?").expect("plus pattern"));

/// Any remaining number or parenthesized range.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\d+-?\d*\)?").expect("number pattern"));

/// Affix type of a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierType {
    Prefix,
    Suffix,
}

impl ModifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierType::Prefix => "prefix",
            ModifierType::Suffix => "suffix",
        }
    }

    /// Classify a mod header.
    ///
    /// Only headers containing `Prefix` are prefixes; everything else,
    /// including implicit, unique and malformed headers, counts as a suffix.
    pub fn from_header(header: &str) -> Self {
        if header.contains("Prefix") {
            ModifierType::Prefix
        } else {
            ModifierType::Suffix
        }
    }
}

impl fmt::Display for ModifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mod parsed from item text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(rename = "type")]
    pub kind: ModifierType,
    pub tier: Option<u32>,
    pub tags: Vec<String>,
    /// Header text between the braces
    pub header: String,
    /// Effect line as printed, with the rolled numbers
    pub raw_value: String,
    /// Effect line with `#%`/`#` placeholders, used for target matching
    pub normalized_value: String,
    /// Effect line with every number replaced
    pub general_pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_range: Option<(u32, u32)>,
}

impl Modifier {
    /// Build a modifier from a header/effect pair.
    pub fn from_parts(header: &str, effect: &str) -> Self {
        let header = header.trim();
        let effect = effect.trim_end_matches('\r').trim_end();

        let tier = TIER_PATTERN
            .captures(header)
            .and_then(|c| c[1].parse().ok());

        let tags = TAGS_PATTERN
            .captures(header)
            .map(|c| c[1].split(", ").map(str::to_string).collect())
            .unwrap_or_default();

        let value_range = RANGE_PATTERN.captures(effect).and_then(|c| {
            let min = c[1].parse().ok()?;
            let max = c[2].parse().ok()?;
            Some((min, max))
        });

        Modifier {
            kind: ModifierType::from_header(header),
            tier,
            tags,
            header: header.to_string(),
            raw_value: effect.to_string(),
            normalized_value: normalize_mod(effect),
            general_pattern: extract_general_mod(effect),
            value_range,
        }
    }

    pub fn is_prefix(&self) -> bool {
        self.kind == ModifierType::Prefix
    }
}

/// Replace percentage values/ranges with `#%` and `+N` values with `#`.
pub fn normalize_mod(value: &str) -> String {
    let value = PERCENT_PATTERN.replace_all(value, "#%");
    PLUS_PATTERN.replace_all(&value, "#").into_owned()
}

/// Replace every numeric value or range, keeping `%` signs.
pub fn extract_general_mod(value: &str) -> String {
    let value = PERCENT_PATTERN.replace_all(value, "#%");
    NUMBER_PATTERN.replace_all(&value, "#").into_owned()
}

/// Parse every header/effect pair, in display order.
pub fn parse_mods(text: &str) -> Vec<Modifier> {
    MOD_BLOCK_PATTERN
        .captures_iter(text)
        .map(|c| {
            let modifier = Modifier::from_parts(&c[1], &c[2]);
            tracing::debug!(
                kind = %modifier.kind,
                tier = ?modifier.tier,
                value = %modifier.normalized_value,
                "parsed mod"
            );
            modifier
        })
        .collect()
}

/// Tier of the first mod whose general pattern equals `general_pattern`.
pub fn mod_tier(mods: &[Modifier], general_pattern: &str) -> Option<u32> {
    mods.iter()
        .find(|m| m.general_pattern == general_pattern)
        .and_then(|m| m.tier)
}

/// True when every target is a substring of at least one item mod.
///
/// Both sides are normalized first, so a target may be written with or without
/// numbers. An empty target list always matches.
pub fn compare_mods<S: AsRef<str>>(item_mods: &[Modifier], targets: &[S]) -> bool {
    let normalized: Vec<String> = item_mods
        .iter()
        .map(|m| normalize_mod(&m.normalized_value))
        .collect();

    targets.iter().all(|target| {
        let target = normalize_mod(target.as_ref());
        normalized.iter().any(|m| m.contains(target.as_str()))
    })
}
