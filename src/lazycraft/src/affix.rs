//! Affix slot accounting

use serde::{Deserialize, Serialize};

use crate::item::{item_rarity, ItemRarity, ParseError};
use crate::modifier::{parse_mods, Modifier, ModifierType};

/// Open slot status of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixStatus {
    pub has_open_affix: bool,
    /// Affix types below their cap, prefix first
    pub missing: Vec<ModifierType>,
    pub prefixes: usize,
    pub suffixes: usize,
}

impl AffixStatus {
    /// Compute slot status from an already parsed rarity and mod list.
    pub fn from_mods(rarity: &ItemRarity, mods: &[Modifier]) -> Self {
        let prefixes = mods.iter().filter(|m| m.is_prefix()).count();
        let suffixes = mods.len() - prefixes;
        tracing::debug!(prefixes, suffixes, rarity = %rarity, "affix counts");

        let mut missing = Vec::new();
        if let Some((max_prefixes, max_suffixes)) = rarity.affix_limits() {
            if prefixes < max_prefixes {
                missing.push(ModifierType::Prefix);
            }
            if suffixes < max_suffixes {
                missing.push(ModifierType::Suffix);
            }
        }

        AffixStatus {
            has_open_affix: !missing.is_empty(),
            missing,
            prefixes,
            suffixes,
        }
    }
}

/// Open affix status of the item described by `text`.
///
/// Fails only when the text has no `Rarity:` line.
pub fn open_affixes(text: &str) -> Result<AffixStatus, ParseError> {
    let rarity = item_rarity(text)?;
    Ok(AffixStatus::from_mods(&rarity, &parse_mods(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rarity: &str, prefixes: usize, suffixes: usize) -> String {
        let mut text = format!("Item Class: Jewels\nRarity: {rarity}\nTest Jewel\n--------\n");
        for i in 0..prefixes {
            text.push_str(&format!(
                "{{ Prefix Modifier \"P{i}\" (Tier: 1) — Damage }}\n1{i}% increased Damage\n"
            ));
        }
        for i in 0..suffixes {
            text.push_str(&format!(
                "{{ Suffix Modifier \"of S{i}\" (Tier: 2) — Attack }}\n+{i} to Accuracy Rating\n"
            ));
        }
        text
    }

    #[test]
    fn test_magic_missing_suffix() {
        let status = open_affixes(&item("Magic", 1, 0)).unwrap();
        assert!(status.has_open_affix);
        assert_eq!(status.missing, vec![ModifierType::Suffix]);
        assert_eq!((status.prefixes, status.suffixes), (1, 0));
    }

    #[test]
    fn test_magic_full() {
        let status = open_affixes(&item("Magic", 1, 1)).unwrap();
        assert!(!status.has_open_affix);
        assert!(status.missing.is_empty());
    }

    #[test]
    fn test_magic_empty() {
        let status = open_affixes(&item("Magic", 0, 0)).unwrap();
        assert_eq!(status.missing, vec![ModifierType::Prefix, ModifierType::Suffix]);
    }

    #[test]
    fn test_rare_missing_suffix() {
        let status = open_affixes(&item("Rare", 3, 2)).unwrap();
        assert!(status.has_open_affix);
        assert_eq!(status.missing, vec![ModifierType::Suffix]);
    }

    #[test]
    fn test_rare_full() {
        let status = open_affixes(&item("Rare", 3, 3)).unwrap();
        assert!(!status.has_open_affix);
    }

    #[test]
    fn test_other_rarities_have_no_open_slots() {
        for rarity in ["Normal", "Unique", "Currency"] {
            for (p, s) in [(0, 0), (1, 0), (0, 2)] {
                let status = open_affixes(&item(rarity, p, s)).unwrap();
                assert!(!status.has_open_affix, "{rarity} {p}/{s}");
                assert!(status.missing.is_empty());
            }
        }
    }

    #[test]
    fn test_requires_rarity() {
        assert_eq!(
            open_affixes("{ Prefix Modifier }\n10% increased Damage\n"),
            Err(ParseError::MissingRarity)
        );
    }
}
