//! Parser seam used by the craft loop
//!
//! All text patterns live behind [`ModParser`], so the session never touches
//! regexes directly and another strategy can be dropped in.

use serde::{Deserialize, Serialize};

use crate::affix::AffixStatus;
use crate::item::{self, ItemDetails, ItemRarity, ParseError};
use crate::modifier::{self, Modifier};

/// Text analysis operations needed to drive a craft.
pub trait ModParser {
    fn item_details(&self, text: &str) -> ItemDetails;

    /// Fails when the text is not an item.
    fn item_rarity(&self, text: &str) -> Result<ItemRarity, ParseError>;

    fn parse_mods(&self, text: &str) -> Vec<Modifier>;

    /// Placeholder form used on both sides of a target comparison.
    fn normalize(&self, value: &str) -> String;

    fn open_affixes(&self, text: &str) -> Result<AffixStatus, ParseError> {
        let rarity = self.item_rarity(text)?;
        Ok(AffixStatus::from_mods(&rarity, &self.parse_mods(text)))
    }

    /// Every target must be contained in at least one normalized item mod.
    fn compare_mods(&self, item_mods: &[Modifier], targets: &[String]) -> bool {
        let normalized: Vec<String> = item_mods
            .iter()
            .map(|m| self.normalize(&m.normalized_value))
            .collect();

        targets.iter().all(|target| {
            let target = self.normalize(target);
            normalized.iter().any(|m| m.contains(target.as_str()))
        })
    }

    /// Parse everything the craft loop needs from one read of the item.
    fn snapshot(&self, text: &str, targets: &[String]) -> Result<ItemSnapshot, ParseError> {
        let rarity = self.item_rarity(text)?;
        let mods = self.parse_mods(text);
        let affixes = AffixStatus::from_mods(&rarity, &mods);
        let matched = self.compare_mods(&mods, targets);

        Ok(ItemSnapshot {
            text: text.to_string(),
            rarity,
            mods,
            affixes,
            matched,
        })
    }
}

/// Regex parser for the advanced item description layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextModParser;

impl ModParser for TextModParser {
    fn item_details(&self, text: &str) -> ItemDetails {
        item::parse_item_details(text)
    }

    fn item_rarity(&self, text: &str) -> Result<ItemRarity, ParseError> {
        item::item_rarity(text)
    }

    fn parse_mods(&self, text: &str) -> Vec<Modifier> {
        modifier::parse_mods(text)
    }

    fn normalize(&self, value: &str) -> String {
        modifier::normalize_mod(value)
    }
}

/// Parsed state of an item at one point of a craft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    #[serde(skip)]
    pub text: String,
    pub rarity: ItemRarity,
    pub mods: Vec<Modifier>,
    pub affixes: AffixStatus,
    /// Whether `mods` satisfied the targets the snapshot was taken against
    pub matched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierType;

    const RARE_RING: &str = "Item Class: Rings\n\
        Rarity: Rare\n\
        Rapture Loop\n\
        Sapphire Ring\n\
        --------\n\
        { Prefix Modifier \"Hale\" (Tier: 8) — Life }\n\
        +15(10-19) to maximum Life\n\
        { Suffix Modifier \"of the Seal\" (Tier: 6) — Elemental, Cold, Resistance }\n\
        +14(12-17)% to Cold Resistance\n";

    #[test]
    fn test_snapshot() {
        let parser = TextModParser;
        let targets = vec!["to maximum Life".to_string()];
        let snapshot = parser.snapshot(RARE_RING, &targets).unwrap();

        assert_eq!(snapshot.rarity, ItemRarity::Rare);
        assert_eq!(snapshot.mods.len(), 2);
        assert!(snapshot.matched);
        assert!(snapshot.affixes.has_open_affix);
        assert_eq!(
            snapshot.affixes.missing,
            vec![ModifierType::Prefix, ModifierType::Suffix]
        );
    }

    #[test]
    fn test_snapshot_unmatched() {
        let targets = vec!["to Fire Resistance".to_string()];
        let snapshot = TextModParser.snapshot(RARE_RING, &targets).unwrap();
        assert!(!snapshot.matched);
    }

    #[test]
    fn test_snapshot_requires_rarity() {
        assert_eq!(
            TextModParser.snapshot("clipboard noise", &[]),
            Err(ParseError::MissingRarity)
        );
    }

    #[test]
    fn test_trait_agrees_with_free_functions() {
        let parser = TextModParser;
        let mods = parser.parse_mods(RARE_RING);
        let targets = vec!["to maximum Life".to_string(), "#% to Cold Resistance".to_string()];
        assert_eq!(
            parser.compare_mods(&mods, &targets),
            modifier::compare_mods(&mods, &targets)
        );
        assert_eq!(
            parser.open_affixes(RARE_RING),
            crate::affix::open_affixes(RARE_RING)
        );
        assert_eq!(parser.item_details(RARE_RING).name.as_deref(), Some("Rapture Loop"));
    }
}
