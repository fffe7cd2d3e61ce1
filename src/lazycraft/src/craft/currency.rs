//! Currency actions the craft loop can request

use std::fmt;

use serde::{Deserialize, Serialize};

/// A currency-equivalent action applied to the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Normal -> Magic
    Transmutation,
    /// Adds one random affix to a Magic item with an open slot
    Augmentation,
    /// Rerolls the affixes of a Magic item
    Alteration,
    /// Any rarity -> Normal
    Scouring,
}

impl Currency {
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Transmutation => "Orb of Transmutation",
            Currency::Augmentation => "Orb of Augmentation",
            Currency::Alteration => "Orb of Alteration",
            Currency::Scouring => "Orb of Scouring",
        }
    }

    /// Index of the currency in the main currency stash tab layout.
    pub fn stash_index(&self) -> usize {
        match self {
            Currency::Transmutation => 1,
            Currency::Augmentation => 2,
            Currency::Alteration => 3,
            Currency::Scouring => 8,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stash_layout() {
        assert_eq!(Currency::Transmutation.stash_index(), 1);
        assert_eq!(Currency::Augmentation.stash_index(), 2);
        assert_eq!(Currency::Alteration.stash_index(), 3);
        assert_eq!(Currency::Scouring.stash_index(), 8);
    }

    #[test]
    fn test_display_uses_orb_name() {
        assert_eq!(Currency::Scouring.to_string(), "Orb of Scouring");
        assert_eq!(
            serde_json::to_string(&Currency::Augmentation).unwrap(),
            "\"augmentation\""
        );
    }
}
