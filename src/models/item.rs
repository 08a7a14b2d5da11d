use serde::{Deserialize, Serialize};
use super::item_type::{Influence, ItemRarity, ItemType};

const PLACEHOLDER_BASE: &str = "Unknown Item";

/// Gameplay properties collected from the property/requirement sections.
/// A zero means the property line was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProps {
    pub identified: bool,
    pub quality: u8,
    pub links: u8,
    pub item_level: u8,
    pub influence: Influence,
    pub corrupted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_type: ItemType,
    pub rarity: ItemRarity,
    pub base: String,
    pub name: String,
    pub affixes: Vec<String>,
    pub props: ItemProps,
}

impl Item {
    /// Stand-in for text that is not an item dump at all.
    pub fn placeholder() -> Self {
        Self {
            item_type: ItemType::Unknown,
            rarity: ItemRarity::Normal,
            base: PLACEHOLDER_BASE.to_string(),
            name: PLACEHOLDER_BASE.to_string(),
            affixes: Vec::new(),
            props: ItemProps::default(),
        }
    }

    pub fn is_unique(&self) -> bool {
        self.rarity == ItemRarity::Unique
    }

    /// Only real, classified items are worth a price lookup.
    pub fn has_price(&self) -> bool {
        self.item_type != ItemType::Unknown
    }

    /// Uniques are priced by display name, everything else by base type.
    pub fn lookup_key(&self) -> &str {
        if self.is_unique() {
            &self.name
        } else {
            &self.base
        }
    }
}
