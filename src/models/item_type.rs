use serde::{Deserialize, Serialize};
use std::fmt;

/// First-pass classification read off the item header, before any
/// per-type parameters (map tier, gem level) are known. The header only
/// yields `Map`, `Gem`, `Currency`, `DivinationCard`, `Flask`, `Jewel` and
/// `Unknown`; `Weapon` and `Generic` come from [`ItemType::category`] after the
/// stats section refines an unknown header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Map,
    Gem,
    Currency,
    DivinationCard,
    Flask,
    Jewel,
    Generic,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemRarity {
    #[default]
    Normal,
    Magic,
    Rare,
    Unique,
}

impl ItemRarity {
    /// Maps the value of a `Rarity:` line. Anything unrecognised is Normal,
    /// which includes the `Currency`, `Gem` and `Divination Card` labels.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Magic" => ItemRarity::Magic,
            "Rare" => ItemRarity::Rare,
            "Unique" => ItemRarity::Unique,
            _ => ItemRarity::Normal,
        }
    }

    /// Rare and unique headers carry a name line above the base line.
    pub fn has_name_line(&self) -> bool {
        matches!(self, ItemRarity::Rare | ItemRarity::Unique)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    OneHandedAxe,
    TwoHandedAxe,
    OneHandedSword,
    ThrustingOneHandedSword,
    TwoHandedSword,
    OneHandedMace,
    TwoHandedMace,
    Sceptre,
    Bow,
    Claw,
    Dagger,
    RuneDagger,
    Wand,
    Staff,
    Warstaff,
    FishingRod,
    Other,
}

impl WeaponKind {
    /// Maps the weapon class line printed at the top of a weapon's stats.
    pub fn from_class(class: &str) -> Self {
        match class.trim() {
            "One Handed Axe" => WeaponKind::OneHandedAxe,
            "Two Handed Axe" => WeaponKind::TwoHandedAxe,
            "One Handed Sword" => WeaponKind::OneHandedSword,
            "Thrusting One Handed Sword" => WeaponKind::ThrustingOneHandedSword,
            "Two Handed Sword" => WeaponKind::TwoHandedSword,
            "One Handed Mace" => WeaponKind::OneHandedMace,
            "Two Handed Mace" => WeaponKind::TwoHandedMace,
            "Sceptre" => WeaponKind::Sceptre,
            "Bow" => WeaponKind::Bow,
            "Claw" => WeaponKind::Claw,
            "Dagger" => WeaponKind::Dagger,
            "Rune Dagger" => WeaponKind::RuneDagger,
            "Wand" => WeaponKind::Wand,
            "Staff" => WeaponKind::Staff,
            "Warstaff" => WeaponKind::Warstaff,
            "Fishing Rod" => WeaponKind::FishingRod,
            _ => WeaponKind::Other,
        }
    }
}

/// Fully parametrised item type. Tier and level are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Generic,
    Weapon(WeaponKind),
    Map { tier: u8 },
    Gem { level: u8 },
    Currency,
    DivinationCard,
    Flask,
    Jewel,
    Unknown,
}

impl ItemType {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemType::Generic => ItemCategory::Generic,
            ItemType::Weapon(_) => ItemCategory::Weapon,
            ItemType::Map { .. } => ItemCategory::Map,
            ItemType::Gem { .. } => ItemCategory::Gem,
            ItemType::Currency => ItemCategory::Currency,
            ItemType::DivinationCard => ItemCategory::DivinationCard,
            ItemType::Flask => ItemCategory::Flask,
            ItemType::Jewel => ItemCategory::Jewel,
            ItemType::Unknown => ItemCategory::Unknown,
        }
    }

    /// Types whose price entries are split by base item level and influence.
    pub fn has_item_level(&self) -> bool {
        matches!(
            self,
            ItemType::Generic | ItemType::Weapon(_) | ItemType::Jewel
        )
    }

    pub fn map_tier(&self) -> Option<u8> {
        match self {
            ItemType::Map { tier } => Some(*tier),
            _ => None,
        }
    }

    pub fn gem_level(&self) -> Option<u8> {
        match self {
            ItemType::Gem { level } => Some(*level),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Influence {
    #[default]
    None,
    Shaper,
    Elder,
    Crusader,
    Hunter,
    Redeemer,
    Warlord,
}

impl Influence {
    /// Recognises the `<Influence> Item` marker lines.
    pub fn from_marker(line: &str) -> Option<Self> {
        match line.trim() {
            "Shaper Item" => Some(Influence::Shaper),
            "Elder Item" => Some(Influence::Elder),
            "Crusader Item" => Some(Influence::Crusader),
            "Hunter Item" => Some(Influence::Hunter),
            "Redeemer Item" => Some(Influence::Redeemer),
            "Warlord Item" => Some(Influence::Warlord),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Influence::None => "none",
            Influence::Shaper => "shaper",
            Influence::Elder => "elder",
            Influence::Crusader => "crusader",
            Influence::Hunter => "hunter",
            Influence::Redeemer => "redeemer",
            Influence::Warlord => "warlord",
        }
    }

    /// Case-insensitive comparison against a price record's influence label,
    /// where a missing or blank label means "none".
    pub fn matches_label(&self, label: Option<&str>) -> bool {
        let label = label.map(str::trim).filter(|l| !l.is_empty()).unwrap_or("none");
        label.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Influence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
