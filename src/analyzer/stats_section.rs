use super::properties::{leading_number, PropertyKey, PropertyMap};
use super::sections::Section;
use crate::models::{ItemCategory, ItemType, WeaponKind};

/// Index of the block right below the header.
pub const STATS_SECTION: usize = 1;

const MAX_GEM_LEVEL: u32 = 21;

/// Refinements read from the second block of a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSection {
    pub weapon: Option<WeaponKind>,
    pub map_tier: u8,
    pub gem_level: u8,
}

impl StatsSection {
    pub fn analyze(section: &Section<'_>, properties: &PropertyMap<'_>) -> Self {
        // weapons open their stats with the weapon class line
        let weapon = properties
            .first_in(PropertyKey::AttacksPerSecond, STATS_SECTION)
            .map(|_| {
                section
                    .first()
                    .map_or(WeaponKind::Other, |class| WeaponKind::from_class(class))
            });

        let map_tier = properties
            .first_in(PropertyKey::MapTier, STATS_SECTION)
            .and_then(leading_number)
            .map_or(0, |tier| tier.min(u32::from(u8::MAX)) as u8);

        // "Level" here is the gem's own level; requirement levels live in a
        // later block
        let gem_level = properties
            .first_in(PropertyKey::Level, STATS_SECTION)
            .and_then(leading_number)
            .map_or(0, |level| level.min(MAX_GEM_LEVEL) as u8);

        Self {
            weapon,
            map_tier,
            gem_level,
        }
    }

    /// Builds the final item type for a header classification. Only an
    /// unclassified header falls back to the weapon check.
    pub fn refine(&self, category: ItemCategory) -> ItemType {
        match category {
            ItemCategory::Unknown => self.weapon.map_or(ItemType::Generic, ItemType::Weapon),
            ItemCategory::Weapon => ItemType::Weapon(self.weapon.unwrap_or(WeaponKind::Other)),
            ItemCategory::Map => ItemType::Map {
                tier: self.map_tier,
            },
            ItemCategory::Gem => ItemType::Gem {
                level: self.gem_level,
            },
            ItemCategory::Currency => ItemType::Currency,
            ItemCategory::DivinationCard => ItemType::DivinationCard,
            ItemCategory::Flask => ItemType::Flask,
            ItemCategory::Jewel => ItemType::Jewel,
            ItemCategory::Generic => ItemType::Generic,
        }
    }
}
