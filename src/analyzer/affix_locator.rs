use super::properties::{PropertyKey, PropertyMap};
use super::sections::Section;
use crate::errors::{PricerError, Result};
use crate::models::{ItemCategory, ItemProps, ItemRarity, ItemType};

/// Where, if anywhere, a dump keeps its affix lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixLayout {
    /// Currency, cards, normal and unidentified items.
    NoAffixes,
    /// Gems: the stat block two sections below the requirements.
    GemStats,
    /// Equipment, flasks, jewels and maps: the first block after the item
    /// level that is not only enchants or implicits.
    AfterItemLevel,
}

impl AffixLayout {
    /// The layout table, keyed by rarity, item category and identification.
    pub fn for_item(rarity: ItemRarity, category: ItemCategory, identified: bool) -> Self {
        match (rarity, category, identified) {
            (_, ItemCategory::Currency | ItemCategory::DivinationCard | ItemCategory::Unknown, _) => {
                AffixLayout::NoAffixes
            }
            (_, ItemCategory::Gem, _) => AffixLayout::GemStats,
            (ItemRarity::Normal, _, _) => AffixLayout::NoAffixes,
            (_, _, false) => AffixLayout::NoAffixes,
            (
                ItemRarity::Magic | ItemRarity::Rare | ItemRarity::Unique,
                ItemCategory::Weapon
                | ItemCategory::Map
                | ItemCategory::Flask
                | ItemCategory::Jewel
                | ItemCategory::Generic,
                true,
            ) => AffixLayout::AfterItemLevel,
        }
    }
}

// gem dumps without a requirements block: name, properties, description, stats
const GEM_STATS_FALLBACK: usize = 3;
const GEM_STATS_AFTER_REQUIREMENTS: usize = 2;

pub struct AffixLocator<'s, 'a> {
    layout: AffixLayout,
    sections: &'s [Section<'a>],
    properties: &'s PropertyMap<'a>,
}

impl<'s, 'a> AffixLocator<'s, 'a> {
    pub fn new(
        rarity: ItemRarity,
        item_type: &ItemType,
        props: &ItemProps,
        sections: &'s [Section<'a>],
        properties: &'s PropertyMap<'a>,
    ) -> Self {
        Self {
            layout: AffixLayout::for_item(rarity, item_type.category(), props.identified),
            sections,
            properties,
        }
    }

    pub fn layout(&self) -> AffixLayout {
        self.layout
    }

    /// Index of the affix section, `None` for layouts without affixes.
    pub fn affix_index(&self) -> Result<Option<usize>> {
        let index = match self.layout {
            AffixLayout::NoAffixes => return Ok(None),
            AffixLayout::GemStats => self
                .properties
                .section_of(PropertyKey::Requirements)
                .map_or(GEM_STATS_FALLBACK, |req| req + GEM_STATS_AFTER_REQUIREMENTS),
            AffixLayout::AfterItemLevel => {
                let anchor = self
                    .properties
                    .section_of(PropertyKey::ItemLevel)
                    .ok_or(PricerError::MissingItemLevel)?;
                let mut index = anchor + 1;
                while self
                    .sections
                    .get(index)
                    .is_some_and(|section| is_enchant_or_implicit(section))
                {
                    index += 1;
                }
                index
            }
        };

        if index >= self.sections.len() {
            return Err(PricerError::AffixSectionOutOfRange {
                index,
                sections: self.sections.len(),
            });
        }
        Ok(Some(index))
    }

    pub fn affixes(&self) -> Result<Vec<String>> {
        let Some(index) = self.affix_index()? else {
            return Ok(Vec::new());
        };

        Ok(self.sections[index]
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

fn is_enchant_or_implicit(section: &Section<'_>) -> bool {
    !section.is_empty()
        && section.iter().all(|line| {
            let line = line.trim_end();
            line.ends_with("(enchant)") || line.ends_with("(implicit)")
        })
}
