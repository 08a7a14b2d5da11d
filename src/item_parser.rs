use tracing::debug;

use crate::analyzer::{
    split_sections, AffixLocator, NameSection, PropertyMap, StatsSection,
};
use crate::analyzer::stats_section::STATS_SECTION;
use crate::errors::Result;
use crate::models::{Item, ItemRarity};

/// Turns a "copy item as text" dump into an [`Item`].
pub struct ItemParser<S> {
    lines: Vec<S>,
}

impl ItemParser<String> {
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_string).collect())
    }
}

impl<S: AsRef<str>> ItemParser<S> {
    pub fn new(lines: Vec<S>) -> Self {
        Self { lines }
    }

    /// Text with fewer than two sections is not an item dump and yields
    /// [`Item::placeholder`]. An affix section the layout rules cannot place
    /// is an error.
    pub fn parse(&self) -> Result<Item> {
        let sections = split_sections(&self.lines);
        if sections.len() <= STATS_SECTION {
            debug!(sections = sections.len(), "not an item dump");
            return Ok(Item::placeholder());
        }

        let Some(name_section) = NameSection::analyze(&sections[0]) else {
            debug!("item header has no name line");
            return Ok(Item::placeholder());
        };

        let properties = PropertyMap::scan(&sections);
        let stats = StatsSection::analyze(&sections[STATS_SECTION], &properties);
        let item_type = stats.refine(name_section.category);
        let props = properties.item_props();

        let affixes = AffixLocator::new(
            name_section.rarity,
            &item_type,
            &props,
            &sections,
            &properties,
        )
        .affixes()?;

        let base = name_section.base_without_affixes(&affixes, props.identified)?;
        let name = if name_section.rarity == ItemRarity::Unique {
            name_section.item_name().to_string()
        } else {
            base.clone()
        };

        debug!(?item_type, rarity = ?name_section.rarity, %base, affixes = affixes.len(), "parsed item");

        Ok(Item {
            item_type,
            rarity: name_section.rarity,
            base,
            name,
            affixes,
            props,
        })
    }
}
