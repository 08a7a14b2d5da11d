use super::affix_names::strip_magic_affix_names;
use crate::errors::{PricerError, Result};
use crate::models::{ItemCategory, ItemRarity};

const RARITY_PREFIX: &str = "Rarity: ";
const QUALITY_PREFIX: &str = "Superior ";

/// What the header block of a dump says about the item. The final base is
/// only known once the affixes are, see [`NameSection::base_without_affixes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSection<'a> {
    pub rarity: ItemRarity,
    pub category: ItemCategory,
    name_line: Option<&'a str>,
    base_line: &'a str,
}

impl<'a> NameSection<'a> {
    /// Returns `None` when the header has no line after the rarity.
    pub fn analyze(section: &[&'a str]) -> Option<Self> {
        let rarity_label = section
            .first()
            .copied()
            .and_then(|line| line.trim().strip_prefix(RARITY_PREFIX))
            .unwrap_or_default();
        let rarity = ItemRarity::from_label(rarity_label);

        let first = section.get(1).copied().map(str::trim).filter(|l| !l.is_empty())?;
        let second = section.get(2).copied().map(str::trim).filter(|l| !l.is_empty());

        // unidentified rares and uniques only show their base
        let (name_line, base_line) = match second {
            Some(base) if rarity.has_name_line() => (Some(first), base),
            _ => (None, first),
        };
        let base_line = base_line.strip_prefix(QUALITY_PREFIX).unwrap_or(base_line);

        Some(Self {
            rarity,
            category: classify(rarity_label, base_line),
            name_line,
            base_line,
        })
    }

    /// Display name as printed in the header.
    pub fn item_name(&self) -> &'a str {
        self.name_line.unwrap_or(self.base_line)
    }

    pub fn base_line(&self) -> &'a str {
        self.base_line
    }

    /// The base type with magic affix names removed. Only identified magic
    /// items carry affix names in their header.
    pub fn base_without_affixes(&self, affixes: &[String], identified: bool) -> Result<String> {
        if self.rarity != ItemRarity::Magic || !identified || affixes.is_empty() {
            return Ok(self.base_line.to_string());
        }

        let affixes: Vec<&str> = affixes
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();
        let mut base = collapse_whitespace(strip_magic_affix_names(self.base_line, affixes.len().min(2)));
        // removing one affix can join text into another, so repeat until none is left
        while let Some(affix) = affixes.iter().find(|affix| base.contains(**affix)) {
            base = collapse_whitespace(&base.replacen(*affix, " ", 1));
        }

        if base.is_empty() {
            return Err(PricerError::MagicBaseUnrecoverable {
                header: self.base_line.to_string(),
            });
        }
        Ok(base)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn classify(rarity_label: &str, base_line: &str) -> ItemCategory {
    match rarity_label {
        "Currency" => return ItemCategory::Currency,
        "Gem" => return ItemCategory::Gem,
        "Divination Card" => return ItemCategory::DivinationCard,
        _ => {}
    }

    let has_word = |word: &str| base_line.split_whitespace().any(|w| w == word);
    if has_word("Map") {
        ItemCategory::Map
    } else if has_word("Flask") {
        ItemCategory::Flask
    } else if has_word("Jewel") {
        ItemCategory::Jewel
    } else {
        ItemCategory::Unknown
    }
}
