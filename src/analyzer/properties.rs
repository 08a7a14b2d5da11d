use std::collections::HashMap;

use super::sections::Section;
use crate::models::{Influence, ItemProps};

const MAX_QUALITY: u32 = 30;
const MAX_ITEM_LEVEL: u32 = 100;
const MIN_REPORTED_LINKS: u32 = 5;

/// Property and marker lines understood by the parser. Anything else in a
/// dump is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Quality,
    Sockets,
    ItemLevel,
    Level,
    MapTier,
    AttacksPerSecond,
    Requirements,
    Unidentified,
    Corrupted,
    Influence,
}

impl PropertyKey {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Quality" => Some(PropertyKey::Quality),
            "Sockets" => Some(PropertyKey::Sockets),
            "Item Level" => Some(PropertyKey::ItemLevel),
            "Level" => Some(PropertyKey::Level),
            "Map Tier" => Some(PropertyKey::MapTier),
            "Attacks per Second" => Some(PropertyKey::AttacksPerSecond),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyValue<'a> {
    pub section: usize,
    pub value: &'a str,
}

/// Every recognised property line of a dump, keyed by property and kept in
/// section order. Built in one pass and shared by all analyzers.
#[derive(Debug, Default)]
pub struct PropertyMap<'a> {
    entries: HashMap<PropertyKey, Vec<PropertyValue<'a>>>,
}

impl<'a> PropertyMap<'a> {
    pub fn scan(sections: &[Section<'a>]) -> Self {
        let mut map = Self::default();

        for (section, lines) in sections.iter().enumerate() {
            for line in lines {
                if let Some((key, value)) = classify_line(line) {
                    map.entries
                        .entry(key)
                        .or_default()
                        .push(PropertyValue { section, value });
                }
            }
        }

        map
    }

    pub fn first(&self, key: PropertyKey) -> Option<&'a str> {
        self.entries
            .get(&key)
            .and_then(|values| values.first())
            .map(|v| v.value)
    }

    pub fn first_in(&self, key: PropertyKey, section: usize) -> Option<&'a str> {
        self.entries
            .get(&key)?
            .iter()
            .find(|v| v.section == section)
            .map(|v| v.value)
    }

    pub fn section_of(&self, key: PropertyKey) -> Option<usize> {
        self.entries
            .get(&key)
            .and_then(|values| values.first())
            .map(|v| v.section)
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn item_props(&self) -> ItemProps {
        ItemProps {
            identified: !self.contains(PropertyKey::Unidentified),
            quality: self
                .first(PropertyKey::Quality)
                .and_then(leading_number)
                .map_or(0, |q| q.min(MAX_QUALITY) as u8),
            links: self
                .first(PropertyKey::Sockets)
                .map_or(0, largest_link_group),
            item_level: self
                .first(PropertyKey::ItemLevel)
                .and_then(leading_number)
                .map_or(0, |lvl| lvl.min(MAX_ITEM_LEVEL) as u8),
            influence: self
                .first(PropertyKey::Influence)
                .and_then(Influence::from_marker)
                .unwrap_or_default(),
            corrupted: self.contains(PropertyKey::Corrupted),
        }
    }
}

fn classify_line(line: &str) -> Option<(PropertyKey, &str)> {
    let trimmed = line.trim();
    match trimmed {
        "Unidentified" => return Some((PropertyKey::Unidentified, trimmed)),
        "Corrupted" => return Some((PropertyKey::Corrupted, trimmed)),
        "Requirements:" => return Some((PropertyKey::Requirements, trimmed)),
        _ => {}
    }
    if Influence::from_marker(trimmed).is_some() {
        return Some((PropertyKey::Influence, trimmed));
    }

    let (label, value) = trimmed.split_once(": ")?;
    PropertyKey::from_label(label).map(|key| (key, value.trim()))
}

/// Reads the number a property value starts with: `+20% (augmented)` is 20,
/// `20 (Max)` is 20.
pub fn leading_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Size of the biggest linked socket group, reported only for 5 and 6 links.
fn largest_link_group(sockets: &str) -> u8 {
    let largest = sockets
        .split_whitespace()
        .map(|group| group.split('-').count() as u32)
        .max()
        .unwrap_or(0);

    if largest >= MIN_REPORTED_LINKS {
        largest as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections<'a>(raw: &'a [&'a [&'a str]]) -> Vec<Section<'a>> {
        raw.iter().map(|s| s.to_vec()).collect()
    }

    #[test]
    fn test_scan_collects_props() {
        let raw: &[&[&str]] = &[
            &["Rarity: Rare", "Gale Spiral", "Titan Greaves"],
            &["Quality: +20% (augmented)", "Armour: 180"],
            &["Requirements:", "Level: 68", "Str: 120"],
            &["Sockets: R-R-R-G-G B "],
            &["Item Level: 84"],
            &["+42 to maximum Life"],
            &["Elder Item"],
            &["Corrupted"],
        ];
        let sections = sections(raw);
        let map = PropertyMap::scan(&sections);
        let props = map.item_props();

        assert!(props.identified);
        assert_eq!(props.quality, 20);
        assert_eq!(props.links, 5);
        assert_eq!(props.item_level, 84);
        assert_eq!(props.influence, Influence::Elder);
        assert!(props.corrupted);

        assert_eq!(map.section_of(PropertyKey::ItemLevel), Some(4));
        assert_eq!(map.section_of(PropertyKey::Requirements), Some(2));
        assert_eq!(map.first_in(PropertyKey::Level, 2), Some("68"));
        assert_eq!(map.first_in(PropertyKey::Level, 1), None);
    }

    #[test]
    fn test_absent_props_default_to_zero() {
        let raw: &[&[&str]] = &[
            &["Rarity: Magic", "Cobalt Jewel"],
            &["Item Level: 200"],
            &["Unidentified"],
            &["Some Unknown Property: 12"],
        ];
        let sections = sections(raw);
        let props = PropertyMap::scan(&sections).item_props();
        assert!(!props.identified);
        assert_eq!(props.quality, 0);
        assert_eq!(props.links, 0);
        assert_eq!(props.item_level, 100);
        assert_eq!(props.influence, Influence::None);
        assert!(!props.corrupted);
    }

    #[test]
    fn test_link_groups() {
        assert_eq!(largest_link_group("R-G-B-R-G-B"), 6);
        assert_eq!(largest_link_group("R-G-B-R G-B"), 0);
        assert_eq!(largest_link_group("W-W-W-W-W A"), 5);
        assert_eq!(largest_link_group(""), 0);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("+13% (augmented)"), Some(13));
        assert_eq!(leading_number("20 (Max)"), Some(20));
        assert_eq!(leading_number("n/a"), None);
    }
}
