use tracing::debug;

use crate::data::PriceIndex;
use crate::errors::{PricerError, Result};
use crate::models::{Influence, Item, Price, RemoteItem};

/// Outcome of a price lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The chosen record, carrying a `reason` when the match needs qualifying.
    Priced(RemoteItem),
    /// The price database has no entry under the item's name or base.
    Unpriced,
}

impl Resolution {
    pub fn price(&self) -> Option<Price> {
        match self {
            Resolution::Priced(remote) => Some(ItemResolver::appraise(remote)),
            Resolution::Unpriced => None,
        }
    }
}

/// Picks the price record that best represents an item from one snapshot of
/// the price index.
pub struct ItemResolver<'a> {
    index: &'a PriceIndex,
}

impl<'a> ItemResolver<'a> {
    pub fn new(index: &'a PriceIndex) -> Self {
        Self { index }
    }

    pub fn has_item(&self, item: &Item) -> bool {
        self.index.contains(item.lookup_key())
    }

    pub fn resolve(&self, item: &Item) -> Result<Resolution> {
        let key = item.lookup_key();
        let Some(candidates) = self.index.get(key) else {
            debug!(key, "no price data");
            return Ok(Resolution::Unpriced);
        };

        let chosen = choose_candidate(item, candidates).ok_or_else(|| {
            PricerError::EmptyCandidates {
                key: key.to_string(),
            }
        })?;
        debug!(key, candidates = candidates.len(), reason = ?chosen.reason, "resolved price");

        Ok(Resolution::Priced(chosen))
    }

    pub fn appraise(remote: &RemoteItem) -> Price {
        Price::from(remote)
    }
}

/// Runs the matching rules in priority order. Returns `None` only for an
/// empty candidate list.
pub fn choose_candidate(item: &Item, candidates: &[RemoteItem]) -> Option<RemoteItem> {
    if let [only] = candidates {
        return Some(only.clone());
    }

    match_map_tier(item, candidates)
        .or_else(|| match_links(item, candidates))
        .or_else(|| match_item_level(item, candidates))
        .or_else(|| match_gem(item, candidates))
        .or_else(|| candidates.first().cloned())
}

fn match_map_tier(item: &Item, candidates: &[RemoteItem]) -> Option<RemoteItem> {
    let tier = u32::from(item.item_type.map_tier()?);
    candidates.iter().find(|c| c.map_tier == tier).cloned()
}

fn match_links(item: &Item, candidates: &[RemoteItem]) -> Option<RemoteItem> {
    let links = u32::from(item.props.links);
    if !item.is_unique() || links == 0 {
        return None;
    }

    candidates
        .iter()
        .find(|c| c.links == links)
        .or_else(|| candidates.iter().rfind(|c| c.links == 0))
        .cloned()
}

fn match_item_level(item: &Item, candidates: &[RemoteItem]) -> Option<RemoteItem> {
    if !item.item_type.has_item_level() || item.is_unique() {
        return None;
    }

    let target = u32::from(item.props.item_level);
    let influence = item.props.influence;
    let chosen = candidates
        .iter()
        .filter(|c| influence.matches_label(c.influence.as_deref()))
        .min_by_key(|c| c.item_level.abs_diff(target))?;

    let mut reason = format!(
        "{}ilvl {}",
        closeness(chosen.item_level == target),
        chosen.item_level
    );
    if influence != Influence::None {
        reason.push_str(&format!(", {influence} base"));
    }

    Some(with_reason(chosen, reason))
}

fn match_gem(item: &Item, candidates: &[RemoteItem]) -> Option<RemoteItem> {
    let target_level = u32::from(item.item_type.gem_level()?);
    let target_quality = u32::from(item.props.quality);
    let corrupted = item.props.corrupted;

    // equal distances go to the lower value so list order never decides
    let level = candidates
        .iter()
        .map(|c| c.gem_level)
        .min_by_key(|level| (level.abs_diff(target_level), *level))?;
    let quality = candidates
        .iter()
        .filter(|c| c.gem_level == level)
        .map(|c| c.gem_quality)
        .min_by_key(|quality| (quality.abs_diff(target_quality), *quality))?;

    let mut survivors = candidates
        .iter()
        .filter(|c| c.gem_level == level && c.gem_quality == quality);
    let chosen = survivors
        .clone()
        .find(|c| c.corrupted == corrupted)
        .or_else(|| survivors.next())?;

    let exact = level == target_level && quality == target_quality && chosen.corrupted == corrupted;
    let reason = format!(
        "{}gem level {}, {} quality{}",
        closeness(exact),
        level,
        quality,
        if chosen.corrupted { ", corrupted" } else { "" }
    );

    Some(with_reason(chosen, reason))
}

fn closeness(exact: bool) -> &'static str {
    if exact {
        ""
    } else {
        "closest to "
    }
}

fn with_reason(candidate: &RemoteItem, reason: String) -> RemoteItem {
    RemoteItem {
        reason: Some(reason),
        ..candidate.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::models::{ItemProps, ItemRarity, ItemType};

    fn item(item_type: ItemType, rarity: ItemRarity, props: ItemProps) -> Item {
        Item {
            item_type,
            rarity,
            base: "Base".to_string(),
            name: "Base".to_string(),
            affixes: Vec::new(),
            props,
        }
    }

    fn remote(price: f64, edit: impl FnOnce(&mut RemoteItem)) -> RemoteItem {
        let mut remote = RemoteItem::new("Base", price);
        edit(&mut remote);
        remote
    }

    #[test]
    fn test_single_candidate_is_returned_as_is() {
        let item = item(ItemType::Generic, ItemRarity::Rare, ItemProps::default());
        let candidates = vec![remote(3.0, |r| r.item_level = 86)];
        let chosen = choose_candidate(&item, &candidates).unwrap();
        assert_eq!(chosen.price, 3.0);
        assert!(chosen.reason.is_none());
    }

    #[test]
    fn test_map_tier_wins_over_later_rules() {
        let item = item(ItemType::Map { tier: 14 }, ItemRarity::Unique, ItemProps {
            links: 5,
            ..ItemProps::default()
        });
        let candidates = vec![
            remote(1.0, |r| {
                r.map_tier = 13;
                r.links = 5;
            }),
            remote(2.0, |r| r.map_tier = 14),
        ];
        let chosen = choose_candidate(&item, &candidates).unwrap();
        assert_eq!(chosen.price, 2.0);
        assert!(chosen.reason.is_none());
    }

    #[test]
    fn test_unique_links_prefer_exact_then_unlinked() {
        let props = ItemProps {
            links: 5,
            ..ItemProps::default()
        };
        let unique = item(ItemType::Generic, ItemRarity::Unique, props);

        let candidates = vec![remote(1.0, |r| r.links = 0), remote(9.0, |r| r.links = 6)];
        let chosen = choose_candidate(&unique, &candidates).unwrap();
        assert_eq!(chosen.price, 1.0);
        assert!(chosen.reason.is_none());

        let candidates = vec![
            remote(1.0, |r| r.links = 0),
            remote(5.0, |r| r.links = 5),
            remote(9.0, |r| r.links = 6),
        ];
        assert_eq!(choose_candidate(&unique, &candidates).unwrap().price, 5.0);
    }

    #[test]
    fn test_unlinked_fallback_takes_last_listed() {
        let unique = item(ItemType::Generic, ItemRarity::Unique, ItemProps {
            links: 5,
            ..ItemProps::default()
        });
        let candidates = vec![
            remote(1.0, |r| r.links = 0),
            remote(9.0, |r| r.links = 6),
            remote(2.0, |r| r.links = 0),
        ];
        let chosen = choose_candidate(&unique, &candidates).unwrap();
        assert_eq!(chosen.price, 2.0);
        assert!(chosen.reason.is_none());
    }

    #[test]
    fn test_item_level_matches_influence_first() {
        let rare = item(ItemType::Generic, ItemRarity::Rare, ItemProps {
            item_level: 84,
            ..ItemProps::default()
        });
        let candidates = vec![
            remote(10.0, |r| {
                r.item_level = 86;
                r.influence = Some("shaper".to_string());
            }),
            remote(2.0, |r| r.item_level = 83),
        ];
        let chosen = choose_candidate(&rare, &candidates).unwrap();
        assert_eq!(chosen.price, 2.0);
        assert_eq!(chosen.reason.as_deref(), Some("closest to ilvl 83"));
        // the snapshot itself is left untouched
        assert!(candidates[1].reason.is_none());
    }

    #[test]
    fn test_item_level_reason_names_influence() {
        let shaper = item(ItemType::Generic, ItemRarity::Rare, ItemProps {
            item_level: 86,
            influence: Influence::Shaper,
            ..ItemProps::default()
        });
        let candidates = vec![
            remote(2.0, |r| r.item_level = 86),
            remote(10.0, |r| {
                r.item_level = 86;
                r.influence = Some("Shaper".to_string());
            }),
        ];
        let chosen = choose_candidate(&shaper, &candidates).unwrap();
        assert_eq!(chosen.price, 10.0);
        assert_eq!(chosen.reason.as_deref(), Some("ilvl 86, shaper base"));
    }

    #[test]
    fn test_gem_nearest_match() {
        let gem = item(ItemType::Gem { level: 20 }, ItemRarity::Normal, ItemProps {
            quality: 13,
            ..ItemProps::default()
        });
        let candidates = vec![
            remote(1.0, |r| {
                r.gem_level = 20;
                r.gem_quality = 20;
            }),
            remote(2.0, |r| r.gem_level = 20),
            remote(3.0, |r| {
                r.gem_level = 21;
                r.gem_quality = 20;
                r.corrupted = true;
            }),
        ];
        let chosen = choose_candidate(&gem, &candidates).unwrap();
        assert_eq!(chosen.price, 1.0);
        assert_eq!(chosen.reason.as_deref(), Some("closest to gem level 20, 20 quality"));
    }

    #[test]
    fn test_gem_exact_match_prefers_corruption_state() {
        let gem = item(ItemType::Gem { level: 21 }, ItemRarity::Normal, ItemProps {
            quality: 20,
            corrupted: true,
            ..ItemProps::default()
        });
        let candidates = vec![
            remote(1.0, |r| {
                r.gem_level = 21;
                r.gem_quality = 20;
            }),
            remote(7.0, |r| {
                r.gem_level = 21;
                r.gem_quality = 20;
                r.corrupted = true;
            }),
        ];
        let chosen = choose_candidate(&gem, &candidates).unwrap();
        assert_eq!(chosen.price, 7.0);
        assert_eq!(chosen.reason.as_deref(), Some("gem level 21, 20 quality, corrupted"));
    }

    #[test]
    fn test_gem_ties_ignore_candidate_order() {
        let gem = item(ItemType::Gem { level: 20 }, ItemRarity::Normal, ItemProps {
            quality: 10,
            ..ItemProps::default()
        });
        let low = remote(1.0, |r| r.gem_level = 20);
        let high = remote(5.0, |r| {
            r.gem_level = 20;
            r.gem_quality = 20;
        });

        let forward = choose_candidate(&gem, &[low.clone(), high.clone()]).unwrap();
        let backward = choose_candidate(&gem, &[high, low]).unwrap();
        assert_eq!(forward.price, 1.0);
        assert_eq!(backward.price, 1.0);
    }

    #[test]
    fn test_fallback_is_first_candidate() {
        let unique = item(ItemType::Generic, ItemRarity::Unique, ItemProps::default());
        let candidates = vec![
            remote(4.0, |r| {
                r.item_level = 86;
                r.influence = Some("elder".to_string());
            }),
            remote(8.0, |r| {
                r.gem_level = 20;
                r.influence = Some("hunter".to_string());
            }),
        ];
        let chosen = choose_candidate(&unique, &candidates).unwrap();
        assert_eq!(chosen.price, 4.0);
        assert!(chosen.reason.is_none());

        // no candidate shares the influence, so item level falls through too
        let rare = item(ItemType::Generic, ItemRarity::Rare, ItemProps::default());
        assert_eq!(choose_candidate(&rare, &candidates).unwrap().price, 4.0);
    }

    #[test]
    fn test_empty_candidates_yield_nothing() {
        let rare = item(ItemType::Generic, ItemRarity::Rare, ItemProps::default());
        assert!(choose_candidate(&rare, &[]).is_none());
    }

    #[test]
    fn test_resolver_outcomes() {
        let index = PriceIndex::from(HashMap::from([
            ("Exalted Orb".to_string(), vec![RemoteItem::new("Exalted Orb", 150.0)]),
            ("Broken Entry".to_string(), Vec::new()),
        ]));
        let resolver = ItemResolver::new(&index);

        let mut currency = item(ItemType::Currency, ItemRarity::Normal, ItemProps::default());
        currency.base = "Exalted Orb".to_string();
        assert!(resolver.has_item(&currency));
        let resolution = resolver.resolve(&currency).unwrap();
        assert_eq!(resolution.price().map(|p| p.amount), Some(150.0));

        currency.base = "Orb of Nothing".to_string();
        assert!(!resolver.has_item(&currency));
        assert_eq!(resolver.resolve(&currency).unwrap(), Resolution::Unpriced);

        currency.base = "Broken Entry".to_string();
        assert!(matches!(
            resolver.resolve(&currency),
            Err(PricerError::EmptyCandidates { .. })
        ));
    }
}
