use serde::{Deserialize, Deserializer, Serialize};

/// One price record from a poe.ninja overview document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItem {
    #[serde(alias = "currencyTypeName")]
    pub name: String,
    #[serde(
        rename = "chaosValue",
        alias = "chaosEquivalent",
        default,
        deserialize_with = "deserialize_price"
    )]
    pub price: f64,
    #[serde(default)]
    pub low_confidence: bool,
    #[serde(default)]
    pub map_tier: u32,
    #[serde(default)]
    pub links: u32,
    // base type entries publish the item level as their "required level"
    #[serde(rename = "levelRequired", alias = "itemLevel", default)]
    pub item_level: u32,
    #[serde(rename = "variant", alias = "influence", default)]
    pub influence: Option<String>,
    #[serde(default)]
    pub gem_level: u32,
    #[serde(default)]
    pub gem_quality: u32,
    #[serde(default)]
    pub corrupted: bool,
    #[serde(rename = "icon", alias = "iconUrl", default)]
    pub icon_url: Option<String>,
    /// Set by the resolver on the record it picked when the match is inexact
    /// or needs qualifying.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RemoteItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            low_confidence: false,
            map_tier: 0,
            links: 0,
            item_level: 0,
            influence: None,
            gem_level: 0,
            gem_quality: 0,
            corrupted: false,
            icon_url: None,
            reason: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Amount(f64),
    Summary { mean: f64 },
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawPrice::Amount(amount)) => amount,
        Some(RawPrice::Summary { mean }) => mean,
        None => 0.0,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyDetail {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Top level of a currency or item overview document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDocument {
    #[serde(default)]
    pub lines: Vec<RemoteItem>,
    #[serde(default)]
    pub currency_details: Vec<CurrencyDetail>,
}

/// What the caller shows for a priced item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub low_confidence: bool,
    pub reason: Option<String>,
}

impl From<&RemoteItem> for Price {
    fn from(item: &RemoteItem) -> Self {
        Self {
            amount: item.price,
            low_confidence: item.low_confidence,
            reason: item.reason.clone(),
        }
    }
}
