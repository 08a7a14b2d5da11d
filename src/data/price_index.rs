use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, error};

use crate::errors::{PricerError, Result};
use crate::models::{CurrencyDetail, PriceDocument, RemoteItem};

/// In-memory price database: item name to every record published under it,
/// in document order.
#[derive(Debug, Default, Clone)]
pub struct PriceIndex {
    items: HashMap<String, Vec<RemoteItem>>,
}

impl PriceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: RemoteItem) {
        self.items.entry(item.name.clone()).or_default().push(item);
    }

    /// Adds every line of a document, then attaches the document's currency
    /// icons to the records loaded so far.
    pub fn add_document(&mut self, document: PriceDocument) -> usize {
        let count = document.lines.len();
        for line in document.lines {
            self.insert(line);
        }
        self.merge_currency_details(&document.currency_details);
        count
    }

    fn merge_currency_details(&mut self, details: &[CurrencyDetail]) {
        for detail in details {
            let Some(icon) = detail.icon.as_ref() else {
                continue;
            };
            if let Some(records) = self.items.get_mut(&detail.name) {
                for record in records {
                    record.icon_url = Some(icon.clone());
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[RemoteItem]> {
        self.items.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Loads one cached document. An unreadable document is logged and
    /// skipped so the rest of the cache still loads.
    pub async fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        if !tokio::fs::try_exists(path).await? {
            return Err(PricerError::MissingCacheFile(path.to_path_buf()));
        }

        let content = tokio::fs::read_to_string(path).await?;
        match serde_json::from_str::<PriceDocument>(&content) {
            Ok(document) => {
                let count = self.add_document(document);
                debug!(path = %path.display(), count, "loaded price document");
                Ok(count)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "skipping unparsable price document");
                Ok(0)
            }
        }
    }

    /// Builds an index from `<dir>/<Type>.json` for each document type.
    pub async fn load_dir<'t>(dir: &Path, types: impl IntoIterator<Item = &'t str>) -> Result<Self> {
        let mut index = Self::new();
        for doc_type in types {
            index
                .load_from_file(&dir.join(format!("{doc_type}.json")))
                .await?;
        }
        Ok(index)
    }

    pub fn get_cache_stats(&self) -> serde_json::Value {
        let records: usize = self.items.values().map(Vec::len).sum();
        let low_confidence = self
            .items
            .values()
            .flatten()
            .filter(|item| item.low_confidence)
            .count();

        serde_json::json!({
            "names": self.items.len(),
            "records": records,
            "low_confidence": low_confidence,
        })
    }
}

impl From<HashMap<String, Vec<RemoteItem>>> for PriceIndex {
    fn from(items: HashMap<String, Vec<RemoteItem>>) -> Self {
        Self { items }
    }
}

impl FromIterator<RemoteItem> for PriceIndex {
    fn from_iter<I: IntoIterator<Item = RemoteItem>>(iter: I) -> Self {
        let mut index = Self::new();
        for item in iter {
            index.insert(item);
        }
        index
    }
}
