use std::time::{Duration, Instant};

use reqwest::{Client, Request, StatusCode};
use tracing::{debug, warn};

use crate::errors::{PricerError, Result};

const BASE_URL: &str = "https://poe.ninja/api/data";
const MAX_RETRIES: u32 = 3;
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);

/// Documents served by the currency overview endpoint.
pub const CURRENCY_TYPES: &[&str] = &["Currency", "Fragment"];

/// Documents served by the item overview endpoint.
pub const ITEM_TYPES: &[&str] = &[
    "Oil",
    "Incubator",
    "Scarab",
    "Fossil",
    "Resonator",
    "Essence",
    "DivinationCard",
    "Prophecy",
    "SkillGem",
    "BaseType",
    "HelmetEnchant",
    "UniqueMap",
    "Map",
    "UniqueJewel",
    "UniqueFlask",
    "UniqueWeapon",
    "UniqueArmour",
    "UniqueAccessory",
    "Beast",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overview {
    Currency,
    Item,
}

impl Overview {
    fn endpoint(&self) -> &'static str {
        match self {
            Overview::Currency => "currencyoverview",
            Overview::Item => "itemoverview",
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", BASE_URL, self.endpoint())
    }
}

/// Every document type with the overview that serves it.
pub fn all_documents() -> impl Iterator<Item = (Overview, &'static str)> {
    CURRENCY_TYPES
        .iter()
        .map(|t| (Overview::Currency, *t))
        .chain(ITEM_TYPES.iter().map(|t| (Overview::Item, *t)))
}

pub struct NinjaClient {
    client: Client,
    last_request: Option<Instant>,
    request_delay: Duration,
}

impl NinjaClient {
    pub fn new(request_delay: Duration) -> Self {
        Self {
            client: Client::new(),
            last_request: None,
            request_delay,
        }
    }

    /// Builds the overview request; reqwest encodes the query so league
    /// names may hold any character.
    pub fn build_request(&self, overview: Overview, doc_type: &str, league: &str) -> Result<Request> {
        Ok(self
            .client
            .get(overview.url())
            .query(&[("type", doc_type), ("league", league)])
            .header("User-Agent", concat!("poe-pricer/", env!("CARGO_PKG_VERSION")))
            .header("Accept", "application/json")
            .build()?)
    }

    /// Fetches one overview document as raw JSON text.
    pub async fn download(&mut self, overview: Overview, doc_type: &str, league: &str) -> Result<String> {
        let mut url = overview.url();

        for attempt in 0..=MAX_RETRIES {
            // jitter keeps consecutive refreshes from hitting the API in lockstep
            let delay = self.request_delay + Duration::from_millis(rand::random::<u64>() % 100);
            self.respect_rate_limit(delay).await;

            let request = self.build_request(overview, doc_type, league)?;
            url = request.url().to_string();
            debug!(%url, attempt, "downloading price document");
            let response = self.client.execute(request).await?;
            self.last_request = Some(Instant::now());

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!(%url, attempt, "rate limited, backing off");
                tokio::time::sleep(RATE_LIMIT_BACKOFF * (attempt + 1)).await;
                continue;
            }
            if !status.is_success() {
                return Err(PricerError::Api {
                    status: status.as_u16(),
                    url,
                });
            }

            return Ok(response.text().await?);
        }

        Err(PricerError::RateLimited { url })
    }

    async fn respect_rate_limit(&self, delay: Duration) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < delay {
                tokio::time::sleep(delay - elapsed).await;
            }
        }
    }
}
