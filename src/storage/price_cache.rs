use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::Settings;
use crate::data::PriceIndex;
use crate::errors::Result;
use crate::fetcher::{all_documents, NinjaClient};

const STAMP_FILE: &str = ".last-updated";

/// On-disk copy of the league's price documents plus the index built from
/// them. Readers take an `Arc` snapshot; a refresh swaps in a fully built
/// index or leaves the previous one in place.
pub struct PriceCache {
    dir: PathBuf,
    league: String,
    refresh_interval: Duration,
    index: RwLock<Arc<PriceIndex>>,
}

impl PriceCache {
    pub fn new(data_dir: &Path, league: &str, refresh_interval: Duration) -> Self {
        Self {
            dir: data_dir.join("poe-ninja").join(league),
            league: league.to_string(),
            refresh_interval,
            index: RwLock::new(Arc::new(PriceIndex::new())),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.data_dir, &settings.league, settings.refresh_interval)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn snapshot(&self) -> Arc<PriceIndex> {
        Arc::clone(&*self.index.read().await)
    }

    pub async fn last_updated(&self) -> Option<SystemTime> {
        let stamp = tokio::fs::read_to_string(self.dir.join(STAMP_FILE)).await.ok()?;
        let secs = stamp.trim().parse::<u64>().ok()?;
        Some(UNIX_EPOCH + Duration::from_secs(secs))
    }

    pub async fn is_stale(&self) -> bool {
        match self.last_updated().await {
            Some(updated) => updated.elapsed().unwrap_or_default() >= self.refresh_interval,
            None => true,
        }
    }

    /// Rebuilds the index from the files on disk.
    pub async fn load(&self) -> Result<Arc<PriceIndex>> {
        let types = all_documents().map(|(_, doc_type)| doc_type);
        match PriceIndex::load_dir(&self.dir, types).await {
            Ok(index) => {
                let index = Arc::new(index);
                *self.index.write().await = Arc::clone(&index);
                info!(league = %self.league, names = index.len(), "price index loaded");
                Ok(index)
            }
            Err(e) => {
                warn!(league = %self.league, error = %e, "keeping previous price index");
                Err(e)
            }
        }
    }

    /// Writes downloaded documents and the update stamp. The files are
    /// written to a staging directory next to the cache and swapped in only
    /// once every write succeeded, so a failure leaves the old documents.
    pub async fn store(&self, documents: &[(&str, String)]) -> Result<()> {
        let staging = self.sibling("staging");
        if let Err(e) = self.write_documents(&staging, documents).await {
            let _ = tokio::fs::remove_dir_all(&staging).await;
            return Err(e);
        }

        let backup = self.sibling("previous");
        let had_previous = tokio::fs::try_exists(&self.dir).await?;
        if had_previous {
            let _ = tokio::fs::remove_dir_all(&backup).await;
            tokio::fs::rename(&self.dir, &backup).await?;
        }

        if let Err(e) = tokio::fs::rename(&staging, &self.dir).await {
            if had_previous {
                tokio::fs::rename(&backup, &self.dir).await?;
            }
            let _ = tokio::fs::remove_dir_all(&staging).await;
            return Err(e.into());
        }

        if had_previous {
            tokio::fs::remove_dir_all(&backup).await?;
        }
        Ok(())
    }

    async fn write_documents(&self, dir: &Path, documents: &[(&str, String)]) -> Result<()> {
        let _ = tokio::fs::remove_dir_all(dir).await;
        tokio::fs::create_dir_all(dir).await?;
        for (doc_type, body) in documents {
            tokio::fs::write(dir.join(format!("{doc_type}.json")), body).await?;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        tokio::fs::write(dir.join(STAMP_FILE), now.to_string()).await?;
        Ok(())
    }

    /// `<data_dir>/poe-ninja/.<league>.<suffix>`, on the same filesystem as
    /// the cache so renames stay atomic.
    fn sibling(&self, suffix: &str) -> PathBuf {
        self.dir.with_file_name(format!(".{}.{}", self.league, suffix))
    }

    /// Downloads every document when the cache is stale (or `force` is set),
    /// then reloads. A cache that is still fresh is only loaded.
    pub async fn refresh(&self, client: &mut NinjaClient, force: bool) -> Result<Arc<PriceIndex>> {
        if !force && !self.is_stale().await {
            return self.load().await;
        }

        info!(league = %self.league, dir = %self.dir.display(), "refreshing price documents");
        let mut documents = Vec::new();
        for (overview, doc_type) in all_documents() {
            match client.download(overview, doc_type, &self.league).await {
                Ok(body) => documents.push((doc_type, body)),
                Err(e) => {
                    warn!(doc_type, error = %e, "refresh failed, keeping previous price index");
                    return Err(e);
                }
            }
        }

        self.store(&documents).await?;
        self.load().await
    }
}
