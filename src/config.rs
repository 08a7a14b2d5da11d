use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LEAGUE: &str = "Standard";
const DEFAULT_REFRESH_SECS: u64 = 3600;
const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// Runtime settings for the price cache and its downloads.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub league: String,
    pub data_dir: PathBuf,
    /// How old the cached documents may get before a refresh downloads them again.
    pub refresh_interval: Duration,
    /// Base pause between API requests, jittered by the client.
    pub request_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            league: DEFAULT_LEAGUE.to_string(),
            data_dir: default_data_dir(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
        }
    }
}

impl Settings {
    /// Environment variables:
    /// - `POE_PRICER_LEAGUE` - league name (default: Standard)
    /// - `POE_PRICER_DATA_DIR` - cache root (default: platform data dir)
    /// - `POE_PRICER_REFRESH_SECS` - staleness window (default: 3600)
    /// - `POE_PRICER_REQUEST_DELAY_MS` - delay between requests (default: 500)
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Some(league) = read_env::<String>("POE_PRICER_LEAGUE").filter(|l| !l.trim().is_empty()) {
            settings.league = league;
        }
        if let Some(dir) = read_env::<PathBuf>("POE_PRICER_DATA_DIR") {
            settings.data_dir = dir;
        }
        if let Some(secs) = read_env::<u64>("POE_PRICER_REFRESH_SECS") {
            settings.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = read_env::<u64>("POE_PRICER_REQUEST_DELAY_MS") {
            settings.request_delay = Duration::from_millis(ms);
        }

        settings
    }
}

/// Platform data directory for the pricer, `./data` when none is known.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "poe-pricer")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
