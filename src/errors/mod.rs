use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricerError {
    #[error("Network Error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API Error: {status} from {url}")]
    Api { status: u16, url: String },

    #[error("Rate Limit Error: gave up on {url}")]
    RateLimited { url: String },

    #[error("cache file {0} does not exist")]
    MissingCacheFile(PathBuf),

    // The layout rules picked a section the dump does not have.
    #[error("affix section index {index} out of range for {sections} sections")]
    AffixSectionOutOfRange { index: usize, sections: usize },

    #[error("identified item has no item level section to anchor its affixes")]
    MissingItemLevel,

    #[error("magic item header '{header}' is made up entirely of its affixes")]
    MagicBaseUnrecoverable { header: String },

    #[error("price index holds an empty candidate list for '{key}'")]
    EmptyCandidates { key: String },
}

pub type Result<T> = std::result::Result<T, PricerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PricerError::Api {
            status: 503,
            url: "https://poe.ninja".to_string(),
        };
        assert_eq!(error.to_string(), "API Error: 503 from https://poe.ninja");
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let error = PricerError::AffixSectionOutOfRange { index: 6, sections: 5 };
        assert_eq!(
            error.to_string(),
            "affix section index 6 out of range for 5 sections"
        );
    }
}
