use crate::scrapers::types::{ScrapeConfig, Waits};
use clap::Parser;

/// Scrape business listings from a Google Maps search into .xlsx and .csv
#[derive(Debug, Parser)]
#[command(name = "maps-scout", version)]
pub struct Cli {
    /// Search query
    #[arg(short, long, default_value = "restaurants Bhubaneshwar")]
    pub search: String,

    /// Total number of listings to scrape
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub total: u64,

    /// Output filename, without extension
    #[arg(short, long, default_value = "google_maps_data")]
    pub filename: String,

    /// Run Chrome without a window
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Unchanged scroll rounds to tolerate before assuming all listings are shown
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub exhaustion_retries: u32,

    /// Pause after navigation and after submitting the query
    #[arg(long, value_name = "MS", default_value_t = 5_000)]
    pub settle_ms: u64,

    /// Pause after typing the query
    #[arg(long, value_name = "MS", default_value_t = 3_000)]
    pub input_ms: u64,

    /// Pause after each scroll of the results panel
    #[arg(long, value_name = "MS", default_value_t = 3_000)]
    pub scroll_wait_ms: u64,

    /// Pause after opening a listing
    #[arg(long, value_name = "MS", default_value_t = 5_000)]
    pub detail_wait_ms: u64,

    /// Extra pause before reading reviews
    #[arg(long, value_name = "MS", default_value_t = 2_000)]
    pub reviews_wait_ms: u64,

    /// Timeout for page navigation and element lookups
    #[arg(long, value_name = "MS", default_value_t = 60_000)]
    pub navigation_timeout_ms: u64,
}

impl Cli {
    pub fn into_config(self) -> ScrapeConfig {
        ScrapeConfig {
            search: self.search,
            total: self.total as usize,
            filename: self.filename,
            headless: self.headless,
            exhaustion_retries: self.exhaustion_retries,
            waits: Waits {
                settle_ms: self.settle_ms,
                input_ms: self.input_ms,
                scroll_ms: self.scroll_wait_ms,
                detail_ms: self.detail_wait_ms,
                reviews_ms: self.reviews_wait_ms,
                navigation_timeout_ms: self.navigation_timeout_ms,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_baseline_config() {
        let config = Cli::parse_from(["maps-scout"]).into_config();
        let baseline = ScrapeConfig::default();

        assert_eq!(config.search, baseline.search);
        assert_eq!(config.total, 10);
        assert_eq!(config.filename, "google_maps_data");
        assert!(!config.headless);
        assert_eq!(config.exhaustion_retries, 0);
        assert_eq!(config.waits, Waits::default());
    }

    #[test]
    fn short_flags() {
        let config = Cli::parse_from(["maps-scout", "-s", "cafes Puri", "-t", "25", "-f", "puri"])
            .into_config();

        assert_eq!(config.search, "cafes Puri");
        assert_eq!(config.total, 25);
        assert_eq!(config.filename, "puri");
    }

    #[test]
    fn long_flags() {
        let config = Cli::parse_from([
            "maps-scout",
            "--search",
            "hotels Cuttack",
            "--total",
            "3",
            "--filename",
            "cuttack",
            "--headless",
            "--scroll-wait-ms",
            "500",
        ])
        .into_config();

        assert_eq!(config.search, "hotels Cuttack");
        assert_eq!(config.total, 3);
        assert!(config.headless);
        assert_eq!(config.waits.scroll_ms, 500);
    }

    #[test]
    fn zero_total_is_rejected() {
        assert!(Cli::try_parse_from(["maps-scout", "-t", "0"]).is_err());
    }
}
