use crate::models::Business;
use std::time::Duration;

/// Fixed pauses used while driving the map page.
///
/// These are blind delays rather than completion signals: a slow page can
/// still be read before it has finished rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Waits {
    /// Pause after navigation and after submitting the query (ms)
    pub settle_ms: u64,
    /// Pause after typing the query, before submitting it (ms)
    pub input_ms: u64,
    /// Pause after each scroll of the results panel (ms)
    pub scroll_ms: u64,
    /// Pause after activating a listing (ms)
    pub detail_ms: u64,
    /// Extra pause before reading the rating indicator (ms)
    pub reviews_ms: u64,
    /// Upper bound for navigation and element lookups (ms)
    pub navigation_timeout_ms: u64,
}

impl Waits {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn input(&self) -> Duration {
        Duration::from_millis(self.input_ms)
    }

    pub fn scroll(&self) -> Duration {
        Duration::from_millis(self.scroll_ms)
    }

    pub fn detail(&self) -> Duration {
        Duration::from_millis(self.detail_ms)
    }

    pub fn reviews(&self) -> Duration {
        Duration::from_millis(self.reviews_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

impl Default for Waits {
    fn default() -> Self {
        Self {
            settle_ms: 5_000,
            input_ms: 3_000,
            scroll_ms: 3_000,
            detail_ms: 5_000,
            reviews_ms: 2_000,
            navigation_timeout_ms: 60_000,
        }
    }
}

/// Everything a single run needs to know
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Free-text query typed into the map search box
    pub search: String,
    /// Number of listings to collect
    pub total: usize,
    /// Output base name, without extension
    pub filename: String,
    pub headless: bool,
    /// Unchanged scroll rounds tolerated before declaring exhaustion
    pub exhaustion_retries: u32,
    pub waits: Waits,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            search: "restaurants Bhubaneshwar".to_string(),
            total: 10,
            filename: "google_maps_data".to_string(),
            headless: false,
            exhaustion_retries: 0,
            waits: Waits::default(),
        }
    }
}

/// Reference to one rendered entry of the results panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHandle {
    /// Index among the rendered listing links
    pub position: usize,
    pub href: String,
}

/// Result of the discovery loop
#[derive(Debug, Clone)]
pub struct Collection {
    pub handles: Vec<ListingHandle>,
    /// True when the loop stopped because no new listings appeared
    pub exhausted: bool,
}

/// What happened to a single listing
#[derive(Debug, Clone)]
pub enum ListingOutcome {
    Extracted(Business),
    Skipped {
        handle: ListingHandle,
        reason: String,
    },
}

impl ListingOutcome {
    pub fn business(&self) -> Option<&Business> {
        match self {
            ListingOutcome::Extracted(business) => Some(business),
            ListingOutcome::Skipped { .. } => None,
        }
    }
}
