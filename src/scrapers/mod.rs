pub mod browser;
pub mod collector;
pub mod extractor;
pub mod traits;
pub mod types;

pub use browser::GoogleMapsSession;
pub use collector::collect_listings;
pub use extractor::process_listings;
pub use types::{ListingOutcome, ScrapeConfig};
