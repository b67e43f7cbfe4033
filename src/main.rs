mod cli;
mod models;
mod output;
mod scrapers;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use models::BusinessList;
use scrapers::{collect_listings, process_listings, GoogleMapsSession, ListingOutcome, ScrapeConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Drive one browser session from search to saved files
fn run(config: ScrapeConfig) -> Result<BusinessList> {
    let mut session = GoogleMapsSession::launch(config.headless, config.waits.clone())?;
    session.search(&config.search)?;

    let collection = collect_listings(&mut session, config.total, config.exhaustion_retries)?;
    if collection.exhausted && collection.handles.len() < config.total {
        info!(
            "Only {} of {} requested listings are available",
            collection.handles.len(),
            config.total
        );
    }

    let outcomes = process_listings(&mut session, &collection.handles);
    let skipped: Vec<_> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ListingOutcome::Skipped { handle, reason } => {
                Some(format!("#{} ({})", handle.position + 1, reason))
            }
            ListingOutcome::Extracted(_) => None,
        })
        .collect();

    let businesses = BusinessList::from_outcomes(&outcomes);
    info!(
        "✅ Extracted {} businesses ({} skipped)",
        businesses.len(),
        skipped.len()
    );
    if !skipped.is_empty() {
        info!("Skipped listings: {}", skipped.join(", "));
    }
    if businesses.is_empty() {
        warn!("No businesses extracted; writing header-only files");
    }

    businesses.save_to_excel(&config.filename)?;
    businesses.save_to_csv(&config.filename)?;

    drop(session);
    Ok(businesses)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();

    info!("🗺️  Maps Scout - Google Maps Business Scraper");
    info!("Search: '{}', target: {} listings", config.search, config.total);

    // headless_chrome blocks, so keep it off the async workers
    let businesses = tokio::task::spawn_blocking(move || run(config)).await??;

    for (i, business) in businesses.iter().enumerate() {
        println!("{}. {}", i + 1, business.name);
        if !business.address.is_empty() {
            println!("   {}", business.address);
        }
        if let (Some(average), Some(count)) = (business.reviews_average, business.reviews_count) {
            println!("   {} stars, {} reviews", average, count);
        }
    }

    Ok(())
}
