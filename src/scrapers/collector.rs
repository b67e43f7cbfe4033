use crate::scrapers::traits::ResultsFeed;
use crate::scrapers::types::Collection;
use anyhow::{Context, Result};
use tracing::info;

/// Scroll the results panel until `total` listings are rendered or the
/// panel stops growing.
///
/// A round where the rendered count does not change counts as a miss; after
/// `exhaustion_retries + 1` consecutive misses the panel is treated as
/// exhausted and whatever is rendered is returned. There is no cap on the
/// number of growing rounds.
pub fn collect_listings<F: ResultsFeed>(
    feed: &mut F,
    total: usize,
    exhaustion_retries: u32,
) -> Result<Collection> {
    let mut previously_counted = 0;
    let mut misses = 0;

    loop {
        feed.load_more().context("Failed to load more results")?;
        let mut handles = feed.rendered().context("Failed to read rendered listings")?;

        if handles.len() >= total {
            handles.truncate(total);
            info!("Total Scraped: {}", handles.len());
            return Ok(Collection {
                handles,
                exhausted: false,
            });
        }

        if handles.len() == previously_counted {
            if misses >= exhaustion_retries {
                info!("Arrived at all available listings");
                info!("Total Scraped: {}", handles.len());
                return Ok(Collection {
                    handles,
                    exhausted: true,
                });
            }
            misses += 1;
            info!(
                "No new listings after scroll, retrying ({}/{})",
                misses, exhaustion_retries
            );
            continue;
        }

        misses = 0;
        previously_counted = handles.len();
        info!("Currently Scraped: {}", previously_counted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::types::ListingHandle;

    /// Feed that renders a fixed number of extra listings per scroll
    struct FakeFeed {
        available: usize,
        per_scroll: usize,
        rendered: usize,
        scrolls: usize,
        stalls: Vec<usize>,
    }

    impl FakeFeed {
        fn new(available: usize, per_scroll: usize) -> Self {
            Self {
                available,
                per_scroll,
                rendered: 0,
                scrolls: 0,
                stalls: Vec::new(),
            }
        }
    }

    impl ResultsFeed for FakeFeed {
        fn load_more(&mut self) -> Result<()> {
            self.scrolls += 1;
            if !self.stalls.contains(&self.scrolls) {
                self.rendered = (self.rendered + self.per_scroll).min(self.available);
            }
            Ok(())
        }

        fn rendered(&mut self) -> Result<Vec<ListingHandle>> {
            Ok((0..self.rendered)
                .map(|position| ListingHandle {
                    position,
                    href: format!("https://www.google.com/maps/place/{}", position),
                })
                .collect())
        }
    }

    struct BrokenFeed;

    impl ResultsFeed for BrokenFeed {
        fn load_more(&mut self) -> Result<()> {
            anyhow::bail!("results panel missing")
        }

        fn rendered(&mut self) -> Result<Vec<ListingHandle>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn returns_exactly_total_in_first_seen_order() {
        let mut feed = FakeFeed::new(50, 7);
        let collection = collect_listings(&mut feed, 10, 0).unwrap();

        assert!(!collection.exhausted);
        assert_eq!(collection.handles.len(), 10);
        let positions: Vec<_> = collection.handles.iter().map(|h| h.position).collect();
        assert_eq!(positions, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn stops_on_exhaustion_with_short_list() {
        let mut feed = FakeFeed::new(4, 3);
        let collection = collect_listings(&mut feed, 10, 0).unwrap();

        assert!(collection.exhausted);
        assert_eq!(collection.handles.len(), 4);
        // 3, 4, then an unchanged round
        assert_eq!(feed.scrolls, 3);
    }

    #[test]
    fn empty_results_exhaust_immediately() {
        let mut feed = FakeFeed::new(0, 5);
        let collection = collect_listings(&mut feed, 3, 0).unwrap();

        assert!(collection.exhausted);
        assert!(collection.handles.is_empty());
        assert_eq!(feed.scrolls, 1);
    }

    #[test]
    fn single_stall_ends_loop_without_retries() {
        let mut feed = FakeFeed::new(20, 5);
        feed.stalls = vec![2];
        let collection = collect_listings(&mut feed, 20, 0).unwrap();

        assert!(collection.exhausted);
        assert_eq!(collection.handles.len(), 5);
    }

    #[test]
    fn retries_survive_a_slow_render() {
        let mut feed = FakeFeed::new(20, 5);
        feed.stalls = vec![2];
        let collection = collect_listings(&mut feed, 20, 1).unwrap();

        assert!(!collection.exhausted);
        assert_eq!(collection.handles.len(), 20);
    }

    #[test]
    fn growth_resets_the_retry_budget() {
        let mut feed = FakeFeed::new(30, 5);
        feed.stalls = vec![2, 4];
        let collection = collect_listings(&mut feed, 30, 1).unwrap();

        assert!(!collection.exhausted);
        assert_eq!(collection.handles.len(), 30);
        assert_eq!(feed.scrolls, 8);
    }

    #[test]
    fn unreadable_listings_are_fatal() {
        struct UnreadableFeed;

        impl ResultsFeed for UnreadableFeed {
            fn load_more(&mut self) -> Result<()> {
                Ok(())
            }

            fn rendered(&mut self) -> Result<Vec<ListingHandle>> {
                anyhow::bail!("Listing links were not returned as a string")
            }
        }

        let err = collect_listings(&mut UnreadableFeed, 5, 0).unwrap_err();
        assert!(err.to_string().contains("Failed to read rendered listings"));
    }

    #[test]
    fn feed_errors_are_fatal() {
        let err = collect_listings(&mut BrokenFeed, 5, 0).unwrap_err();
        assert!(err.to_string().contains("Failed to load more results"));
    }
}
