use crate::scrapers::types::ListingHandle;
use anyhow::Result;

/// A results panel that renders more listings on demand
pub trait ResultsFeed {
    /// Ask the panel for more results and pause while they load
    fn load_more(&mut self) -> Result<()>;

    /// Listings currently rendered, in panel order
    fn rendered(&mut self) -> Result<Vec<ListingHandle>>;
}

/// Opens a listing and hands back what its detail view shows
pub trait DetailView {
    /// Activate the listing and return a snapshot of the rendered page HTML
    fn open(&mut self, handle: &ListingHandle) -> Result<String>;
}
