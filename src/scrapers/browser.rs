use crate::scrapers::traits::{DetailView, ResultsFeed};
use crate::scrapers::types::{ListingHandle, Waits};
use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

const MAPS_URL: &str = "https://www.google.com/maps";
const SEARCH_BOX_SELECTOR: &str = "input#searchboxinput";
const LISTING_LINK_SELECTOR: &str = r#"a[href*="https://www.google.com/maps/place"]"#;

/// Returns the hrefs of every rendered listing link as a JSON array string
const LISTING_HREFS_JS: &str = r#"
    JSON.stringify(
        Array.from(document.querySelectorAll('a[href*="https://www.google.com/maps/place"]'))
            .map(a => a.href)
    )
"#;

/// Scrolls the results panel, falling back to the window when the panel is missing
const SCROLL_RESULTS_JS: &str = r#"
    (() => {
        const feed = document.querySelector('div[role="feed"]');
        if (feed) {
            feed.scrollBy(0, 10000);
        } else {
            window.scrollBy(0, 10000);
        }
        return true;
    })()
"#;

/// One browser session on the map search page
pub struct GoogleMapsSession {
    // Chrome is shut down when this is dropped
    _browser: Browser,
    tab: Arc<Tab>,
    waits: Waits,
}

impl GoogleMapsSession {
    /// Launch Chrome and open a blank tab
    pub fn launch(headless: bool, waits: Waits) -> Result<Self> {
        info!("Launching Chrome (headless: {})...", headless);

        let options = LaunchOptions::default_builder()
            .headless(headless)
            .window_size(Some((1280, 900)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(waits.navigation_timeout());

        Ok(Self {
            _browser: browser,
            tab,
            waits,
        })
    }

    /// Open the map page and submit `query` in the search box
    pub fn search(&self, query: &str) -> Result<()> {
        info!("Opening {}...", MAPS_URL);
        self.tab
            .navigate_to(MAPS_URL)
            .context("Failed to navigate to the map page")?;
        self.tab
            .wait_until_navigated()
            .context("Map page did not finish loading")?;
        thread::sleep(self.waits.settle());

        info!("Searching for '{}'", query);
        self.tab
            .wait_for_element(SEARCH_BOX_SELECTOR)
            .context("Search box not found")?
            .type_into(query)
            .context("Failed to type the search query")?;
        thread::sleep(self.waits.input());

        self.tab
            .press_key("Enter")
            .context("Failed to submit the search")?;
        thread::sleep(self.waits.settle());

        Ok(())
    }
}

impl ResultsFeed for GoogleMapsSession {
    fn load_more(&mut self) -> Result<()> {
        self.tab
            .evaluate(SCROLL_RESULTS_JS, false)
            .context("Failed to scroll the results panel")?;
        thread::sleep(self.waits.scroll());
        Ok(())
    }

    fn rendered(&mut self) -> Result<Vec<ListingHandle>> {
        let result = self
            .tab
            .evaluate(LISTING_HREFS_JS, false)
            .context("Failed to read listing links")?;

        let handles = listing_handles(result.value.as_ref())?;
        debug!("{} listing links rendered", handles.len());

        Ok(handles)
    }
}

/// Decode the JSON string produced by `LISTING_HREFS_JS`
fn listing_handles(value: Option<&Value>) -> Result<Vec<ListingHandle>> {
    let json = value
        .and_then(Value::as_str)
        .context("Listing links were not returned as a string")?;
    let hrefs: Vec<String> =
        serde_json::from_str(json).context("Listing links were not a JSON array")?;

    Ok(hrefs
        .into_iter()
        .enumerate()
        .map(|(position, href)| ListingHandle { position, href })
        .collect())
}

impl DetailView for GoogleMapsSession {
    fn open(&mut self, handle: &ListingHandle) -> Result<String> {
        let links = self
            .tab
            .find_elements(LISTING_LINK_SELECTOR)
            .context("Listing links are no longer rendered")?;
        let link = links
            .get(handle.position)
            .with_context(|| format!("Listing {} is no longer rendered", handle.position + 1))?;

        link.click().context("Failed to activate listing")?;
        thread::sleep(self.waits.detail());
        thread::sleep(self.waits.reviews());

        self.tab
            .get_content()
            .context("Failed to read the detail panel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_hrefs_in_panel_order() {
        let value = json!(r#"["https://www.google.com/maps/place/a","https://www.google.com/maps/place/b"]"#);
        let handles = listing_handles(Some(&value)).unwrap();

        assert_eq!(handles.len(), 2);
        assert_eq!(handles[1].position, 1);
        assert_eq!(handles[1].href, "https://www.google.com/maps/place/b");
    }

    #[test]
    fn empty_array_means_nothing_rendered() {
        let value = json!("[]");
        assert!(listing_handles(Some(&value)).unwrap().is_empty());
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = listing_handles(None).unwrap_err();
        assert!(err.to_string().contains("not returned as a string"));
    }

    #[test]
    fn non_string_value_is_an_error() {
        assert!(listing_handles(Some(&json!(3))).is_err());
        assert!(listing_handles(Some(&json!("{\"a\":1}"))).is_err());
    }
}
