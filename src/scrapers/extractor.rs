use crate::models::{Business, BusinessList};
use crate::scrapers::traits::DetailView;
use crate::scrapers::types::{ListingHandle, ListingOutcome};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

// Locators for the place detail panel. These follow the page's current
// markup and break silently when it changes.
const NAME_SELECTOR: &str = r#"h1[class*="DUwDvf"]"#;
const ADDRESS_SELECTOR: &str = r#"button[data-item-id="address"] div[class*="fontBodyMedium"]"#;
const WEBSITE_SELECTOR: &str = r#"a[data-item-id="authority"] div[class*="fontBodyMedium"]"#;
const PHONE_SELECTOR: &str = r#"button[data-item-id*="phone:tel:"] div[class*="fontBodyMedium"]"#;
const RATING_SELECTOR: &str = r#"span[role="img"][aria-label*="stars"]"#;

/// Average and count read from a rating indicator's accessible label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub count: u64,
}

/// Parse a label shaped like `"4.5 stars 1,234 Reviews"`.
///
/// The label must mention both `stars` and `Reviews`. The average is the
/// first whitespace token (a decimal comma is accepted), the count is the
/// third token with thousands separators removed. Anything else yields
/// `None`; there is never a partial rating.
pub fn parse_rating(label: &str) -> Option<Rating> {
    if !label.contains("stars") || !label.contains("Reviews") {
        return None;
    }

    let tokens: Vec<&str> = label.split_whitespace().collect();
    let average = tokens.first()?.replace(',', ".").parse::<f64>().ok()?;
    let count = tokens.get(2)?.replace(',', "").parse::<u64>().ok()?;

    Some(Rating { average, count })
}

/// Text of the first element matching `selector`, trimmed
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Build a record from a snapshot of the detail panel.
///
/// Each field is looked up on its own; a missing element only affects that
/// field, which keeps its fallback value.
pub fn extract_business(html: &str) -> Business {
    let document = Html::parse_document(html);
    let mut business = Business::default();

    if let Some(name) = first_text(&document, NAME_SELECTOR) {
        business.name = name;
    }
    if let Some(address) = first_text(&document, ADDRESS_SELECTOR) {
        business.address = address;
    }
    if let Some(website) = first_text(&document, WEBSITE_SELECTOR) {
        business.website = website;
    }
    if let Some(phone) = first_text(&document, PHONE_SELECTOR) {
        business.phone_number = phone;
    }

    match first_attr(&document, RATING_SELECTOR, "aria-label") {
        Some(label) => {
            debug!("Extracted aria-label: {}", label);
            match parse_rating(&label) {
                Some(rating) => {
                    business.reviews_average = Some(rating.average);
                    business.reviews_count = Some(rating.count);
                }
                None => warn!("Could not extract review data from label '{}'", label),
            }
        }
        None => warn!("Could not extract review data: no rating indicator"),
    }

    business
}

/// Open each listing in turn and extract it.
///
/// A listing that cannot be opened is reported as skipped and the batch
/// carries on with the next handle.
pub fn process_listings<V: DetailView>(
    view: &mut V,
    handles: &[ListingHandle],
) -> Vec<ListingOutcome> {
    let mut outcomes = Vec::with_capacity(handles.len());

    for handle in handles {
        match view.open(handle) {
            Ok(html) => {
                let business = extract_business(&html);
                if let Ok(json) = serde_json::to_string(&business) {
                    debug!("{}", json);
                }
                info!("Extracted listing {}: {}", handle.position + 1, business.name);
                outcomes.push(ListingOutcome::Extracted(business));
            }
            Err(e) => {
                warn!("Skipping listing {} ({}): {:#}", handle.position + 1, handle.href, e);
                outcomes.push(ListingOutcome::Skipped {
                    handle: handle.clone(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    outcomes
}

impl BusinessList {
    /// Keep the extracted records, in order, dropping skipped listings
    pub fn from_outcomes(outcomes: &[ListingOutcome]) -> Self {
        let mut list = BusinessList::new();
        list.extend(outcomes.iter().filter_map(ListingOutcome::business).cloned());
        list
    }
}
