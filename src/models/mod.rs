use serde::{Deserialize, Serialize};

/// Name used when a listing's detail view has no title element
pub const UNKNOWN_NAME: &str = "Unknown";

/// Column order shared by every output format
pub const COLUMNS: [&str; 6] = [
    "name",
    "address",
    "website",
    "phone_number",
    "reviews_count",
    "reviews_average",
];

/// One business listing as extracted from its detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub name: String,
    pub address: String,
    pub website: String,
    pub phone_number: String,
    pub reviews_count: Option<u64>,
    pub reviews_average: Option<f64>,
}

impl Default for Business {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            address: String::new(),
            website: String::new(),
            phone_number: String::new(),
            reviews_count: None,
            reviews_average: None,
        }
    }
}

/// Append-only collection of businesses, kept in discovery order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BusinessList {
    businesses: Vec<Business>,
}

impl BusinessList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, business: Business) {
        self.businesses.push(business);
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Business> {
        self.businesses.iter()
    }
}

impl Extend<Business> for BusinessList {
    fn extend<I: IntoIterator<Item = Business>>(&mut self, iter: I) {
        self.businesses.extend(iter);
    }
}
