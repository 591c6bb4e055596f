use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

// Authentication models
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Opaque OAuth bearer token, fetched once per run
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(*****)")
    }
}

// Search models
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchPage {
    pub businesses: Vec<BusinessSummary>,
    pub total: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BusinessSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// Business detail models
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct BusinessDetail {
    pub id: Option<String>,
    pub name: Option<String>,
    pub is_claimed: Option<bool>,
    pub is_closed: Option<bool>,
    pub url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<Number>,
    pub review_count: Option<u64>,
    pub phone: Option<String>,
    pub photos: Option<Vec<String>>,
    pub hours: Option<Vec<Hours>>,
    pub categories: Option<Vec<Category>>,
    pub coordinates: Option<Coordinates>,
    pub location: Option<Location>,
    pub transactions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Hours {
    pub hours_type: Option<String>,
    pub is_open_now: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Category {
    pub alias: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Coordinates {
    pub latitude: Option<Number>,
    pub longitude: Option<Number>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Location {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub cross_streets: Option<String>,
}

// Review models
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ReviewSet {
    pub total: Option<u64>,
    pub reviews: Option<Vec<Review>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Review {
    pub text: Option<String>,
    pub url: Option<String>,
    pub rating: Option<Number>,
    pub time_created: Option<String>,
}
