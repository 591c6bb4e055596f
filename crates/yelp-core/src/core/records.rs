//! Flattening of nested API payloads into single-level export rows
//!
//! Each record kind owns its header and its serialization, so the column
//! layout can be tested without touching the network or the filesystem.

use crate::api::models::{BusinessDetail, Hours, Location, Review, ReviewSet};
use serde_json::Number;

/// A row kind that can be written by [`crate::core::writer::RowWriter`]
pub trait Record {
    const HEADERS: &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessRow {
    pub id: String,
    pub name: String,
    pub is_claimed: String,
    pub is_closed: String,
    pub url: String,
    pub price: String,
    pub rating: String,
    pub review_count: String,
    pub phone: String,
    pub photos: String,
    pub hours_type: String,
    pub is_open_now: String,
    pub category_alias: String,
    pub category_title: String,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub cross_streets: String,
    pub transactions: String,
}

impl BusinessRow {
    /// `id` is the one from the search results, not the detail payload
    pub fn from_detail(id: &str, detail: &BusinessDetail) -> Self {
        let (hours_type, is_open_now) = first_hours(detail.hours.as_deref());

        let categories = detail.categories.as_deref().unwrap_or_default();
        let category_alias = join_present(categories.iter().map(|c| c.alias.as_deref()));
        let category_title = join_present(categories.iter().map(|c| c.title.as_deref()));

        let coordinates = detail.coordinates.as_ref();
        let location = detail.location.as_ref();
        let location_field = |pick: fn(&Location) -> Option<&String>| {
            text(location.and_then(pick).map(String::as_str))
        };

        let address = location
            .map(|l| {
                [&l.address1, &l.address2, &l.address3]
                    .into_iter()
                    .filter_map(|part| part.as_deref())
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        Self {
            id: id.to_string(),
            name: text(detail.name.as_deref()),
            is_claimed: flag(detail.is_claimed),
            is_closed: flag(detail.is_closed),
            url: text(detail.url.as_deref()),
            price: text(detail.price.as_deref()),
            rating: number(detail.rating.as_ref()),
            review_count: detail.review_count.map(|c| c.to_string()).unwrap_or_default(),
            phone: text(detail.phone.as_deref()),
            photos: list(detail.photos.as_deref().unwrap_or_default()),
            hours_type,
            is_open_now,
            category_alias,
            category_title,
            latitude: number(coordinates.and_then(|c| c.latitude.as_ref())),
            longitude: number(coordinates.and_then(|c| c.longitude.as_ref())),
            address,
            city: location_field(|l| l.city.as_ref()),
            state: location_field(|l| l.state.as_ref()),
            zip_code: location_field(|l| l.zip_code.as_ref()),
            country: location_field(|l| l.country.as_ref()),
            cross_streets: location_field(|l| l.cross_streets.as_ref()),
            transactions: list(detail.transactions.as_deref().unwrap_or_default()),
        }
    }
}

impl Record for BusinessRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "is_claimed",
        "is_closed",
        "url",
        "price",
        "rating",
        "review_count",
        "phone",
        "photos",
        "hours_type",
        "is_open_now",
        "category_alias",
        "category_title",
        "latitude",
        "longitude",
        "address",
        "city",
        "state",
        "zip_code",
        "country",
        "cross_streets",
        "transactions",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.is_claimed.clone(),
            self.is_closed.clone(),
            self.url.clone(),
            self.price.clone(),
            self.rating.clone(),
            self.review_count.clone(),
            self.phone.clone(),
            self.photos.clone(),
            self.hours_type.clone(),
            self.is_open_now.clone(),
            self.category_alias.clone(),
            self.category_title.clone(),
            self.latitude.clone(),
            self.longitude.clone(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip_code.clone(),
            self.country.clone(),
            self.cross_streets.clone(),
            self.transactions.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRow {
    pub id: String,
    pub business_name: String,
    pub business_url: String,
    pub total_reviews: String,
    pub review_text: String,
    pub review_url: String,
    pub review_rating: String,
    pub review_time_created: String,
}

impl ReviewRow {
    /// Review columns are parallel: the n-th entry of each belongs to the n-th review
    pub fn from_parts(id: &str, detail: &BusinessDetail, reviews: &ReviewSet) -> Self {
        let entries = reviews.reviews.as_deref().unwrap_or_default();
        let column = |pick: fn(&Review) -> String| {
            list(&entries.iter().map(pick).collect::<Vec<_>>())
        };

        Self {
            id: id.to_string(),
            business_name: text(detail.name.as_deref()),
            business_url: text(detail.url.as_deref()),
            total_reviews: reviews.total.map(|t| t.to_string()).unwrap_or_default(),
            review_text: column(|r| text(r.text.as_deref())),
            review_url: column(|r| text(r.url.as_deref())),
            review_rating: column(|r| number(r.rating.as_ref())),
            review_time_created: column(|r| text(r.time_created.as_deref())),
        }
    }
}

impl Record for ReviewRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "business_name",
        "business_url",
        "total_reviews",
        "review_text",
        "review_url",
        "review_rating",
        "review_time_created",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.business_name.clone(),
            self.business_url.clone(),
            self.total_reviews.clone(),
            self.review_text.clone(),
            self.review_url.clone(),
            self.review_rating.clone(),
            self.review_time_created.clone(),
        ]
    }
}

const LIST_SEPARATOR: &str = "; ";

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn flag(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

fn number(value: Option<&Number>) -> String {
    value.map(Number::to_string).unwrap_or_default()
}

/// Join list elements; commas inside elements become `;` so no column ever carries one
pub fn list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().replace(',', ";"))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

fn join_present<'a>(items: impl Iterator<Item = Option<&'a str>>) -> String {
    items
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Only the first hours entry is exported
fn first_hours(hours: Option<&[Hours]>) -> (String, String) {
    match hours.and_then(|h| h.first()) {
        Some(first) => (text(first.hours_type.as_deref()), flag(first.is_open_now)),
        None => (String::new(), String::new()),
    }
}
