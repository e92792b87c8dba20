//! Review domain types
//!
//! A [`Review`] is the unit of storage and of aggregation: seven mandatory
//! fields, constructed only fully populated, written once to the store and
//! never updated. [`CategoryFilter`] is the equality predicate applied to
//! stored reviews on the query path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date format reviews carry in the ingestion text, e.g. "June 8, 2004".
pub const REVIEW_DATE_FORMAT: &str = "%B %d, %Y";

/// Store-assigned key for a persisted review.
///
/// Fresh per `put`, never derived from content — re-ingesting the same
/// source text twice creates duplicate records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Create a new random ReviewId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scored product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Category tag, used as the equality-filter key
    pub product_type: String,
    /// Product name and author as given in the source document
    pub product_name: String,
    /// Review title
    pub title: String,
    /// Review date; a true date value so time-series ordering is well defined
    pub date: NaiveDate,
    /// External product identifier, not validated for uniqueness
    pub asin: String,
    /// Full review body
    pub review_text: String,
    /// Service-produced sentiment in [-1.0, 1.0], rounded to 3 decimals
    /// by the scorer and never recomputed afterwards
    pub sentiment_score: f64,
}

/// Category predicate for store queries.
///
/// `"all"` means no predicate; any other value is an exact-match equality
/// test on `product_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    ProductType(String),
}

impl CategoryFilter {
    /// Parse a filter value as accepted by the serving layer.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::ProductType(value.to_string())
        }
    }

    /// Check whether a review matches this filter.
    pub fn matches(&self, review: &Review) -> bool {
        match self {
            Self::All => true,
            Self::ProductType(t) => &review.product_type == t,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::ProductType(t) => write!(f, "{}", t),
        }
    }
}
