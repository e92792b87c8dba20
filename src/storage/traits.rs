//! Review store trait definitions

use crate::record::{CategoryFilter, Review, ReviewId};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored date unreadable: {0}")]
    DateParse(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A limited page of reviews plus the unlimited match count.
///
/// The two parts come from two logically separate reads over the same
/// filter predicate: `reviews` is truncated to the caller's limit while
/// `total_count` ignores it.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub reviews: Vec<Review>,
    pub total_count: usize,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self {
            reviews: Vec::new(),
            total_count: 0,
        }
    }
}

/// Gateway to the review document store.
///
/// The store is append-only from this system's perspective: reviews are
/// written once under a fresh store-assigned key and never updated or
/// deleted. Implementations must be thread-safe (Send + Sync).
pub trait ReviewStore: Send + Sync {
    /// Persist one review under a fresh key.
    ///
    /// Keys are never reused and never derived from content, so
    /// re-ingesting the same source text creates duplicate records.
    fn put(&self, review: &Review) -> StoreResult<ReviewId>;

    /// Fetch reviews matching the filter, in insertion order, truncated
    /// to `limit`.
    fn fetch(&self, filter: &CategoryFilter, limit: usize) -> StoreResult<Vec<Review>>;

    /// Count all reviews matching the filter, with no limit applied.
    ///
    /// An independent read over the same predicate as `fetch`, never
    /// derived from a limited page.
    fn count(&self, filter: &CategoryFilter) -> StoreResult<usize>;

    /// Fetch a limited page together with the unlimited match count.
    fn query(&self, filter: &CategoryFilter, limit: usize) -> StoreResult<QueryResult> {
        let reviews = self.fetch(filter, limit)?;
        let total_count = self.count(filter)?;
        Ok(QueryResult {
            reviews,
            total_count,
        })
    }
}

/// Extension trait for opening stores from paths
pub trait OpenReviewStore: ReviewStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StoreResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StoreResult<Self>;
}
