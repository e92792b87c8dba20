//! Storage backends for reviews
//!
//! The external document store is reached through the [`ReviewStore`]
//! trait; [`SqliteStore`] is the bundled backend. The store is the only
//! shared mutable resource in the system and is treated as append-only.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{OpenReviewStore, QueryResult, ReviewStore, StoreError, StoreResult};
