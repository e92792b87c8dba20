//! Reviewlens: product review sentiment ingestion and aggregation
//!
//! Ingests product review documents in a tag-delimited text format, scores
//! each review through an external sentiment analysis service, persists the
//! structured result, and serves filtered/sorted/aggregated views of the
//! stored reviews for display and export.
//!
//! # Core concepts
//!
//! - **Parsing**: lexical extraction of six fixed fields per `<review>` block
//! - **Scoring**: one rate-limited service call per eligible review,
//!   with a 1500-character eligibility guard
//! - **Aggregation**: stable-sorted table projection plus chart-ready series
//!
//! # Example
//!
//! ```
//! use reviewlens::{MockSentimentClient, OpenReviewStore, ReviewlensApi, SqliteStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//! let api = ReviewlensApi::new(store, Arc::new(MockSentimentClient::new()));
//! // API is ready for imports and view queries
//! ```

mod api;
pub mod ingest;
pub mod parse;
pub mod record;
pub mod report;
pub mod sentiment;
pub mod storage;

pub use api::{ReviewlensApi, ViewModel};
pub use ingest::{
    decode_upload, FailurePolicy, ImportPipeline, ImportSummary, IngestError, UploadedDocument,
};
pub use record::{CategoryFilter, Review, ReviewId, REVIEW_DATE_FORMAT};
pub use report::{SortDirection, SortSpec, TableRow};
pub use sentiment::{
    CommandSentimentClient, MockSentimentClient, ScoreOutcome, SentimentClient, SentimentError,
    SentimentScorer,
};
pub use storage::{OpenReviewStore, QueryResult, ReviewStore, SqliteStore, StoreError, StoreResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
