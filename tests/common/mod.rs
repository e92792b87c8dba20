//! Shared fixtures for integration tests
//!
//! Builds review documents in the ingestion text format and wires an API
//! instance over an in-memory store, a mock sentiment client, and a
//! counting pacer so no test waits on the wall clock.

use reviewlens::sentiment::{CountingPacer, COOLDOWN_DELAY};
use reviewlens::{
    ImportPipeline, MockSentimentClient, OpenReviewStore, ReviewlensApi, SentimentScorer,
    SqliteStore,
};
use std::sync::Arc;

/// One review block in the ingestion format.
pub fn review_block(product_type: &str, name: &str, asin: &str, date: &str, text: &str) -> String {
    format!(
        "<review><product_type>{}</product_type>\
         <product_name>{}</product_name><title>T</title>\
         <date>{}</date><asin>{}</asin>\
         <review_text>{}</review_text></review>",
        product_type, name, date, asin, text
    )
}

/// A document of books/dvd reviews: three "books", one "dvd".
pub fn mixed_catalog() -> String {
    [
        review_block("books", "Book One", "B1", "June 8, 2004", "Great book!"),
        review_block("books", "Book One", "B2", "June 9, 2004", "Still great."),
        review_block("books", "Book Two", "B3", "July 1, 2004", "Not bad."),
        review_block("dvd", "Movie One", "D1", "August 2, 2004", "Fun film."),
    ]
    .concat()
}

pub struct Harness {
    pub store: Arc<SqliteStore>,
    pub client: Arc<MockSentimentClient>,
    pub pacer: Arc<CountingPacer>,
    pub api: ReviewlensApi,
}

/// Wire an API over fresh collaborators, scoring everything `score`.
pub fn harness(score: f64) -> Harness {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let client = Arc::new(MockSentimentClient::new().with_score(score));
    let pacer = Arc::new(CountingPacer::new());

    let scorer = SentimentScorer::new(client.clone())
        .with_gate(COOLDOWN_DELAY, pacer.clone());
    let pipeline = ImportPipeline::new(store.clone(), scorer);
    let api = ReviewlensApi::with_pipeline(store.clone(), pipeline);

    Harness {
        store,
        client,
        pacer,
        api,
    }
}
