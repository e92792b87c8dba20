//! End-to-end ingestion: decode → parse → score → persist

mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use common::{harness, mixed_catalog, review_block};
use reviewlens::{CategoryFilter, ReviewStore, UploadedDocument};

#[tokio::test]
async fn single_record_round_trip() {
    let h = harness(0.8);
    let text = "<review><product_type>books</product_type><product_name>X</product_name>\
         <title>T</title><date>June 8, 2004</date><asin>A1</asin>\
         <review_text>Great book!</review_text></review>";
    let docs = vec![UploadedDocument::new("one.txt", text)];

    let summary = h.api.import(&docs).await.unwrap();
    assert_eq!(summary.imported, 1);

    let reviews = h.store.fetch(&CategoryFilter::All, 10).unwrap();
    assert_eq!(reviews.len(), 1);
    let review = &reviews[0];
    assert_eq!(review.product_type, "books");
    assert_eq!(review.asin, "A1");
    assert_eq!(review.date, NaiveDate::from_ymd_opt(2004, 6, 8).unwrap());
    assert!((-1.0..=1.0).contains(&review.sentiment_score));
    assert_eq!(review.sentiment_score, 0.8);
}

#[tokio::test]
async fn import_via_data_uri_transport() {
    let h = harness(0.25);
    let encoded = STANDARD.encode(mixed_catalog());
    let uploads = vec![(
        "catalog.txt".to_string(),
        format!("data:text/plain;base64,{}", encoded),
    )];

    let summary = h.api.import_encoded(&uploads).await.unwrap();
    assert_eq!(summary.documents, 1);
    assert_eq!(summary.imported, 4);
    assert_eq!(h.store.count(&CategoryFilter::All).unwrap(), 4);
}

#[tokio::test]
async fn cooldown_pauses_are_one_fewer_than_scored_calls() {
    let h = harness(0.1);
    let long = "x".repeat(1501);
    let text = [
        review_block("books", "A", "A1", "June 8, 2004", "short one"),
        review_block("books", "B", "A2", "June 9, 2004", &long),
        review_block("books", "C", "A3", "June 10, 2004", "short two"),
        review_block("books", "D", "A4", "June 11, 2004", "short three"),
    ]
    .concat();
    let docs = vec![UploadedDocument::new("batch.txt", text)];

    let summary = h.api.import(&docs).await.unwrap();
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.skipped, 1);
    // 3 scored records: exactly 2 inter-call pauses, none for the skip
    assert_eq!(h.client.calls(), 3);
    assert_eq!(h.pacer.pauses(), 2);
}

#[tokio::test]
async fn document_and_record_order_is_preserved() {
    let h = harness(0.0);
    let docs = vec![
        UploadedDocument::new(
            "first.txt",
            [
                review_block("books", "A", "A1", "June 8, 2004", "a"),
                review_block("books", "B", "A2", "June 9, 2004", "b"),
            ]
            .concat(),
        ),
        UploadedDocument::new(
            "second.txt",
            review_block("dvd", "C", "D1", "June 10, 2004", "c"),
        ),
    ];

    let summary = h.api.import(&docs).await.unwrap();
    assert_eq!(summary.documents, 2);
    assert_eq!(summary.imported, 3);

    let asins: Vec<String> = h
        .store
        .fetch(&CategoryFilter::All, 10)
        .unwrap()
        .into_iter()
        .map(|r| r.asin)
        .collect();
    assert_eq!(asins, vec!["A1", "A2", "D1"]);
}

#[tokio::test]
async fn reimporting_the_same_document_duplicates_records() {
    let h = harness(0.5);
    let docs = vec![UploadedDocument::new(
        "dup.txt",
        review_block("books", "A", "A1", "June 8, 2004", "again"),
    )];

    h.api.import(&docs).await.unwrap();
    h.api.import(&docs).await.unwrap();
    // Fresh key per put: no idempotency, duplicates accumulate
    assert_eq!(h.store.count(&CategoryFilter::All).unwrap(), 2);
}

#[tokio::test]
async fn empty_document_imports_nothing() {
    let h = harness(0.5);
    let docs = vec![UploadedDocument::new("empty.txt", "no markers here")];

    let summary = h.api.import(&docs).await.unwrap();
    assert_eq!(summary.documents, 1);
    assert_eq!(summary.imported, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(h.client.calls(), 0);
}
