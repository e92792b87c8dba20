//! Ingestion orchestrator
//!
//! Drives parser → scorer → store over a batch of uploaded documents,
//! strictly sequentially: document order and record order within each
//! document are preserved, because the scorer's cool-down gate makes the
//! scoring path rate-limited. One [`ImportSummary`] comes back per batch —
//! the single user-visible message per import action.

mod upload;

pub use upload::{decode_upload, UploadedDocument};

use crate::parse::{parse_record, split_records, ParseError};
use crate::record::Review;
use crate::sentiment::{ScoreOutcome, SentimentError, SentimentScorer};
use crate::storage::{ReviewStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// A failure scoped to one record of one document.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Scoring(#[from] SentimentError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that abort an import batch.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("upload {name:?} is not a decodable data URI: {reason}")]
    InvalidUpload { name: String, reason: String },

    #[error("record {index} in {document:?} failed: {source}")]
    RecordFailed {
        document: String,
        index: usize,
        #[source]
        source: RecordError,
    },
}

/// What to do when a single record fails to parse, score, or persist.
///
/// The source system's behavior here was ambiguous (an uncaught error
/// killed the whole import), so the policy is an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the record at WARN, count it, continue with the next record.
    #[default]
    SkipRecord,
    /// Propagate the first record failure and abandon the batch.
    AbortBatch,
}

/// Per-batch result counts, and the one-line summary shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Documents processed
    pub documents: usize,
    /// Reviews scored and persisted
    pub imported: usize,
    /// Reviews dropped by the scoring eligibility guard
    pub skipped: usize,
    /// Records that failed to parse, score, or persist (SkipRecord policy)
    pub failed: usize,
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "imported {} reviews from {} documents ({} skipped, {} failed)",
            self.imported, self.documents, self.skipped, self.failed
        )
    }
}

enum RecordOutcome {
    Imported,
    Skipped,
}

/// The ingestion pipeline: injected store and scorer, explicit policy.
pub struct ImportPipeline {
    store: Arc<dyn ReviewStore>,
    scorer: SentimentScorer,
    policy: FailurePolicy,
}

impl ImportPipeline {
    /// Create a pipeline with the default skip-record policy.
    pub fn new(store: Arc<dyn ReviewStore>, scorer: SentimentScorer) -> Self {
        Self {
            store,
            scorer,
            policy: FailurePolicy::default(),
        }
    }

    /// Set the record-failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Import a batch of documents.
    ///
    /// Documents and the records within each are processed in order, one
    /// at a time. Per record: parse, score, persist. A record skipped by
    /// the eligibility guard is dropped silently (counted); a failed
    /// record follows the configured [`FailurePolicy`].
    pub async fn import(
        &self,
        documents: &[UploadedDocument],
    ) -> Result<ImportSummary, IngestError> {
        let mut summary = ImportSummary::default();

        for document in documents {
            summary.documents += 1;
            for (index, chunk) in split_records(&document.contents).enumerate() {
                match self.process_record(chunk).await {
                    Ok(RecordOutcome::Imported) => summary.imported += 1,
                    Ok(RecordOutcome::Skipped) => summary.skipped += 1,
                    Err(source) => match self.policy {
                        FailurePolicy::SkipRecord => {
                            tracing::warn!(
                                document = %document.name,
                                index,
                                error = %source,
                                "record failed, skipping"
                            );
                            summary.failed += 1;
                        }
                        FailurePolicy::AbortBatch => {
                            return Err(IngestError::RecordFailed {
                                document: document.name.clone(),
                                index,
                                source,
                            });
                        }
                    },
                }
            }
        }

        tracing::info!(%summary, "import finished");
        Ok(summary)
    }

    async fn process_record(&self, chunk: &str) -> Result<RecordOutcome, RecordError> {
        let parsed = parse_record(chunk)?;

        let score = match self.scorer.score(&parsed.review_text).await? {
            ScoreOutcome::Scored(score) => score,
            ScoreOutcome::SkippedTooLong => return Ok(RecordOutcome::Skipped),
        };

        let review = Review {
            product_type: parsed.product_type,
            product_name: parsed.product_name,
            title: parsed.title,
            date: parsed.date,
            asin: parsed.asin,
            review_text: parsed.review_text,
            sentiment_score: score,
        };
        let id = self.store.put(&review)?;

        tracing::info!(
            %id,
            product_type = %review.product_type,
            date = %review.date,
            asin = %review.asin,
            sentiment_score = review.sentiment_score,
            "review persisted"
        );
        Ok(RecordOutcome::Imported)
    }
}
