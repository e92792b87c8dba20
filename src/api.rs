//! Transport-independent API layer.
//!
//! `ReviewlensApi` is the single entry point for consumer-facing
//! operations. Transports (CLI, web, direct embedding) call these methods —
//! they never reach into `ImportPipeline` or `ReviewStore` directly. The
//! store and the sentiment client are injected once at construction.

use std::sync::Arc;

use crate::ingest::{
    decode_upload, FailurePolicy, ImportPipeline, ImportSummary, IngestError, UploadedDocument,
};
use crate::record::CategoryFilter;
use crate::report::{self, SortSpec, TableRow};
use crate::sentiment::{SentimentClient, SentimentScorer};
use crate::storage::{ReviewStore, StoreResult};
use chrono::NaiveDate;

/// Everything a view refresh needs: the table plus the three chart series
/// and the unlimited match count.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub table: Vec<TableRow>,
    pub product_counts: Vec<u64>,
    pub score_histogram: Vec<f64>,
    pub time_series: Vec<(NaiveDate, f64)>,
    pub total_count: usize,
}

/// Single entry point for consumer-facing operations.
pub struct ReviewlensApi {
    store: Arc<dyn ReviewStore>,
    pipeline: ImportPipeline,
}

impl ReviewlensApi {
    /// Wire the store and the sentiment service client together.
    pub fn new(store: Arc<dyn ReviewStore>, client: Arc<dyn SentimentClient>) -> Self {
        Self::with_policy(store, client, FailurePolicy::default())
    }

    /// Wire with an explicit record-failure policy.
    pub fn with_policy(
        store: Arc<dyn ReviewStore>,
        client: Arc<dyn SentimentClient>,
        policy: FailurePolicy,
    ) -> Self {
        let scorer = SentimentScorer::new(client);
        let pipeline = ImportPipeline::new(store.clone(), scorer).with_policy(policy);
        Self { store, pipeline }
    }

    /// Build with a preconfigured pipeline (custom scorer pacing).
    pub fn with_pipeline(store: Arc<dyn ReviewStore>, pipeline: ImportPipeline) -> Self {
        Self { store, pipeline }
    }

    // --- Write ---

    /// Import a batch of already-decoded documents.
    pub async fn import(
        &self,
        documents: &[UploadedDocument],
    ) -> Result<ImportSummary, IngestError> {
        self.pipeline.import(documents).await
    }

    /// Import a batch of (name, data URI) uploads as delivered by the
    /// transport layer.
    pub async fn import_encoded(
        &self,
        uploads: &[(String, String)],
    ) -> Result<ImportSummary, IngestError> {
        let mut documents = Vec::with_capacity(uploads.len());
        for (name, data_uri) in uploads {
            documents.push(decode_upload(name, data_uri)?);
        }
        self.import(&documents).await
    }

    // --- Read ---

    /// Run one filter/sort/limit view refresh: query the store, project
    /// and sort the table, derive the chart series.
    pub fn view(
        &self,
        filter: &CategoryFilter,
        limit: usize,
        sort: Option<&SortSpec>,
    ) -> StoreResult<ViewModel> {
        let result = self.store.query(filter, limit)?;
        let table = report::build_table(&result.reviews, sort);

        Ok(ViewModel {
            product_counts: report::product_count_distribution(&table),
            score_histogram: report::score_distribution(&table),
            time_series: report::score_time_series(&table),
            total_count: result.total_count,
            table,
        })
    }

    /// Serialize the current view's table as CSV.
    pub fn export_csv(
        &self,
        filter: &CategoryFilter,
        limit: usize,
        sort: Option<&SortSpec>,
    ) -> StoreResult<String> {
        let view = self.view(filter, limit, sort)?;
        Ok(report::to_csv(&view.table))
    }
}
