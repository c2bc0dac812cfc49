//! Loader module for the UBI loader.
//!
//! Submits parsed bulk records to the search cluster in fixed-size chunks.

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::SubmitError;
use crate::status;
use ubi_loader_repository::{BulkFailure, BulkRecord, SearchIndexProvider};

/// Default number of records sent per bulk request.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Number of failure causes printed before summarizing the rest.
pub const MAX_DISPLAYED_FAILURES: usize = 5;

/// Configuration for the bulk loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of records per bulk request.
    pub chunk_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Outcome of a full submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionReport {
    /// Records the cluster accepted.
    pub accepted: usize,
    /// Records the cluster rejected, in submission order.
    pub failures: Vec<BulkFailure>,
}

impl SubmissionReport {
    /// Lines describing the failures: the first `limit` causes, then a count of the rest.
    pub fn failure_lines(&self, limit: usize) -> Vec<String> {
        let mut lines: Vec<String> = self
            .failures
            .iter()
            .take(limit)
            .map(|failure| format!("- {}", failure))
            .collect();

        if self.failures.len() > limit {
            lines.push(format!(
                "... and {} more failures",
                self.failures.len() - limit
            ));
        }

        lines
    }
}

/// Loader that writes bulk records into the search cluster.
///
/// Records rejected individually by the cluster are collected and reported;
/// they never make the submission fail. Only a failure of a bulk request as a
/// whole does, and it stops the remaining chunks.
pub struct BulkLoader {
    provider: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl BulkLoader {
    /// Create a new loader with the default chunk size.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: LoaderConfig::default(),
        }
    }

    /// Create a new loader with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        Self { provider, config }
    }

    /// Submit all records, one bulk request per chunk.
    ///
    /// Each record goes to its own `target_index`.
    ///
    /// # Returns
    ///
    /// * `Ok(SubmissionReport)` - Accepted count and per-document failures
    /// * `Err(SubmitError::EmptyBatch)` - If `records` is empty; nothing is sent
    /// * `Err(SubmitError::Bulk)` - If a bulk request failed as a whole
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn submit(&self, records: &[BulkRecord]) -> Result<SubmissionReport, SubmitError> {
        if records.is_empty() {
            return Err(SubmitError::EmptyBatch);
        }

        let chunk_size = self.config.chunk_size.max(1);
        let mut report = SubmissionReport::default();

        for (position, chunk) in records.chunks(chunk_size).enumerate() {
            let chunk_number = position + 1;

            debug!(chunk = chunk_number, size = chunk.len(), "Sending bulk chunk");

            let summary = self.provider.bulk_index(chunk).await.map_err(|source| {
                error!(chunk = chunk_number, error = %source, "Bulk request failed");
                SubmitError::Bulk {
                    chunk: chunk_number,
                    accepted: report.accepted,
                    source,
                }
            })?;

            report.accepted += summary.succeeded;
            report.failures.extend(summary.failures);
        }

        if !report.failures.is_empty() {
            warn!(
                accepted = report.accepted,
                failed = report.failures.len(),
                "Bulk indexing completed with failures"
            );
            status::warning(format!(
                "Bulk indexing completed with {} failures:",
                report.failures.len()
            ));
            for line in report.failure_lines(MAX_DISPLAYED_FAILURES) {
                status::detail(line);
            }
        }

        info!(accepted = report.accepted, "Bulk indexing completed");
        status::success(format!("Successfully indexed {} documents", report.accepted));

        Ok(report)
    }
}
