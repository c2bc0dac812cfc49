//! Record and result types for bulk operations.

use serde_json::{Map, Value};

/// A single document ready for bulk ingestion.
///
/// Built from an action line (target index and id) and the document line that
/// follows it in an NDJSON bulk export.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRecord {
    /// The index this document is written to.
    pub target_index: String,
    /// The document id. `None` lets the cluster assign one.
    pub document_id: Option<String>,
    /// The document body.
    pub source: Map<String, Value>,
}

impl BulkRecord {
    /// Create a new bulk record.
    pub fn new(
        target_index: impl Into<String>,
        document_id: Option<String>,
        source: Map<String, Value>,
    ) -> Self {
        Self {
            target_index: target_index.into(),
            document_id,
            source,
        }
    }
}

/// A document the cluster rejected during an otherwise successful bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkFailure {
    /// The index the document was sent to.
    pub target_index: String,
    /// The document id, if one was given or assigned.
    pub document_id: Option<String>,
    /// The per-item HTTP status reported by the cluster.
    pub status: Option<u16>,
    /// Human-readable cause, usually `<error type>: <reason>`.
    pub cause: String,
}

impl std::fmt::Display for BulkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            self.target_index,
            self.document_id.as_deref().unwrap_or("<auto>")
        )?;
        if let Some(status) = self.status {
            write!(f, " [{}]", status)?;
        }
        write!(f, ": {}", self.cause)
    }
}

/// Summary of one bulk request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkIndexSummary {
    /// Number of records sent.
    pub total: usize,
    /// Number of records the cluster accepted.
    pub succeeded: usize,
    /// Number of records the cluster rejected.
    pub failed: usize,
    /// Details for each rejected record, in request order.
    pub failures: Vec<BulkFailure>,
}
