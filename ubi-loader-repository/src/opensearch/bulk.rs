//! Bulk request construction and response interpretation.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::SearchIndexError;
use crate::types::{BulkFailure, BulkIndexSummary, BulkRecord};

/// Top-level shape of a bulk API response.
#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkResponseItem>>,
}

/// Outcome of one operation inside a bulk response, keyed by op type.
#[derive(Debug, Deserialize)]
struct BulkResponseItem {
    #[serde(rename = "_index")]
    index: Option<String>,
    #[serde(rename = "_id")]
    id: Option<String>,
    status: Option<u16>,
    error: Option<Value>,
}

/// Build the NDJSON lines for a bulk request: one `index` action per record
/// followed by its source.
pub(crate) fn bulk_lines(records: &[BulkRecord]) -> Vec<Value> {
    let mut lines = Vec::with_capacity(records.len() * 2);

    for record in records {
        let action = match &record.document_id {
            Some(id) => json!({"index": {"_index": record.target_index, "_id": id}}),
            None => json!({"index": {"_index": record.target_index}}),
        };
        lines.push(action);
        lines.push(Value::Object(record.source.clone()));
    }

    lines
}

/// Turn a bulk response into a summary aligned with the records that were sent.
///
/// Items are matched to records by position. Records with no matching item are
/// counted as failures.
pub(crate) fn summarize_bulk_response(
    records: &[BulkRecord],
    body: Value,
) -> Result<BulkIndexSummary, SearchIndexError> {
    let response: BulkResponse = serde_json::from_value(body)
        .map_err(|e| SearchIndexError::parse(format!("Invalid bulk response: {}", e)))?;

    if response.items.len() != records.len() {
        warn!(
            sent = records.len(),
            received = response.items.len(),
            "Bulk response item count does not match request"
        );
    }

    let mut summary = BulkIndexSummary {
        total: records.len(),
        ..Default::default()
    };

    for (position, record) in records.iter().enumerate() {
        let item = response
            .items
            .get(position)
            .and_then(|operation| operation.values().next());

        let Some(item) = item else {
            summary.failures.push(BulkFailure {
                target_index: record.target_index.clone(),
                document_id: record.document_id.clone(),
                status: None,
                cause: "no result returned for this document".to_string(),
            });
            continue;
        };

        let rejected = item.error.is_some() || item.status.is_some_and(|status| status >= 300);
        if !rejected {
            summary.succeeded += 1;
            continue;
        }

        let cause = match &item.error {
            Some(error) => describe_error(error),
            None => format!("status {}", item.status.unwrap_or_default()),
        };

        summary.failures.push(BulkFailure {
            target_index: item
                .index
                .clone()
                .unwrap_or_else(|| record.target_index.clone()),
            document_id: item.id.clone().or_else(|| record.document_id.clone()),
            status: item.status,
            cause,
        });
    }

    summary.failed = summary.failures.len();

    if response.errors && summary.failed == 0 {
        warn!("Bulk response flagged errors but no failed item was found");
    }

    Ok(summary)
}

/// Render a cluster error object as `<type>: <reason>`.
fn describe_error(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => {
            let error_type = fields.get("type").and_then(Value::as_str);
            let reason = fields.get("reason").and_then(Value::as_str);
            match (error_type, reason) {
                (Some(error_type), Some(reason)) => format!("{}: {}", error_type, reason),
                (Some(error_type), None) => error_type.to_string(),
                (None, Some(reason)) => reason.to_string(),
                (None, None) => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}
