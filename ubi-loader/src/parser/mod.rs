//! NDJSON bulk file parser.
//!
//! A bulk export alternates action lines and document lines:
//!
//! ```text
//! {"index": {"_index": "ubi_events", "_id": "1"}}
//! {"action_name": "click", "query_id": "q-1"}
//! ```
//!
//! The parser walks the lines with a two-state machine. Blank lines are ignored
//! in either state. A line that is not a valid action is skipped on its own and
//! the next line is tried as an action. A document line that is not a JSON
//! object drops its pair: both the action and the document line are consumed.
//! An action on the last line with no document after it produces no record.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};
use ubi_loader_repository::BulkRecord;

use crate::errors::BulkFileError;
use crate::status;

/// `{"index": {...}}` action line.
#[derive(Debug, Deserialize)]
struct ActionLine {
    index: ActionMetadata,
}

#[derive(Debug, Deserialize)]
struct ActionMetadata {
    #[serde(rename = "_index")]
    target_index: String,
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
}

/// Where the parser is within an action/document pair.
#[derive(Debug)]
enum ParserState {
    ExpectAction,
    ExpectDocument {
        action: ActionMetadata,
        action_line: usize,
    },
}

/// A line the parser skipped. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// The line is not a valid action descriptor; only this line was skipped.
    InvalidAction { line: usize, reason: String },
    /// The document after a valid action is not a JSON object; the pair was dropped.
    InvalidDocument {
        line: usize,
        action_line: usize,
        reason: String,
    },
    /// A valid action with no document line after it.
    MissingDocument { line: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction { line, reason } => {
                write!(f, "Invalid action at line {}: {}", line, reason)
            }
            Self::InvalidDocument {
                line,
                action_line,
                reason,
            } => write!(
                f,
                "Invalid document at line {} for action at line {}: {}",
                line, action_line, reason
            ),
            Self::MissingDocument { line } => {
                write!(f, "Missing document data for index action at line {}", line)
            }
        }
    }
}

/// Records and warnings produced from one bulk file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBulkFile {
    /// Records in the order they appear in the file.
    pub records: Vec<BulkRecord>,
    /// Every skipped line, in file order.
    pub warnings: Vec<ParseWarning>,
}

/// Parse bulk NDJSON content.
pub fn parse_bulk_str(content: &str) -> ParsedBulkFile {
    let mut parsed = ParsedBulkFile::default();
    let mut state = ParserState::ExpectAction;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        state = match state {
            ParserState::ExpectAction => match serde_json::from_str::<ActionLine>(line) {
                Ok(action_line) => ParserState::ExpectDocument {
                    action: action_line.index,
                    action_line: line_number,
                },
                Err(e) => {
                    debug!(line = line_number, error = %e, "Skipping invalid action line");
                    parsed.warnings.push(ParseWarning::InvalidAction {
                        line: line_number,
                        reason: e.to_string(),
                    });
                    ParserState::ExpectAction
                }
            },
            ParserState::ExpectDocument {
                action,
                action_line,
            } => {
                match serde_json::from_str::<Map<String, Value>>(line) {
                    Ok(source) => parsed.records.push(BulkRecord::new(
                        action.target_index,
                        action.document_id,
                        source,
                    )),
                    Err(e) => {
                        debug!(
                            line = line_number,
                            action_line = action_line,
                            error = %e,
                            "Dropping pair with invalid document"
                        );
                        parsed.warnings.push(ParseWarning::InvalidDocument {
                            line: line_number,
                            action_line,
                            reason: e.to_string(),
                        });
                    }
                }
                ParserState::ExpectAction
            }
        };
    }

    if let ParserState::ExpectDocument { action_line, .. } = state {
        debug!(line = action_line, "Trailing action without document");
        parsed
            .warnings
            .push(ParseWarning::MissingDocument { line: action_line });
    }

    parsed
}

/// Read and parse a bulk NDJSON file.
///
/// Prints a warning line for every skipped line and a success line with the
/// record count.
///
/// # Returns
///
/// * `Ok(ParsedBulkFile)` - Records and warnings; may contain zero records
/// * `Err(BulkFileError)` - Only if the file cannot be read
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn parse_bulk_file(path: impl AsRef<Path>) -> Result<ParsedBulkFile, BulkFileError> {
    let path = path.as_ref();

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BulkFileError::from_io(path.to_path_buf(), source))?;

    let parsed = parse_bulk_str(&content);

    for warning in &parsed.warnings {
        status::warning(format!("Warning: {}", warning));
    }

    info!(
        records = parsed.records.len(),
        skipped = parsed.warnings.len(),
        "Parsed bulk file"
    );
    status::success(format!(
        "Successfully parsed {} documents from {}",
        parsed.records.len(),
        path.display()
    ));

    Ok(parsed)
}
