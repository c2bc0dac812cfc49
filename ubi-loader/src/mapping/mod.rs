//! Index mapping loader.
//!
//! The mapping file is the full index creation body (settings and mappings).
//! It is passed to the cluster unmodified.

use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::MappingError;
use crate::status;

/// An index creation body loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDocument(Value);

impl MappingDocument {
    /// Wrap an already parsed body.
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// The body as sent to the index creation call.
    pub fn body(&self) -> &Value {
        &self.0
    }

    /// Consume the document and return the raw body.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Read and parse a mapping file.
///
/// # Arguments
///
/// * `path` - Path of the JSON mapping file
///
/// # Returns
///
/// * `Ok(MappingDocument)` - The parsed body
/// * `Err(MappingError)` - If the file is missing, unreadable or not valid JSON
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_mapping(path: impl AsRef<Path>) -> Result<MappingDocument, MappingError> {
    let path = path.as_ref();

    let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            MappingError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            MappingError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let body: Value = serde_json::from_str(&contents).map_err(|source| MappingError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(bytes = contents.len(), "Mapping file parsed");
    status::success(format!("Successfully read mapping from {}", path.display()));

    Ok(MappingDocument(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_valid_mapping() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"mappings": {{"properties": {{"action_name": {{"type": "keyword"}}}}}}}}"#
        )
        .unwrap();

        let mapping = load_mapping(file.path()).await.unwrap();

        assert_eq!(
            mapping.body(),
            &json!({"mappings": {"properties": {"action_name": {"type": "keyword"}}}})
        );
    }

    #[tokio::test]
    async fn test_load_missing_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let result = load_mapping(&path).await;

        match result {
            Err(MappingError::NotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_malformed_mapping() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"mappings": {{"properties": "#).unwrap();

        let result = load_mapping(file.path()).await;

        assert!(matches!(result, Err(MappingError::Format { .. })));
    }

    #[test]
    fn test_into_inner_returns_body() {
        let mapping = MappingDocument::new(json!({"settings": {"number_of_shards": 1}}));
        assert_eq!(mapping.into_inner()["settings"]["number_of_shards"], 1);
    }
}
