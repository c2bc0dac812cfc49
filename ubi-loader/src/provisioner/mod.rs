//! Index provisioner.
//!
//! Provisioning is destructive: an existing index of the same name is deleted
//! with all its documents before the new one is created. Running it twice
//! leaves the same empty index with the same mapping.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::{ProvisionError, ProvisionStep};
use crate::mapping::MappingDocument;
use crate::status;
use ubi_loader_repository::SearchIndexProvider;

/// What provisioning did to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The index did not exist and was created.
    Created,
    /// The index existed, was deleted and created again.
    Recreated,
}

/// Drops and recreates indices with a given mapping.
pub struct IndexProvisioner {
    provider: Arc<dyn SearchIndexProvider>,
}

impl IndexProvisioner {
    /// Create a new provisioner using the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Delete `index` if it exists, then create it with `mapping`.
    ///
    /// No step is retried; the first cluster error is returned.
    #[instrument(skip(self, mapping))]
    pub async fn provision(
        &self,
        index: &str,
        mapping: &MappingDocument,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let error = |step: ProvisionStep| {
            move |source| ProvisionError {
                index: index.to_string(),
                step,
                source,
            }
        };

        let exists = self
            .provider
            .index_exists(index)
            .await
            .map_err(error(ProvisionStep::Check))?;

        if exists {
            status::warning(format!(
                "Index '{}' already exists. Deleting it first...",
                index
            ));
            self.provider
                .delete_index(index)
                .await
                .map_err(error(ProvisionStep::Delete))?;
            status::success(format!("Successfully deleted existing index '{}'", index));
        }

        self.provider
            .create_index(index, mapping.body())
            .await
            .map_err(error(ProvisionStep::Create))?;

        info!(index = %index, recreated = exists, "Index provisioned");
        status::success(format!(
            "Successfully created index '{}' with mapping",
            index
        ));

        Ok(if exists {
            ProvisionOutcome::Recreated
        } else {
            ProvisionOutcome::Created
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use ubi_loader_repository::{BulkIndexSummary, BulkRecord, SearchIndexError};

    /// In-memory cluster that records every admin call.
    #[derive(Default)]
    struct MockClusterProvider {
        indices: Mutex<HashMap<String, Value>>,
        calls: Mutex<Vec<String>>,
        fail_delete: bool,
        fail_create: bool,
    }

    impl MockClusterProvider {
        fn with_index(name: &str, mapping: Value) -> Self {
            let provider = Self::default();
            provider
                .indices
                .lock()
                .unwrap()
                .insert(name.to_string(), mapping);
            provider
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockClusterProvider {
        async fn ping(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
            self.calls.lock().unwrap().push(format!("exists:{}", index));
            Ok(self.indices.lock().unwrap().contains_key(index))
        }

        async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
            self.calls.lock().unwrap().push(format!("delete:{}", index));
            if self.fail_delete {
                return Err(SearchIndexError::index_deletion("status 403"));
            }
            self.indices.lock().unwrap().remove(index);
            Ok(())
        }

        async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError> {
            self.calls.lock().unwrap().push(format!("create:{}", index));
            if self.fail_create {
                return Err(SearchIndexError::index_creation("status 400"));
            }
            let mut indices = self.indices.lock().unwrap();
            if indices.contains_key(index) {
                return Err(SearchIndexError::index_creation(
                    "resource_already_exists_exception",
                ));
            }
            indices.insert(index.to_string(), body.clone());
            Ok(())
        }

        async fn bulk_index(
            &self,
            _records: &[BulkRecord],
        ) -> Result<BulkIndexSummary, SearchIndexError> {
            Ok(BulkIndexSummary::default())
        }
    }

    fn mapping() -> MappingDocument {
        MappingDocument::new(json!({
            "mappings": {"properties": {"timestamp": {"type": "date"}}}
        }))
    }

    #[tokio::test]
    async fn test_provision_new_index() {
        let provider = Arc::new(MockClusterProvider::default());
        let provisioner = IndexProvisioner::new(provider.clone());

        let outcome = provisioner.provision("ubi_events", &mapping()).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::Created);
        assert_eq!(provider.calls(), vec!["exists:ubi_events", "create:ubi_events"]);
        assert_eq!(
            provider.indices.lock().unwrap().get("ubi_events"),
            Some(mapping().body())
        );
    }

    #[tokio::test]
    async fn test_provision_existing_index_deletes_then_creates() {
        let provider = Arc::new(MockClusterProvider::with_index(
            "ubi_events",
            json!({"mappings": {"properties": {"old": {"type": "text"}}}}),
        ));
        let provisioner = IndexProvisioner::new(provider.clone());

        let outcome = provisioner.provision("ubi_events", &mapping()).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::Recreated);
        assert_eq!(
            provider.calls(),
            vec!["exists:ubi_events", "delete:ubi_events", "create:ubi_events"]
        );
        assert_eq!(
            provider.indices.lock().unwrap().get("ubi_events"),
            Some(mapping().body())
        );
    }

    #[tokio::test]
    async fn test_provision_twice_is_idempotent() {
        let provider = Arc::new(MockClusterProvider::default());
        let provisioner = IndexProvisioner::new(provider.clone());

        provisioner.provision("ubi_queries", &mapping()).await.unwrap();
        let second = provisioner.provision("ubi_queries", &mapping()).await.unwrap();

        assert_eq!(second, ProvisionOutcome::Recreated);
        assert_eq!(provider.indices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_stops_before_create() {
        let provider = Arc::new(MockClusterProvider {
            fail_delete: true,
            ..MockClusterProvider::with_index("ubi_events", json!({}))
        });
        let provisioner = IndexProvisioner::new(provider.clone());

        let err = provisioner
            .provision("ubi_events", &mapping())
            .await
            .unwrap_err();

        assert_eq!(err.step, ProvisionStep::Delete);
        assert_eq!(err.index, "ubi_events");
        assert!(!provider.calls().iter().any(|c| c.starts_with("create:")));
    }

    #[tokio::test]
    async fn test_create_failure_is_reported() {
        let provider = Arc::new(MockClusterProvider {
            fail_create: true,
            ..Default::default()
        });
        let provisioner = IndexProvisioner::new(provider);

        let err = provisioner
            .provision("ubi_events", &mapping())
            .await
            .unwrap_err();

        assert_eq!(err.step, ProvisionStep::Create);
        assert!(matches!(err.source, SearchIndexError::IndexCreationError(_)));
    }
}
