//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ConnectionConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::auth::ApiKeyAuth;
use crate::opensearch::bulk;
use crate::types::{BulkIndexSummary, BulkRecord};

/// OpenSearch provider implementation.
///
/// Holds a single client session bound to one cluster node. The session is
/// authenticated with a static API key and every request is bounded by the
/// configured timeout.
///
/// # Example
///
/// ```ignore
/// use ubi_loader_repository::{ConnectionConfig, OpenSearchProvider, SearchIndexProvider};
///
/// let config = ConnectionConfig::new("https://localhost:9200", api_key);
/// let provider = OpenSearchProvider::connect(&config).await?;
///
/// if provider.index_exists("ubi_events").await? {
///     provider.delete_index("ubi_events").await?;
/// }
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    host: String,
}

impl OpenSearchProvider {
    /// Build a provider for the configured cluster without touching the network.
    ///
    /// # Arguments
    ///
    /// * `config` - Host, API key and request timeout
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL, credential or transport is invalid
    pub fn new(config: &ConnectionConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(&config.host).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.request_timeout);
        let transport = ApiKeyAuth::parse(&config.api_key)?
            .apply(builder)?
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        debug!(
            host = %config.host,
            timeout_secs = config.request_timeout.as_secs(),
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            host: config.host.clone(),
        })
    }

    /// Build a provider and verify the cluster answers a ping.
    ///
    /// No retries: any failure is returned to the caller, which treats it as fatal.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, SearchIndexError> {
        let provider = Self::new(config)?;
        provider.ping().await?;

        info!(host = %provider.host, "Connected to search cluster");
        Ok(provider)
    }

    /// The cluster URL this provider talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn validate_index_name(index: &str) -> Result<(), SearchIndexError> {
        if index.trim().is_empty() {
            return Err(SearchIndexError::validation("Index name cannot be empty"));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            error!(status = %status, host = %self.host, "Ping failed");
            return Err(SearchIndexError::connection(format!(
                "Ping to {} failed with status {}",
                self.host, status
            )));
        }

        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        Self::validate_index_name(index)?;

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_check(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchIndexError::index_check(format!(
                "Existence check for '{}' returned status {}",
                index, status
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        Self::validate_index_name(index)?;

        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_deletion(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the index is already gone
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Deleting '{}' failed with status {}: {}",
                index, status, error_body
            )));
        }

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError> {
        Self::validate_index_name(index)?;

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SearchIndexError::index_creation(format!(
                "Creating '{}' failed with status {}: {}",
                index, status, error_body
            )));
        }

        debug!(index = %index, "Index created");
        Ok(())
    }

    #[instrument(skip(self, records), fields(record_count = records.len()))]
    async fn bulk_index(&self, records: &[BulkRecord]) -> Result<BulkIndexSummary, SearchIndexError> {
        if records.is_empty() {
            return Ok(BulkIndexSummary::default());
        }

        let body: Vec<JsonBody<Value>> = bulk::bulk_lines(records)
            .into_iter()
            .map(JsonBody::from)
            .collect();

        // No index in the path: every action line names its own target.
        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = bulk::summarize_bulk_response(records, response_body)?;

        debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = ConnectionConfig::new("not a url", "key");
        let result = OpenSearchProvider::new(&config);
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let config = ConnectionConfig::new("http://localhost:9200", "");
        let result = OpenSearchProvider::new(&config);
        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
    }

    #[test]
    fn test_new_does_not_contact_cluster() {
        let config = ConnectionConfig::new("http://localhost:1", "abc123==");
        let provider = OpenSearchProvider::new(&config).unwrap();
        assert_eq!(provider.host(), "http://localhost:1");
    }

    #[test]
    fn test_validate_index_name() {
        assert!(OpenSearchProvider::validate_index_name("ubi_events").is_ok());
        assert!(matches!(
            OpenSearchProvider::validate_index_name("  "),
            Err(SearchIndexError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_fails_before_network_on_bad_url() {
        let config = ConnectionConfig::new("::::", "key");
        let result = OpenSearchProvider::connect(&config).await;
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_index_operations_reject_empty_name() {
        let config = ConnectionConfig::new("http://localhost:1", "abc123==");
        let provider = OpenSearchProvider::new(&config).unwrap();

        assert!(matches!(
            provider.index_exists("").await,
            Err(SearchIndexError::ValidationError(_))
        ));
        assert!(matches!(
            provider.delete_index("").await,
            Err(SearchIndexError::ValidationError(_))
        ));
        assert!(matches!(
            provider.create_index("", &serde_json::json!({})).await,
            Err(SearchIndexError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_bulk_index_empty_is_noop() {
        let config = ConnectionConfig::new("http://localhost:1", "abc123==");
        let provider = OpenSearchProvider::new(&config).unwrap();

        let summary = provider.bulk_index(&[]).await.unwrap();
        assert_eq!(summary, BulkIndexSummary::default());
    }
}
