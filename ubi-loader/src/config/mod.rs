//! Configuration for the UBI loader.
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! `main` first). Only `ES_HOST` and `API_KEY` are required.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;
use ubi_loader_repository::{ConnectionConfig, DEFAULT_REQUEST_TIMEOUT_SECS};

use crate::loader::DEFAULT_CHUNK_SIZE;
use crate::LoaderError;

/// Default mapping file, applied to every provisioned index.
pub const DEFAULT_MAPPING_FILE: &str = "index_mappings/ubi_events-mappings.json";

/// Default indices to provision.
pub const DEFAULT_INDEX_NAMES: [&str; 2] = ["ubi_events", "ubi_queries"];

/// Default NDJSON bulk file.
pub const DEFAULT_BULK_FILE: &str = "sample_documents/bulk_index.ndjson";

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Cluster connection parameters.
    pub connection: ConnectionConfig,
    /// Mapping file read once per index.
    pub mapping_file: PathBuf,
    /// Indices to drop and recreate, in order.
    pub index_names: Vec<String>,
    /// NDJSON file with action/document pairs.
    pub bulk_file: PathBuf,
    /// Records per bulk request.
    pub chunk_size: usize,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `ES_HOST`: Cluster URL (required)
    /// - `API_KEY`: API key, encoded or `id:secret` (required)
    /// - `UBI_MAPPING_FILE`: Mapping file (default: index_mappings/ubi_events-mappings.json)
    /// - `UBI_INDEX_NAMES`: Comma-separated index names (default: ubi_events,ubi_queries)
    /// - `UBI_BULK_FILE`: Bulk file (default: sample_documents/bulk_index.ndjson)
    /// - `ES_REQUEST_TIMEOUT_SECS`: Request timeout in seconds (default: 60)
    /// - `BULK_CHUNK_SIZE`: Records per bulk request (default: 1000)
    pub fn from_env() -> Result<Self, LoaderError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Missing or empty required variables are errors. Optional numeric
    /// variables that do not parse fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoaderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = required(&lookup, "ES_HOST", "https://localhost:9200")?;
        let api_key = required(&lookup, "API_KEY", "your-api-key-here")?;

        let request_timeout = Duration::from_secs(positive_number(
            &lookup,
            "ES_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));
        let chunk_size = positive_number(&lookup, "BULK_CHUNK_SIZE", DEFAULT_CHUNK_SIZE as u64) as usize;

        let mapping_file = optional(&lookup, "UBI_MAPPING_FILE")
            .unwrap_or_else(|| DEFAULT_MAPPING_FILE.to_string());
        let bulk_file =
            optional(&lookup, "UBI_BULK_FILE").unwrap_or_else(|| DEFAULT_BULK_FILE.to_string());

        let index_names = match optional(&lookup, "UBI_INDEX_NAMES") {
            Some(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                if names.is_empty() {
                    return Err(LoaderError::config(
                        "UBI_INDEX_NAMES must name at least one index",
                    ));
                }
                names
            }
            None => DEFAULT_INDEX_NAMES.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            connection: ConnectionConfig::new(host, api_key).with_request_timeout(request_timeout),
            mapping_file: PathBuf::from(mapping_file),
            index_names,
            bulk_file: PathBuf::from(bulk_file),
            chunk_size,
        })
    }
}

/// A set, non-blank variable.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &str, example: &str) -> Result<String, LoaderError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| {
        LoaderError::config(format!(
            "{} environment variable not set (example: export {}='{}')",
            key, key, example
        ))
    })
}

fn positive_number<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key) {
        None => default,
        Some(raw) => match raw.parse::<u64>() {
            Ok(value) if value > 0 => value,
            _ => {
                warn!(key = key, value = %raw, default = default, "Invalid value, using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ES_HOST", "https://localhost:9200"),
            ("API_KEY", "abc123=="),
        ]))
        .unwrap();

        assert_eq!(config.connection.host, "https://localhost:9200");
        assert_eq!(config.connection.api_key, "abc123==");
        assert_eq!(config.connection.request_timeout, Duration::from_secs(60));
        assert_eq!(config.mapping_file, PathBuf::from(DEFAULT_MAPPING_FILE));
        assert_eq!(config.index_names, vec!["ubi_events", "ubi_queries"]);
        assert_eq!(config.bulk_file, PathBuf::from(DEFAULT_BULK_FILE));
        assert_eq!(config.chunk_size, 1000);
    }

    #[test]
    fn test_missing_host() {
        let result = AppConfig::from_lookup(lookup_from(&[("API_KEY", "abc123==")]));

        match result {
            Err(LoaderError::ConfigError(msg)) => assert!(msg.contains("ES_HOST")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_api_key() {
        let result = AppConfig::from_lookup(lookup_from(&[("ES_HOST", "https://localhost:9200")]));

        match result {
            Err(LoaderError::ConfigError(msg)) => assert!(msg.contains("API_KEY")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_required_value_is_missing() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("ES_HOST", "   "),
            ("API_KEY", "abc123=="),
        ]));

        assert!(matches!(result, Err(LoaderError::ConfigError(_))));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ES_HOST", "http://search:9200"),
            ("API_KEY", "id:secret"),
            ("UBI_MAPPING_FILE", "mappings/custom.json"),
            ("UBI_INDEX_NAMES", " ubi_events , , ubi_queries_v2 "),
            ("UBI_BULK_FILE", "data/other.ndjson"),
            ("ES_REQUEST_TIMEOUT_SECS", "15"),
            ("BULK_CHUNK_SIZE", "250"),
        ]))
        .unwrap();

        assert_eq!(config.mapping_file, PathBuf::from("mappings/custom.json"));
        assert_eq!(config.index_names, vec!["ubi_events", "ubi_queries_v2"]);
        assert_eq!(config.bulk_file, PathBuf::from("data/other.ndjson"));
        assert_eq!(config.connection.request_timeout, Duration::from_secs(15));
        assert_eq!(config.chunk_size, 250);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ES_HOST", "http://search:9200"),
            ("API_KEY", "abc123=="),
            ("ES_REQUEST_TIMEOUT_SECS", "soon"),
            ("BULK_CHUNK_SIZE", "0"),
        ]))
        .unwrap();

        assert_eq!(config.connection.request_timeout, Duration::from_secs(60));
        assert_eq!(config.chunk_size, 1000);
    }

    #[test]
    fn test_blank_index_names_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("ES_HOST", "http://search:9200"),
            ("API_KEY", "abc123=="),
            ("UBI_INDEX_NAMES", " , "),
        ]));

        assert!(matches!(result, Err(LoaderError::ConfigError(_))));
    }
}
