//! Connection configuration for the search cluster.

use std::fmt;
use std::time::Duration;

/// Default request timeout applied to every cluster call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Parameters needed to open a session against the search cluster.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Cluster URL (e.g., "https://localhost:9200").
    pub host: String,
    /// Static API key sent with every request.
    pub api_key: String,
    /// Timeout for a single request, including bulk writes.
    pub request_timeout: Duration,
}

impl ConnectionConfig {
    /// Create a config with the default request timeout.
    ///
    /// # Arguments
    ///
    /// * `host` - The cluster URL
    /// * `api_key` - Either an `id:secret` pair or an already encoded API key
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

// The API key must never end up in logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = ConnectionConfig::new("http://localhost:9200", "key");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_with_request_timeout() {
        let config = ConnectionConfig::new("http://localhost:9200", "key")
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ConnectionConfig::new("http://localhost:9200", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("http://localhost:9200"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("super-secret"));
    }
}
