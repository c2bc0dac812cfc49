//! API key authentication for the cluster transport.

use opensearch::auth::Credentials;
use opensearch::http::headers::{HeaderValue, AUTHORIZATION};
use opensearch::http::transport::TransportBuilder;

use crate::errors::SearchIndexError;

/// How the configured API key is presented to the cluster.
pub(crate) enum ApiKeyAuth {
    /// An `id:secret` pair; the client encodes it.
    Pair { id: String, secret: String },
    /// A key that is already base64 encoded, sent verbatim.
    Encoded(String),
}

impl ApiKeyAuth {
    /// Classify a raw API key.
    ///
    /// Encoded keys never contain `:`, so anything with a colon is read as an
    /// `id:secret` pair and both halves must be non-empty.
    pub(crate) fn parse(raw: &str) -> Result<Self, SearchIndexError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SearchIndexError::validation("API key cannot be empty"));
        }

        match raw.split_once(':') {
            Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(Self::Pair {
                id: id.to_string(),
                secret: secret.to_string(),
            }),
            Some(_) => Err(SearchIndexError::validation(
                "API key in id:secret form must have a non-empty id and secret",
            )),
            None => Ok(Self::Encoded(raw.to_string())),
        }
    }

    /// Attach the credential to a transport builder.
    pub(crate) fn apply(self, builder: TransportBuilder) -> Result<TransportBuilder, SearchIndexError> {
        match self {
            Self::Pair { id, secret } => Ok(builder.auth(Credentials::ApiKey(id, secret))),
            Self::Encoded(key) => {
                let value = HeaderValue::from_str(&format!("ApiKey {}", key)).map_err(|_| {
                    SearchIndexError::validation("API key contains characters not allowed in a header")
                })?;
                Ok(builder.header(AUTHORIZATION, value))
            }
        }
    }
}
