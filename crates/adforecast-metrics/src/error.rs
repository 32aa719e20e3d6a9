use thiserror::Error;

/// Errors returned by the ads metrics API client.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered `"success": false`.
    #[error("ads API error: {0}")]
    ApiError(String),

    /// A successful response carried no finite, positive average CPC.
    #[error("response carried no usable average CPC")]
    MissingCpc,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors from a [`crate::store::KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object of strings.
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A single value could not be decoded as the expected type.
    #[error("malformed value under key {key}: {source}")]
    MalformedEntry {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}
