use thiserror::Error;

/// Failures of a chart data request. All of them end up as the same
/// user-facing error state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The body was not valid JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The body was valid JSON but not an array
    #[error("Invalid data: response is not an array")]
    NotAnArray,

    /// An array element did not match the expected record shape
    #[error("Invalid records: {0}")]
    InvalidRecords(String),
}

/// Failures reported by a durable storage backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Error returned by a cache write once the single retry after eviction has
/// also failed.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Durable cache write failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}
