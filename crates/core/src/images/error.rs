//! Image storage error types.

use std::time::Duration;

use thiserror::Error;

/// Image storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object is stored under the key.
    #[error("image not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// The key cannot address an object.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The image could not be encoded for upload.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// The stored bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The backing bucket could not be verified or created.
    #[error("bucket '{bucket}' is unavailable: {message}")]
    Bucket {
        /// Bucket name.
        bucket: &'static str,
        /// Underlying failure.
        message: String,
    },

    /// A remote call did not finish in time.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Operation that was cut off.
        operation: &'static str,
        /// Configured bound.
        after: Duration,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Remote storage operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an encoding error.
    #[must_use]
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a decoding error.
    #[must_use]
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a bucket bootstrap error.
    #[must_use]
    pub fn bucket(bucket: &'static str, msg: impl Into<String>) -> Self {
        Self::Bucket {
            bucket,
            message: msg.into(),
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::Timeout { operation, after }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Whether the error means the key holds nothing, as opposed to the
    /// backend failing to answer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}
