//! Link error types.

use thiserror::Error;

use crate::images::StorageError;

/// Rules broken by submitted link values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkValidationError {
    /// Title is empty.
    #[error("title is required")]
    MissingTitle,

    /// Open Graph type is empty.
    #[error("type must not be empty")]
    MissingType,

    /// A text field exceeds its limit.
    #[error("{field} is {len} characters long, the limit is {max}")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Actual length in characters.
        len: usize,
        /// Allowed length in characters.
        max: usize,
    },

    /// A URL field is not an absolute http(s) URL.
    #[error("{field} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl {
        /// Offending field.
        field: &'static str,
        /// Submitted value.
        value: String,
    },
}

/// Link operation errors.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Link not found.
    #[error("link not found: {0}")]
    NotFound(String),

    /// Submitted values are invalid.
    #[error("invalid link: {0}")]
    Validation(#[from] LinkValidationError),

    /// Storing the preview image failed.
    #[error("image storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LinkError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound(slug.into())
    }
}
