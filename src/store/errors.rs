//! Record store errors

use thiserror::Error;

use crate::schema::SchemaError;
use crate::tree::{Key, ParseOrderError, TreeError, TreeErrorCode};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by [`RecordStore`](super::RecordStore).
///
/// Every variant is a rejected request; none of them leaves the store in a
/// modified state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this document already exists
    #[error("a child with document {0} already exists")]
    Duplicate(Key),

    /// No record with this document
    #[error("no child found with document {0}")]
    NotFound(Key),

    /// Payload failed domain validation
    #[error("{0}")]
    Validation(#[from] SchemaError),

    /// Traversal order parameter not one of in, pre, post
    #[error("invalid traversal order '{0}', expected in, pre or post")]
    InvalidOrder(String),

    /// Seed record at `index` could not be loaded
    #[error("seed record #{index} rejected: {source}")]
    Seed {
        index: usize,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Duplicate(_) => TreeErrorCode::DuplicateKey.code(),
            StoreError::NotFound(_) => TreeErrorCode::KeyNotFound.code(),
            StoreError::Validation(err) => err.code().code(),
            StoreError::InvalidOrder(_) => "STORE_INVALID_ORDER",
            StoreError::Seed { source, .. } => source.code(),
        }
    }

    /// True when the request named a document that is not stored
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::NotFound(_) => true,
            StoreError::Seed { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<TreeError> for StoreError {
    fn from(err: TreeError) -> Self {
        match err.code() {
            TreeErrorCode::DuplicateKey => StoreError::Duplicate(err.key()),
            TreeErrorCode::KeyNotFound => StoreError::NotFound(err.key()),
        }
    }
}

impl From<ParseOrderError> for StoreError {
    fn from(err: ParseOrderError) -> Self {
        StoreError::InvalidOrder(err.0)
    }
}
