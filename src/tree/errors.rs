//! Tree error types
//!
//! Error codes:
//! - TREE_DUPLICATE_KEY (REJECT)
//! - TREE_KEY_NOT_FOUND (REJECT)
//!
//! Tree errors never leave the tree in a partially mutated state, so none
//! of them are fatal.

use std::fmt;

use super::Key;

/// Severity levels for tree errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, tree unchanged
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Tree-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeErrorCode {
    /// Insert with a key that is already stored
    DuplicateKey,
    /// Lookup, update or delete with an absent key
    KeyNotFound,
}

impl TreeErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            TreeErrorCode::DuplicateKey => "TREE_DUPLICATE_KEY",
            TreeErrorCode::KeyNotFound => "TREE_KEY_NOT_FOUND",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for TreeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Tree error with the offending key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeError {
    code: TreeErrorCode,
    key: Key,
}

impl TreeError {
    /// Create a duplicate key error
    pub fn duplicate_key(key: Key) -> Self {
        Self {
            code: TreeErrorCode::DuplicateKey,
            key,
        }
    }

    /// Create a key not found error
    pub fn not_found(key: Key) -> Self {
        Self {
            code: TreeErrorCode::KeyNotFound,
            key,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> TreeErrorCode {
        self.code
    }

    /// Returns the key the operation was attempted with
    pub fn key(&self) -> Key {
        self.key
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Tree errors are never fatal
    pub fn is_fatal(&self) -> bool {
        false
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            TreeErrorCode::DuplicateKey => write!(
                f,
                "[{}] {}: key {} already exists",
                self.severity(),
                self.code,
                self.key
            ),
            TreeErrorCode::KeyNotFound => write!(
                f,
                "[{}] {}: key {} not found",
                self.severity(),
                self.code,
                self.key
            ),
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;
