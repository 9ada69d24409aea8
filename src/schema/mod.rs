//! Child record schema
//!
//! Every record is validated before it reaches a tree.
//!
//! # Design Principles
//!
//! - Raw payloads (`NewChild`, `ChildUpdate`) are distinct types from
//!   validated ones (`ChildRecord`, `RecordPatch`)
//! - The document id is immutable and never part of an update
//! - Rules differ per tree variant (`ValidationRules::for_kind`)
//! - Deterministic: the first failing field is reported

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use types::{ChildRecord, ChildUpdate, DocumentId, Gender, NewChild, RecordPatch};
pub use validator::{RecordValidator, ValidationRules, AVL_MAX_DOCUMENT, MAX_CHILD_AGE};
