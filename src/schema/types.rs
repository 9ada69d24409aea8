//! Child record types
//!
//! `NewChild` and `ChildUpdate` are raw client payloads. They only become a
//! `ChildRecord` / `RecordPatch` after passing the validator, so every record
//! stored in a tree is known to be valid.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::tree::Key;

/// Document number identifying a child
pub type DocumentId = Key;

/// Gender of a child.
///
/// The original Spanish spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "Masculino")]
    Masculine,
    #[serde(alias = "Femenino")]
    Feminine,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Masculine => write!(f, "Masculine"),
            Gender::Feminine => write!(f, "Feminine"),
        }
    }
}

/// A validated child record as stored in a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub document: DocumentId,
    pub name: String,
    pub age: u8,
    pub city: String,
    pub gender: Gender,
    pub guardian: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create payload, not yet validated.
///
/// Numbers are signed so that negative input is reported as a validation
/// failure instead of a decoding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewChild {
    pub document: i64,
    pub name: String,
    pub age: i64,
    pub city: String,
    pub gender: Gender,
    pub guardian: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update payload, not yet validated.
///
/// `document` is not a field here: a body that tries to change it is
/// rejected as an unknown field. `notes` distinguishes an absent key
/// (`None`) from an explicit `null` (`Some(None)`), which clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub guardian: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

/// Any present value, `null` included, becomes `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub city: Option<String>,
    pub gender: Option<Gender>,
    pub guardian: Option<String>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl RecordPatch {
    /// Overwrite the provided fields of `record`; the document is untouched.
    pub fn apply(self, record: &mut ChildRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(city) = self.city {
            record.city = city;
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(guardian) = self.guardian {
            record.guardian = guardian;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
    }

    /// True when nothing would change
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }
}
