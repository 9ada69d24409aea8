//! Record validator
//!
//! Validation semantics:
//! - document is a positive integer, bounded per tree variant
//! - name, city and guardian are non-empty after trimming
//! - age lies within the configured range
//! - text fields respect their length limits
//!
//! The validator never touches a tree. A payload either converts into a
//! fully valid record or patch, or is rejected with the first failing field.

use crate::tree::TreeKind;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{ChildRecord, ChildUpdate, DocumentId, NewChild, RecordPatch};

/// Largest document id the AVL service accepts (six digits)
pub const AVL_MAX_DOCUMENT: DocumentId = 999_999;

/// Oldest accepted age, in years
pub const MAX_CHILD_AGE: u8 = 18;

const MAX_TEXT_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 500;

/// Domain rules applied before a record reaches a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    /// Upper bound for document ids, `None` for unbounded
    pub max_document: Option<DocumentId>,
    /// Oldest accepted age
    pub max_age: u8,
    /// Length limit for name, city and guardian
    pub max_text_len: usize,
    /// Restrict name and guardian to letters and spaces
    pub letters_only_names: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_document: None,
            max_age: MAX_CHILD_AGE,
            max_text_len: MAX_TEXT_LEN,
            letters_only_names: false,
        }
    }
}

impl ValidationRules {
    /// Rules used by the store of the given variant.
    ///
    /// The AVL service bounds ids to six digits and only accepts letters
    /// and spaces in person names; the BST service has neither rule.
    pub fn for_kind(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Bst => Self::default(),
            TreeKind::Avl => Self {
                max_document: Some(AVL_MAX_DOCUMENT),
                letters_only_names: true,
                ..Self::default()
            },
        }
    }
}

/// Validates create and update payloads against a rule set.
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    rules: ValidationRules,
}

impl RecordValidator {
    /// Creates a validator enforcing `rules`
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Checks a raw document number and converts it to a key.
    ///
    /// # Errors
    ///
    /// `SCHEMA_DOCUMENT_OUT_OF_RANGE` when the id is not positive or is
    /// above the variant's bound.
    pub fn check_document(&self, document: i64) -> SchemaResult<DocumentId> {
        let max = self
            .rules
            .max_document
            .map_or(i64::MAX, |max| i64::try_from(max).unwrap_or(i64::MAX));

        if document < 1 || document > max {
            return Err(SchemaError::document_out_of_range(1, max, document));
        }
        Ok(document as DocumentId)
    }

    /// Validates a create payload into a storable record.
    pub fn validate_new(&self, child: NewChild) -> SchemaResult<ChildRecord> {
        let document = self.check_document(child.document)?;

        Ok(ChildRecord {
            document,
            name: self.person_name("name", &child.name)?,
            age: self.age(child.age)?,
            city: self.text("city", &child.city)?,
            gender: child.gender,
            guardian: self.person_name("guardian", &child.guardian)?,
            notes: self.notes(child.notes.as_deref())?,
        })
    }

    /// Validates the provided fields of an update payload.
    pub fn validate_update(&self, update: ChildUpdate) -> SchemaResult<RecordPatch> {
        Ok(RecordPatch {
            name: update
                .name
                .map(|name| self.person_name("name", &name))
                .transpose()?,
            age: update.age.map(|age| self.age(age)).transpose()?,
            city: update
                .city
                .map(|city| self.text("city", &city))
                .transpose()?,
            gender: update.gender,
            guardian: update
                .guardian
                .map(|guardian| self.person_name("guardian", &guardian))
                .transpose()?,
            notes: update
                .notes
                .map(|notes| self.notes(notes.as_deref()))
                .transpose()?,
        })
    }

    fn text(&self, field: &str, value: &str) -> SchemaResult<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SchemaError::validation_failed(
                ValidationDetails::empty_field(field),
            ));
        }

        let len = trimmed.chars().count();
        if len > self.rules.max_text_len {
            return Err(SchemaError::validation_failed(ValidationDetails::too_long(
                field,
                self.rules.max_text_len,
                len,
            )));
        }
        Ok(trimmed.to_string())
    }

    fn person_name(&self, field: &str, value: &str) -> SchemaResult<String> {
        let text = self.text(field, value)?;
        if self.rules.letters_only_names
            && !text.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            return Err(SchemaError::validation_failed(ValidationDetails::new(
                field,
                "letters and spaces only",
                text,
            )));
        }
        Ok(text)
    }

    fn age(&self, age: i64) -> SchemaResult<u8> {
        let max = i64::from(self.rules.max_age);
        if !(0..=max).contains(&age) {
            return Err(SchemaError::validation_failed(
                ValidationDetails::out_of_range("age", 0, max, age),
            ));
        }
        Ok(age as u8)
    }

    fn notes(&self, notes: Option<&str>) -> SchemaResult<Option<String>> {
        let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        let len = notes.chars().count();
        if len > MAX_NOTES_LEN {
            return Err(SchemaError::validation_failed(ValidationDetails::too_long(
                "notes",
                MAX_NOTES_LEN,
                len,
            )));
        }
        Ok(Some(notes.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Gender, SchemaErrorCode};

    fn payload(document: i64) -> NewChild {
        NewChild {
            document,
            name: "  Juan Perez ".into(),
            age: 10,
            city: "Bogota".into(),
            gender: Gender::Masculine,
            guardian: "Maria Perez".into(),
            notes: Some("   ".into()),
        }
    }

    fn bst() -> RecordValidator {
        RecordValidator::new(ValidationRules::for_kind(TreeKind::Bst))
    }

    fn avl() -> RecordValidator {
        RecordValidator::new(ValidationRules::for_kind(TreeKind::Avl))
    }

    #[test]
    fn test_valid_payload_is_trimmed() {
        let record = bst().validate_new(payload(1_234_567_890)).unwrap();
        assert_eq!(record.document, 1_234_567_890);
        assert_eq!(record.name, "Juan Perez");
        assert_eq!(record.notes, None);
    }

    #[test]
    fn test_document_must_be_positive() {
        for document in [0, -5] {
            let err = bst().validate_new(payload(document)).unwrap_err();
            assert_eq!(err.code(), SchemaErrorCode::DocumentOutOfRange);
        }
    }

    #[test]
    fn test_avl_document_bound() {
        assert!(avl().validate_new(payload(999_999)).is_ok());
        let err = avl().validate_new(payload(1_000_000)).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::DocumentOutOfRange);
        assert!(bst().validate_new(payload(1_000_000)).is_ok());
    }

    #[test]
    fn test_age_range() {
        let mut child = payload(1);
        child.age = 19;
        let err = bst().validate_new(child.clone()).unwrap_err();
        assert_eq!(err.field(), "age");

        child.age = -1;
        assert!(bst().validate_new(child.clone()).is_err());

        child.age = 0;
        assert_eq!(bst().validate_new(child).unwrap().age, 0);
    }

    #[test]
    fn test_empty_text_rejected() {
        let mut child = payload(1);
        child.city = "   ".into();
        let err = bst().validate_new(child).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
        assert_eq!(err.field(), "city");
    }

    #[test]
    fn test_text_length_limit() {
        let mut child = payload(1);
        child.name = "a".repeat(101);
        assert_eq!(bst().validate_new(child).unwrap_err().field(), "name");
    }

    #[test]
    fn test_avl_letters_only_names() {
        let mut child = payload(10);
        child.name = "R2D2".into();
        assert_eq!(avl().validate_new(child.clone()).unwrap_err().field(), "name");
        assert!(bst().validate_new(child).is_ok());

        let mut child = payload(10);
        child.name = "José Ángel".into();
        assert!(avl().validate_new(child).is_ok());
    }

    #[test]
    fn test_update_validates_only_provided_fields() {
        let patch = bst()
            .validate_update(ChildUpdate {
                age: Some(7),
                city: Some(" Cali ".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patch.age, Some(7));
        assert_eq!(patch.city.as_deref(), Some("Cali"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.notes, None);

        let err = bst()
            .validate_update(ChildUpdate {
                name: Some(String::new()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_update_blank_notes_clear() {
        for notes in [None, Some(String::new()), Some("  ".to_string())] {
            let patch = bst()
                .validate_update(ChildUpdate {
                    notes: Some(notes),
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(patch.notes, Some(None));
        }

        let err = bst()
            .validate_update(ChildUpdate {
                notes: Some(Some("x".repeat(501))),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.field(), "notes");
    }
}
