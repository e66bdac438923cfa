//! Canonical submission-side types.
//!
//! These are the values the form-rendering layer hands to the integrity
//! module after field-level validation. They are owned by one submission,
//! immutable once hashed, and conservative to serialize (serde, JSON/CBOR).

use serde::{Deserialize, Serialize};

use crate::error::MalformedEntryError;
use formseal_crypto::{Digest, DIGEST_LEN, NONCE_LEN};

/// Reserved root for a submission with zero fields.
pub const ZERO_ROOT: Digest = [0u8; DIGEST_LEN];

/// One field's value as entered into a dynamic form.
///
/// Numbers keep their IEEE-754 bit pattern through canonicalization, so two
/// values hash alike iff their bits agree (`-0.0` and `0.0` are distinct).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    /// Free-form text (also covers email/select/radio style fields).
    Text(String),
    /// Numeric input.
    Number(f64),
    /// Checkbox/toggle state.
    Boolean(bool),
    /// Multi-select or repeated-group values, possibly nested.
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Construct a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Construct a numeric value.
    #[inline]
    #[must_use]
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Construct a boolean value.
    #[inline]
    #[must_use]
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Construct an array value.
    #[inline]
    #[must_use]
    pub const fn array(items: Vec<FieldValue>) -> Self {
        Self::Array(items)
    }
}

/// One field's contribution to a submission: id, value, and salt.
///
/// The nonce crosses the same serde boundary as the rest of the submission
/// record, so it is carried as raw bytes and validated to [`NONCE_LEN`] when
/// the entry is committed rather than at construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldValueEntry {
    /// Field identifier, unique within one submission.
    pub field_id: String,
    /// The value the user entered.
    pub value: FieldValue,
    /// 32-byte salt, generated once per field per submission.
    pub nonce: Vec<u8>,
}

impl FieldValueEntry {
    /// Construct a new entry.
    pub fn new(field_id: impl Into<String>, value: FieldValue, nonce: impl Into<Vec<u8>>) -> Self {
        Self {
            field_id: field_id.into(),
            value,
            nonce: nonce.into(),
        }
    }

    /// Check the shape constraints every committed entry must satisfy.
    pub fn validate(&self) -> Result<(), MalformedEntryError> {
        if self.field_id.is_empty() {
            return Err(MalformedEntryError::EmptyFieldId);
        }
        if self.nonce.len() != NONCE_LEN {
            return Err(MalformedEntryError::BadNonceLength {
                len: self.nonce.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, FieldValueEntry};
    use crate::error::MalformedEntryError;

    #[test]
    fn validate_accepts_well_formed_entries() {
        let e = FieldValueEntry::new("email", FieldValue::text("a@b.c"), [7u8; 32]);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_field_id() {
        let e = FieldValueEntry::new("", FieldValue::boolean(true), [0u8; 32]);
        assert_eq!(e.validate(), Err(MalformedEntryError::EmptyFieldId));
    }

    #[test]
    fn validate_rejects_short_nonce() {
        let e = FieldValueEntry::new("age", FieldValue::number(41.0), vec![0u8; 16]);
        assert_eq!(
            e.validate(),
            Err(MalformedEntryError::BadNonceLength { len: 16 })
        );
    }

    #[test]
    fn field_value_serde_json_roundtrip() {
        let v = FieldValue::array(vec![
            FieldValue::text("red"),
            FieldValue::number(5.0),
            FieldValue::boolean(false),
        ]);
        let json = serde_json::to_string(&v).unwrap();
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
