// crates/formseal-merkle/src/leaf.rs

//! Canonical leaf commitments.
//!
//! A leaf binds one `(field_id, value, nonce)` triple into a single digest.
//! Every variable-length component is length-prefixed and every value
//! variant is type-tagged, so semantically different inputs can never
//! canonicalize to the same byte string (`field_id="ab", value="c"` must
//! not collide with `field_id="a", value="bc"`).

use blake3::Hasher;

use formseal_core::{FieldValue, FieldValueEntry, MalformedEntryError};
use formseal_crypto::Digest;

/// Domain tag separating leaf encodings from interior-node hashing.
const DS_LEAF: &[u8] = b"formseal.leaf.v1";

// Value type tags.
const TAG_TEXT: u8 = 0x01;
const TAG_NUMBER: u8 = 0x02;
const TAG_BOOLEAN: u8 = 0x03;
const TAG_ARRAY: u8 = 0x04;

#[inline]
fn absorb_bytes(h: &mut Hasher, bytes: &[u8]) {
    h.update(&(bytes.len() as u32).to_le_bytes());
    h.update(bytes);
}

fn absorb_value(h: &mut Hasher, value: &FieldValue) {
    match value {
        FieldValue::Text(s) => {
            h.update(&[TAG_TEXT]);
            absorb_bytes(h, s.as_bytes());
        }
        FieldValue::Number(n) => {
            h.update(&[TAG_NUMBER]);
            h.update(&n.to_bits().to_le_bytes());
        }
        FieldValue::Boolean(b) => {
            h.update(&[TAG_BOOLEAN]);
            h.update(&[u8::from(*b)]);
        }
        FieldValue::Array(items) => {
            h.update(&[TAG_ARRAY]);
            h.update(&(items.len() as u32).to_le_bytes());
            for item in items {
                absorb_value(h, item);
            }
        }
    }
}

/// Commit one field entry into its 32-byte leaf digest.
///
/// Pure and deterministic; recomputed wherever needed, never stored on its
/// own. Fails only on shape violations (empty field id, nonce not exactly
/// 32 bytes).
pub fn commit_leaf(entry: &FieldValueEntry) -> Result<Digest, MalformedEntryError> {
    entry.validate()?;
    let mut h = Hasher::new();
    h.update(DS_LEAF);
    absorb_bytes(&mut h, entry.field_id.as_bytes());
    absorb_value(&mut h, &entry.value);
    // Fixed 32 bytes after validate(), so no prefix is needed.
    h.update(&entry.nonce);
    Ok(*h.finalize().as_bytes())
}
