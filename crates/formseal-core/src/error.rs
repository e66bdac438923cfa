//! Error taxonomy for the integrity module.
//!
//! All of these are local, synchronous, and non-retryable: they indicate a
//! programming error in the caller (the form layer should never produce
//! duplicate field ids or malformed nonces), not a transient condition.
//! A failed *verification* is deliberately not represented here: a root
//! mismatch is a normal `false` result, a trust decision for the caller.

use thiserror::Error;

/// An entry whose shape cannot be committed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedEntryError {
    /// The entry's field id is the empty string.
    #[error("field id must not be empty")]
    EmptyFieldId,
    /// The entry's nonce is not exactly [`crate::NONCE_LEN`] bytes.
    #[error("nonce must be exactly 32 bytes, got {len}")]
    BadNonceLength {
        /// Observed nonce length.
        len: usize,
    },
}

/// Two entries in one submission share a field id.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("duplicate field id {field_id:?}")]
pub struct DuplicateFieldError {
    /// The offending id.
    pub field_id: String,
}

/// A structurally invalid proof handed to the verifier.
///
/// Note the asymmetry with verification *failure*: a proof that is shaped
/// correctly but does not reproduce the root yields `Ok(false)`, not an
/// error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedProofError {
    /// The proof's field id is the empty string.
    #[error("proof field id must not be empty")]
    EmptyFieldId,
    /// The proof was generated for a different field than the entry.
    #[error("proof is for field {proof:?}, entry is for field {entry:?}")]
    FieldIdMismatch {
        /// Field id carried by the entry.
        entry: String,
        /// Field id carried by the proof.
        proof: String,
    },
    /// The proof path exceeds the supported tree depth.
    #[error("proof path has {depth} levels, maximum is {max}")]
    PathTooDeep {
        /// Observed path length.
        depth: usize,
        /// Maximum accepted path length.
        max: usize,
    },
    /// A digest at the verifier boundary is not exactly [`crate::DIGEST_LEN`] bytes.
    #[error("digest must be exactly 32 bytes, got {len}")]
    BadDigestLength {
        /// Observed digest length.
        len: usize,
    },
}

/// Everything that can go wrong while committing a submission.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    /// An entry failed shape validation.
    #[error(transparent)]
    MalformedEntry(#[from] MalformedEntryError),
    /// Two entries share a field id.
    #[error(transparent)]
    DuplicateField(#[from] DuplicateFieldError),
}

/// Proof extraction asked for a field the tree does not contain.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProofError {
    /// No leaf with this field id was committed.
    #[error("field {field_id:?} is not part of this tree")]
    UnknownField {
        /// The requested id.
        field_id: String,
    },
}

/// Everything that can go wrong while verifying a proof.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The entry being verified failed shape validation.
    #[error(transparent)]
    MalformedEntry(#[from] MalformedEntryError),
    /// The supplied proof is structurally invalid.
    #[error(transparent)]
    MalformedProof(#[from] MalformedProofError),
}
