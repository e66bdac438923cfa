//! Inclusion proofs and the commitment record persisted with a submission.
//!
//! A proof carries everything a verifier needs to rebuild the root from one
//! leaf: the sibling digest and its side at every combined level, and an
//! explicit [`ProofStep::Promoted`] marker at every level the node passed
//! through unpaired. Recording promotion explicitly (instead of silently
//! omitting the level) keeps path length equal to tree height and removes
//! any guesswork from verification.

use serde::{Deserialize, Serialize};

use crate::error::MalformedProofError;
use formseal_crypto::Digest;

/// Format version for [`Commitment`].
pub const COMMITMENT_VERSION: u32 = 1;

/// Upper bound on proof path length accepted by the verifier.
///
/// A path longer than this cannot come from any tree we can build (2^64
/// leaves); reject it before hashing.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Which side of the current node a sibling digest sits on.
///
/// Concatenation order during verification must match construction order
/// exactly, so the side is part of the proof, never inferred.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left operand: parent = hash(sibling ++ current).
    Left,
    /// Sibling is the right operand: parent = hash(current ++ sibling).
    Right,
}

/// One level of an inclusion proof, bottom to top.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProofStep {
    /// The node was combined with a sibling at this level.
    Sibling {
        /// The sibling's digest.
        hash: Digest,
        /// The sibling's side relative to the current node.
        side: Side,
    },
    /// The node was the unpaired last node of an odd-width level and was
    /// carried up unchanged.
    Promoted,
}

/// Inclusion proof for one field of a submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MerkleProof {
    /// The field this proof speaks for.
    pub field_id: String,
    /// Proof path from leaf level to the level below the root.
    pub path: Vec<ProofStep>,
    /// The root this proof reconstructs.
    pub root: Digest,
}

impl MerkleProof {
    /// Structural validation; shape only, no hashing.
    pub fn validate(&self) -> Result<(), MalformedProofError> {
        if self.field_id.is_empty() {
            return Err(MalformedProofError::EmptyFieldId);
        }
        if self.path.len() > MAX_PROOF_DEPTH {
            return Err(MalformedProofError::PathTooDeep {
                depth: self.path.len(),
                max: MAX_PROOF_DEPTH,
            });
        }
        Ok(())
    }

    /// Number of levels this proof crosses (including promoted ones).
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// The integrity output attached to a submission record: one root, one
/// proof per field.
///
/// The schema manifest hash that accompanies this in a `FormSubmission` is
/// computed by the caller, not here; it binds the submission to a schema
/// version and is an independent hash.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commitment {
    /// Schema/encoding version.
    pub version: u32,
    /// Merkle root over all leaf commitments.
    pub root: Digest,
    /// One inclusion proof per committed field, sorted by field id.
    pub proofs: Vec<MerkleProof>,
}

impl Commitment {
    /// Look up the proof for one field.
    #[must_use]
    pub fn proof_for(&self, field_id: &str) -> Option<&MerkleProof> {
        self.proofs.iter().find(|p| p.field_id == field_id)
    }

    /// Number of proofs carried (equals the number of committed fields).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    /// Whether the commitment covers zero fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }
}

/// Parse a digest from raw bytes at an external boundary (hex input, wire
/// blobs). Typed digests inside the workspace never need this.
pub fn digest_from_slice(bytes: &[u8]) -> Result<Digest, MalformedProofError> {
    Digest::try_from(bytes).map_err(|_| MalformedProofError::BadDigestLength { len: bytes.len() })
}

#[cfg(test)]
mod tests {
    use super::{digest_from_slice, MerkleProof, ProofStep, Side, MAX_PROOF_DEPTH};
    use crate::error::MalformedProofError;

    fn proof(field_id: &str, depth: usize) -> MerkleProof {
        MerkleProof {
            field_id: field_id.to_owned(),
            path: vec![ProofStep::Promoted; depth],
            root: [0u8; 32],
        }
    }

    #[test]
    fn validate_rejects_empty_field_id() {
        assert_eq!(
            proof("", 1).validate(),
            Err(MalformedProofError::EmptyFieldId)
        );
    }

    #[test]
    fn validate_rejects_oversized_path() {
        assert!(proof("f", MAX_PROOF_DEPTH).validate().is_ok());
        assert_eq!(
            proof("f", MAX_PROOF_DEPTH + 1).validate(),
            Err(MalformedProofError::PathTooDeep {
                depth: MAX_PROOF_DEPTH + 1,
                max: MAX_PROOF_DEPTH,
            })
        );
    }

    #[test]
    fn digest_from_slice_enforces_length() {
        assert!(digest_from_slice(&[1u8; 32]).is_ok());
        assert_eq!(
            digest_from_slice(&[1u8; 31]),
            Err(MalformedProofError::BadDigestLength { len: 31 })
        );
    }

    #[test]
    fn proof_step_serde_roundtrip() {
        let steps = vec![
            ProofStep::Sibling {
                hash: [9u8; 32],
                side: Side::Left,
            },
            ProofStep::Promoted,
        ];
        let json = serde_json::to_string(&steps).unwrap();
        let back: Vec<ProofStep> = serde_json::from_str(&json).unwrap();
        assert_eq!(steps, back);
    }
}
