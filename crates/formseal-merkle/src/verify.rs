// crates/formseal-merkle/src/verify.rs

//! Stand-alone proof verification.
//!
//! Recomputes a single leaf commitment and folds the proof path back up to
//! a root, without ever rebuilding the tree. A root mismatch is a normal
//! negative outcome (`Ok(false)`); the caller turns it into a trust
//! decision, not a crash.

use formseal_core::{FieldValueEntry, MalformedProofError, MerkleProof, ProofStep, Side, VerifyError};
use formseal_crypto::combine;

use crate::leaf::commit_leaf;

/// Check that `entry` is included in the committed set summarized by
/// `proof.root`.
///
/// Returns `Ok(true)` iff folding the path over the recomputed leaf
/// commitment reproduces the root. Errors only on structural problems
/// (malformed entry, malformed proof, or a proof that speaks for a
/// different field than the entry).
pub fn verify(entry: &FieldValueEntry, proof: &MerkleProof) -> Result<bool, VerifyError> {
    proof.validate()?;
    if entry.field_id != proof.field_id {
        return Err(MalformedProofError::FieldIdMismatch {
            entry: entry.field_id.clone(),
            proof: proof.field_id.clone(),
        }
        .into());
    }

    let mut current = commit_leaf(entry)?;
    for step in &proof.path {
        current = match step {
            ProofStep::Sibling {
                hash,
                side: Side::Left,
            } => combine(hash, &current),
            ProofStep::Sibling {
                hash,
                side: Side::Right,
            } => combine(&current, hash),
            // Pass-through level: carry the digest forward unchanged.
            ProofStep::Promoted => current,
        };
    }
    Ok(current == proof.root)
}

#[cfg(test)]
mod tests {
    use super::verify;
    use crate::tree::commit_entries;
    use formseal_core::{
        FieldValue, FieldValueEntry, MalformedProofError, MerkleProof, ProofStep, VerifyError,
        MAX_PROOF_DEPTH,
    };

    fn entries() -> Vec<FieldValueEntry> {
        vec![
            FieldValueEntry::new("a", FieldValue::text("x"), [1u8; 32]),
            FieldValueEntry::new("b", FieldValue::number(5.0), [2u8; 32]),
            FieldValueEntry::new("c", FieldValue::boolean(true), [3u8; 32]),
        ]
    }

    #[test]
    fn every_field_verifies_against_the_shared_root() {
        let entries = entries();
        let c = commit_entries(&entries).unwrap();
        for e in &entries {
            let proof = c.proof_for(&e.field_id).unwrap();
            assert_eq!(verify(e, proof), Ok(true));
        }
    }

    #[test]
    fn single_entry_proof_verifies_trivially() {
        let e = FieldValueEntry::new("only", FieldValue::text("v"), [9u8; 32]);
        let c = commit_entries(std::slice::from_ref(&e)).unwrap();
        let proof = c.proof_for("only").unwrap();
        assert!(proof.path.is_empty());
        assert_eq!(verify(&e, proof), Ok(true));
    }

    #[test]
    fn tampered_nonce_fails_only_the_tampered_field() {
        let entries = entries();
        let c = commit_entries(&entries).unwrap();

        // Flip one byte of b's nonce after committing.
        let mut tampered = entries.clone();
        tampered[1].nonce[0] ^= 0x01;

        assert_eq!(verify(&tampered[1], c.proof_for("b").unwrap()), Ok(false));
        // Fields outside the tampered leaf keep verifying: their proofs
        // carry the sibling digests recorded at commit time.
        assert_eq!(verify(&tampered[0], c.proof_for("a").unwrap()), Ok(true));
        assert_eq!(verify(&tampered[2], c.proof_for("c").unwrap()), Ok(true));

        // Same exercise on a's nonce: b sits on the other side of the
        // level-0 pairing, c on the promoted path; both stay green.
        let mut tampered = entries.clone();
        tampered[0].nonce[0] ^= 0x01;
        assert_eq!(verify(&tampered[0], c.proof_for("a").unwrap()), Ok(false));
        assert_eq!(verify(&tampered[1], c.proof_for("b").unwrap()), Ok(true));
        assert_eq!(verify(&tampered[2], c.proof_for("c").unwrap()), Ok(true));
    }

    #[test]
    fn tampered_value_fails_verification() {
        let entries = entries();
        let c = commit_entries(&entries).unwrap();
        let mut e = entries[2].clone();
        e.value = FieldValue::boolean(false);
        assert_eq!(verify(&e, c.proof_for("c").unwrap()), Ok(false));
    }

    #[test]
    fn proof_for_a_different_field_is_structural_not_false() {
        let entries = entries();
        let c = commit_entries(&entries).unwrap();
        let err = verify(&entries[0], c.proof_for("b").unwrap()).unwrap_err();
        assert_eq!(
            err,
            VerifyError::MalformedProof(MalformedProofError::FieldIdMismatch {
                entry: "a".to_owned(),
                proof: "b".to_owned(),
            })
        );
    }

    #[test]
    fn oversized_path_is_rejected_before_hashing() {
        let e = FieldValueEntry::new("f", FieldValue::text("v"), [0u8; 32]);
        let proof = MerkleProof {
            field_id: "f".to_owned(),
            path: vec![ProofStep::Promoted; MAX_PROOF_DEPTH + 1],
            root: [0u8; 32],
        };
        let err = verify(&e, &proof).unwrap_err();
        assert_eq!(
            err,
            VerifyError::MalformedProof(MalformedProofError::PathTooDeep {
                depth: MAX_PROOF_DEPTH + 1,
                max: MAX_PROOF_DEPTH,
            })
        );
    }
}
