// crates/formseal-merkle/src/tree.rs

//! Merkle tree construction and proof extraction.
//!
//! Entries are sorted by field id before hashing, so the root is a pure
//! function of the *set* of `(field_id, value, nonce)` triples. Levels are
//! built bottom-up, pairing adjacent nodes left to right; the unpaired last
//! node of an odd-width level is promoted unchanged to the next level, never
//! duplicated and combined with itself.
//!
//! The tree exists only between construction and proof extraction; callers
//! keep the [`Commitment`], not the tree.

use std::collections::BTreeMap;

use formseal_core::{
    Commitment, CommitError, DuplicateFieldError, FieldValueEntry, MerkleProof, ProofError,
    ProofStep, Side, COMMITMENT_VERSION, ZERO_ROOT,
};
use formseal_crypto::{combine, Digest};

use crate::leaf::commit_leaf;

/// Binary hash tree over the leaf commitments of one submission.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// `levels[0]` is the sorted leaf level; the last level holds the root
    /// (or is empty for a zero-field submission).
    levels: Vec<Vec<Digest>>,
    /// Sorted field id → leaf position.
    positions: BTreeMap<String, usize>,
}

impl MerkleTree {
    /// Build the tree for one submission.
    ///
    /// Rejects duplicate field ids and malformed entries; total over
    /// well-formed input otherwise.
    pub fn build(entries: &[FieldValueEntry]) -> Result<Self, CommitError> {
        let mut sorted: Vec<&FieldValueEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.field_id.cmp(&b.field_id));
        for pair in sorted.windows(2) {
            if pair[0].field_id == pair[1].field_id {
                return Err(DuplicateFieldError {
                    field_id: pair[0].field_id.clone(),
                }
                .into());
            }
        }

        let mut leaves = Vec::with_capacity(sorted.len());
        for entry in &sorted {
            leaves.push(commit_leaf(entry)?);
        }
        let positions = sorted
            .iter()
            .enumerate()
            .map(|(i, e)| (e.field_id.clone(), i))
            .collect();

        let mut levels = vec![leaves];
        loop {
            let cur = &levels[levels.len() - 1];
            if cur.len() <= 1 {
                break;
            }
            let mut next = Vec::with_capacity((cur.len() + 1) / 2);
            for i in (0..cur.len()).step_by(2) {
                if i + 1 < cur.len() {
                    next.push(combine(&cur[i], &cur[i + 1]));
                } else {
                    // Odd tail: promote unchanged.
                    next.push(cur[i]);
                }
            }
            levels.push(next);
        }

        Ok(Self { levels, positions })
    }

    /// The tree root; [`ZERO_ROOT`] for a zero-field submission.
    #[must_use]
    pub fn root(&self) -> Digest {
        self.levels
            .last()
            .and_then(|lvl| lvl.last())
            .copied()
            .unwrap_or(ZERO_ROOT)
    }

    /// Number of committed leaves.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Whether the submission had zero fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leaf position of a field in sorted order, if committed.
    #[must_use]
    pub fn leaf_position(&self, field_id: &str) -> Option<usize> {
        self.positions.get(field_id).copied()
    }

    /// Inclusion proof for one field.
    pub fn proof_for(&self, field_id: &str) -> Result<MerkleProof, ProofError> {
        let idx = self
            .leaf_position(field_id)
            .ok_or_else(|| ProofError::UnknownField {
                field_id: field_id.to_owned(),
            })?;
        Ok(MerkleProof {
            field_id: field_id.to_owned(),
            path: self.path_for_index(idx),
            root: self.root(),
        })
    }

    /// Inclusion proofs for every committed field, sorted by field id.
    #[must_use]
    pub fn proofs(&self) -> Vec<MerkleProof> {
        let root = self.root();
        self.positions
            .iter()
            .map(|(field_id, &idx)| MerkleProof {
                field_id: field_id.clone(),
                path: self.path_for_index(idx),
                root,
            })
            .collect()
    }

    /// Walk from leaf `idx` to the root, recording the sibling and its side
    /// at every combined level and an explicit marker at every promoted
    /// (pass-through) level.
    fn path_for_index(&self, mut idx: usize) -> Vec<ProofStep> {
        let below_root = self.levels.len().saturating_sub(1);
        let mut path = Vec::with_capacity(below_root);
        for level in &self.levels[..below_root] {
            let sib = idx ^ 1;
            if sib < level.len() {
                let side = if sib < idx { Side::Left } else { Side::Right };
                path.push(ProofStep::Sibling {
                    hash: level[sib],
                    side,
                });
            } else {
                path.push(ProofStep::Promoted);
            }
            idx /= 2;
        }
        path
    }
}

/// Commit a whole submission: build the tree once and extract the root plus
/// one proof per field.
pub fn commit_entries(entries: &[FieldValueEntry]) -> Result<Commitment, CommitError> {
    let tree = MerkleTree::build(entries)?;
    Ok(Commitment {
        version: COMMITMENT_VERSION,
        root: tree.root(),
        proofs: tree.proofs(),
    })
}
