// crates/formseal-merkle/src/lib.rs

//! Submission integrity over dynamic-form field values.
//!
//! - Canonical leaf commitment: BLAKE3 over a length-prefixed encoding of
//!   `(field_id, value, nonce)`.
//! - Binary Merkle tree over the leaf commitments, sorted by field id so the
//!   root is independent of caller-supplied ordering.
//! - One inclusion proof per field, with explicit sibling sides and explicit
//!   odd-count promotion markers.
//! - A verifier that rebuilds the root from a single entry and its proof,
//!   independent of the tree builder.
//!
//! The whole crate is pure, single-pass computation: no internal state
//! survives a call, and randomness only enters through the nonce carried by
//! the input.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

/// Canonical leaf commitments.
pub mod leaf;
/// Tree construction and proof extraction.
pub mod tree;
/// Stand-alone proof verification.
pub mod verify;

pub use leaf::commit_leaf;
pub use tree::{commit_entries, MerkleTree};
pub use verify::verify;
