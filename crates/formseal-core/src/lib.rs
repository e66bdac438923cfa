//! formseal-core — canonical data model and I/O for submission integrity.
//!
//! This crate defines the **stable boundary** used across formseal crates:
//! - canonical data types (`FieldValue`, `FieldValueEntry`, `MerkleProof`,
//!   `Commitment`),
//! - the error taxonomy (`MalformedEntryError`, `DuplicateFieldError`,
//!   `MalformedProofError` and their unions), and
//! - JSON/CBOR file I/O with extension auto-detection.
//!
//! The hashing itself lives in `formseal-merkle`; this crate only describes
//! the shapes that cross crate and persistence boundaries.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Typed error taxonomy shared across the workspace.
pub mod error;
/// JSON/CBOR helpers and auto-detecting read/write APIs.
pub mod io;
/// Inclusion proofs and the commitment record they roll up into.
pub mod proof;
/// Canonical submission-side data types.
pub mod types;

// ---- Re-exports for workspace compatibility ----
pub use error::*;
pub use proof::*;
pub use types::*;

// Digest/nonce shapes are defined by the hash substrate; re-export them so
// downstream crates can import everything from one place.
pub use formseal_crypto::{Digest, Nonce, DIGEST_LEN, NONCE_LEN};
