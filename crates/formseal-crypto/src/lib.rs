// crates/formseal-crypto/src/lib.rs

//! Hash substrate for formseal: BLAKE3 digests, digest combination, and
//! secure per-field nonce generation.
//!
//! Everything downstream (leaf commitments, tree levels, manifest hashes)
//! speaks in fixed 32-byte digests produced here. The nonce generator is the
//! only operation in the workspace that touches an external entropy source.

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

use blake3::Hasher;
use rand::RngCore as _;

/// Size of every digest in the workspace, in bytes.
pub const DIGEST_LEN: usize = 32;

/// Fixed 32-byte BLAKE3 digest.
pub type Digest = [u8; DIGEST_LEN];

/// Size of a per-field salt, in bytes.
pub const NONCE_LEN: usize = 32;

/// Fixed 32-byte per-field salt.
pub type Nonce = [u8; NONCE_LEN];

/// Hash an arbitrary byte sequence into a 32-byte digest.
///
/// Deterministic, collision-resistant, no failure modes for well-formed
/// byte input.
#[inline]
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> Digest {
    *blake3::hash(bytes).as_bytes()
}

/// Combine two child digests into their parent digest.
///
/// Plain concatenation is unambiguous here because both operands have fixed
/// length.
#[inline]
#[must_use]
pub fn combine(left: &Digest, right: &Digest) -> Digest {
    let mut h = Hasher::new();
    h.update(left);
    h.update(right);
    *h.finalize().as_bytes()
}

/// Draw a fresh 32-byte nonce from the process-wide secure RNG.
///
/// `rand::rng()` is a thread-local CSPRNG reseeded from OS entropy, so
/// concurrent submissions need no further coordination. Never derive nonces
/// from wall-clock time or a seeded PRNG: low-cardinality field values
/// (booleans, small enums) are only protected by the salt being
/// unpredictable.
#[must_use]
pub fn generate_nonce() -> Nonce {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::{combine, generate_nonce, hash_bytes};

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_bytes(b"payload"), hash_bytes(b"payload"));
        assert_ne!(hash_bytes(b"payload"), hash_bytes(b"payloae"));
    }

    #[test]
    fn combine_is_order_sensitive() {
        let a = hash_bytes(b"a");
        let b = hash_bytes(b"b");
        assert_ne!(combine(&a, &b), combine(&b, &a));
    }

    #[test]
    fn nonces_differ_across_calls() {
        // Two equal 32-byte draws from a CSPRNG would be a 2^-256 event.
        assert_ne!(generate_nonce(), generate_nonce());
    }
}
