//! Serialization helpers for entry lists and commitments.
//!
//! JSON and CBOR read/write utilities with extension-based auto-detection.
//! Unknown/missing extensions are rejected for reads and default to JSON
//! for writes.

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use crate::proof::Commitment;
use crate::types::FieldValueEntry;

/// Ensure the parent directory for a file exists (no-op if none).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

#[inline]
fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rdr = BufReader::new(f);
    serde_json::from_reader(rdr).with_context(|| format!("deserialize JSON {what}"))
}

fn write_json<T: Serialize>(path: &Path, v: &T, what: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, v).with_context(|| format!("serialize JSON {what}"))?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

fn read_cbor<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = BufReader::new(f);
    ciborium::de::from_reader(&mut rdr).with_context(|| format!("deserialize CBOR {what}"))
}

fn write_cbor<T: Serialize>(path: &Path, v: &T, what: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(v, &mut w).with_context(|| format!("serialize CBOR {what}"))?;
    w.flush().with_context(|| "flush CBOR writer")?;
    Ok(())
}

fn read_auto<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    match ext_lower(path).as_deref() {
        Some("json") => read_json(path, what),
        Some("cbor") => read_cbor(path, what),
        Some(other) => Err(anyhow!(
            "unsupported {what} extension: {other} (supported: .json, .cbor)"
        )),
        None => Err(anyhow!("path has no extension (expected .json or .cbor)")),
    }
}

fn write_auto<T: Serialize>(path: &Path, v: &T, what: &str) -> Result<()> {
    match ext_lower(path).as_deref() {
        Some("cbor") => write_cbor(path, v, what),
        _ => write_json(path, v, what),
    }
}

/* -------------------- Field entries -------------------- */

/// Read `Vec<FieldValueEntry>` from `.json` / `.cbor` (case-insensitive).
pub fn read_entries_auto<P: AsRef<Path>>(path: P) -> Result<Vec<FieldValueEntry>> {
    read_auto(path.as_ref(), "field entries")
}

/// Write `Vec<FieldValueEntry>`; JSON unless the extension says `.cbor`.
pub fn write_entries_auto<P: AsRef<Path>>(path: P, v: &[FieldValueEntry]) -> Result<()> {
    write_auto(path.as_ref(), &v, "field entries")
}

/* -------------------- Commitments -------------------- */

/// Read a [`Commitment`] from `.json` / `.cbor` (case-insensitive).
pub fn read_commitment_auto<P: AsRef<Path>>(path: P) -> Result<Commitment> {
    read_auto(path.as_ref(), "commitment")
}

/// Write a [`Commitment`]; JSON unless the extension says `.cbor`.
pub fn write_commitment_auto<P: AsRef<Path>>(path: P, v: &Commitment) -> Result<()> {
    write_auto(path.as_ref(), v, "commitment")
}

#[cfg(test)]
mod tests {
    use super::{read_commitment_auto, read_entries_auto, write_commitment_auto, write_entries_auto};
    use crate::proof::{Commitment, MerkleProof, ProofStep, Side, COMMITMENT_VERSION};
    use crate::types::{FieldValue, FieldValueEntry};

    fn sample_entries() -> Vec<FieldValueEntry> {
        vec![
            FieldValueEntry::new("a", FieldValue::text("x"), [1u8; 32]),
            FieldValueEntry::new("b", FieldValue::number(5.0), [2u8; 32]),
        ]
    }

    fn sample_commitment() -> Commitment {
        Commitment {
            version: COMMITMENT_VERSION,
            root: [3u8; 32],
            proofs: vec![MerkleProof {
                field_id: "a".to_owned(),
                path: vec![
                    ProofStep::Sibling {
                        hash: [4u8; 32],
                        side: Side::Right,
                    },
                    ProofStep::Promoted,
                ],
                root: [3u8; 32],
            }],
        }
    }

    #[test]
    fn entries_roundtrip_json_and_cbor() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["entries.json", "entries.cbor"] {
            let path = dir.path().join(name);
            let entries = sample_entries();
            write_entries_auto(&path, &entries).unwrap();
            assert_eq!(read_entries_auto(&path).unwrap(), entries);
        }
    }

    #[test]
    fn commitment_roundtrip_json_and_cbor() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["commitment.json", "commitment.cbor"] {
            let path = dir.path().join(name);
            let c = sample_commitment();
            write_commitment_auto(&path, &c).unwrap();
            assert_eq!(read_commitment_auto(&path).unwrap(), c);
        }
    }

    #[test]
    fn unknown_extension_is_rejected_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.yaml");
        std::fs::write(&path, b"[]").unwrap();
        assert!(read_entries_auto(&path).is_err());
    }
}
