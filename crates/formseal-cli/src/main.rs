// crates/formseal-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, Rng as _, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formseal_core::io::{
    read_commitment_auto, read_entries_auto, write_commitment_auto, write_entries_auto,
};
use formseal_core::{digest_from_slice, FieldValue, FieldValueEntry, COMMITMENT_VERSION};
use formseal_crypto::{generate_nonce, hash_bytes};
use formseal_merkle::{commit_entries, verify};

#[derive(Parser, Debug)]
#[command(
    name = "formseal-cli",
    about = "formseal reference CLI",
    long_about = "formseal reference CLI.\n\nUse this tool to generate sample submissions, commit field entries to a Merkle root with per-field inclusion proofs, and audit commitments.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate a synthetic submission with mixed field shapes and fresh
    /// nonces (values are seeded; nonces always come from the secure RNG).
    Simulate {
        /// Number of fields (>0)
        #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
        n_fields: u32,

        /// Seed for the synthetic values
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output path for field entries (JSON/CBOR)
        #[arg(long, default_value = "entries.json")]
        out: PathBuf,
    },

    /// Commit field entries to a Merkle root plus one proof per field
    Commit {
        /// Input path to field entries (JSON/CBOR)
        #[arg(long)]
        entries: PathBuf,

        /// Output path for the commitment (JSON/CBOR)
        #[arg(long, default_value = "commitment.json")]
        out: PathBuf,
    },

    /// Check that an entries file matches a commitment, proof by proof
    VerifyCommit {
        /// Input path to field entries (JSON/CBOR)
        #[arg(long)]
        entries: PathBuf,

        /// Input path to the commitment (JSON/CBOR)
        #[arg(long)]
        commitment: PathBuf,
    },

    /// Verify a single field's inclusion proof
    VerifyField {
        /// Input path to field entries (JSON/CBOR)
        #[arg(long)]
        entries: PathBuf,

        /// Input path to the commitment (JSON/CBOR)
        #[arg(long)]
        commitment: PathBuf,

        /// Field id to verify
        #[arg(long)]
        field: String,

        /// Expected root as hex (e.g. from an audit record); checked
        /// against the proof's root before verifying
        #[arg(long)]
        root: Option<String>,
    },

    /// Hash a schema file, binding submissions to the exact schema version
    ManifestHash {
        /// Path to the serialized schema definition
        #[arg(long)]
        schema: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Simulate {
            n_fields,
            seed,
            out,
        } => simulate(n_fields, seed, &out),

        Cmd::Commit { entries, out } => commit(&entries, &out),

        Cmd::VerifyCommit {
            entries,
            commitment,
        } => verify_commit(&entries, &commitment),

        Cmd::VerifyField {
            entries,
            commitment,
            field,
            root,
        } => verify_field(&entries, &commitment, &field, root.as_deref()),

        Cmd::ManifestHash { schema } => manifest_hash(&schema),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn simulate(n_fields: u32, seed: u64, out: &Path) -> Result<()> {
    info!(n_fields, seed, "generating synthetic submission");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut entries = Vec::with_capacity(n_fields as usize);
    for i in 0..n_fields {
        let value = match i % 4 {
            0 => FieldValue::text(format!("answer-{}", rng.random_range(0..10_000))),
            1 => FieldValue::number(f64::from(rng.random_range(0_i32..=100))),
            2 => FieldValue::boolean(rng.random_bool(0.5)),
            _ => FieldValue::array(
                (0..rng.random_range(1..=3))
                    .map(|k| FieldValue::text(format!("option-{k}")))
                    .collect(),
            ),
        };
        entries.push(FieldValueEntry::new(
            format!("field-{i:03}"),
            value,
            generate_nonce(),
        ));
    }

    write_entries_auto(out, &entries)
        .with_context(|| format!("writing field entries to {}", out.display()))?;

    println!("Simulated {} field entries → {}", entries.len(), out.display());
    Ok(())
}

fn commit(entries_path: &Path, out: &Path) -> Result<()> {
    info!(entries=%entries_path.display(), out=%out.display(), "committing submission");

    let entries = read_entries_auto(entries_path)
        .with_context(|| format!("reading entries {}", entries_path.display()))?;
    let commitment = commit_entries(&entries)?;
    write_commitment_auto(out, &commitment)
        .with_context(|| format!("writing commitment {}", out.display()))?;

    println!(
        "Committed {} fields, root={}, wrote {}",
        commitment.len(),
        hex::encode(commitment.root),
        out.display()
    );
    Ok(())
}

fn verify_commit(entries_path: &Path, commitment_path: &Path) -> Result<()> {
    info!(
        entries=%entries_path.display(),
        commitment=%commitment_path.display(),
        "verifying commitment"
    );

    let entries = read_entries_auto(entries_path)
        .with_context(|| format!("reading entries {}", entries_path.display()))?;
    let commitment = read_commitment_auto(commitment_path)
        .with_context(|| format!("reading commitment {}", commitment_path.display()))?;
    ensure!(
        commitment.version == COMMITMENT_VERSION,
        "unsupported commitment version: {}",
        commitment.version
    );

    // Recompute the root from scratch, then check every stored proof.
    let recomputed = commit_entries(&entries)?;
    if recomputed.root != commitment.root {
        bail!(
            "root mismatch: commitment={}, recomputed={}",
            hex::encode(commitment.root),
            hex::encode(recomputed.root)
        );
    }
    ensure!(
        commitment.len() == entries.len(),
        "proof count mismatch: commitment={}, entries={}",
        commitment.len(),
        entries.len()
    );
    for entry in &entries {
        let proof = commitment
            .proof_for(&entry.field_id)
            .ok_or_else(|| anyhow!("no proof for field {:?}", entry.field_id))?;
        ensure!(
            verify(entry, proof)?,
            "field {:?} failed verification",
            entry.field_id
        );
    }

    println!(
        "OK: {} fields verified against root {}",
        entries.len(),
        hex::encode(commitment.root)
    );
    Ok(())
}

fn verify_field(
    entries_path: &Path,
    commitment_path: &Path,
    field: &str,
    root_hex: Option<&str>,
) -> Result<()> {
    let entries = read_entries_auto(entries_path)
        .with_context(|| format!("reading entries {}", entries_path.display()))?;
    let commitment = read_commitment_auto(commitment_path)
        .with_context(|| format!("reading commitment {}", commitment_path.display()))?;

    let entry = entries
        .iter()
        .find(|e| e.field_id == field)
        .ok_or_else(|| anyhow!("field {field:?} not present in {}", entries_path.display()))?;
    let proof = commitment
        .proof_for(field)
        .ok_or_else(|| anyhow!("no proof for field {field:?}"))?;

    if let Some(root_hex) = root_hex {
        let bytes = hex::decode(root_hex.trim_start_matches("0x"))
            .with_context(|| "decoding --root hex")?;
        let expected = digest_from_slice(&bytes)?;
        ensure!(
            expected == proof.root,
            "proof root {} does not match --root {}",
            hex::encode(proof.root),
            hex::encode(expected)
        );
    }

    ensure!(
        verify(entry, proof)?,
        "field {field:?} failed verification against root {}",
        hex::encode(proof.root)
    );

    println!(
        "OK: field {field:?} verified against root {}",
        hex::encode(proof.root)
    );
    Ok(())
}

fn manifest_hash(schema: &Path) -> Result<()> {
    let bytes =
        fs::read(schema).with_context(|| format!("reading schema {}", schema.display()))?;
    println!("{}", hex::encode(hash_bytes(&bytes)));
    Ok(())
}
