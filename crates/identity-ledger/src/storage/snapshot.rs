//! Store snapshots — save a whole store to a JSON file and load it back.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "format": "idl-snapshot-v1",
//!     "kind": "open-create",
//!     "checksum": "<hex sha-256 of the canonical state json>",
//!     "state": { ... store state ... }
//! }
//! ```
//!
//! The checksum is computed over the key-sorted JSON encoding of `state`,
//! so it survives re-serialization. Event journals are not persisted.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LedgerError, Result};
use crate::store::{IssuerGatedStore, OpenCreateStore};

// ── File format constants ─────────────────────────────────────────────────────

const SNAPSHOT_VERSION: u32 = 1;
const SNAPSHOT_FORMAT: &str = "idl-snapshot-v1";

// ── Snapshot kinds ────────────────────────────────────────────────────────────

/// A store that can be written to and read from a snapshot file.
pub trait Snapshot: Serialize + DeserializeOwned {
    /// Tag identifying the store variant on disk.
    const KIND: &'static str;
}

impl Snapshot for IssuerGatedStore {
    const KIND: &'static str = "issuer-gated";
}

impl Snapshot for OpenCreateStore {
    const KIND: &'static str = "open-create";
}

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Top-level structure written to disk.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    /// Format version number.
    version: u32,
    /// Format identifier string.
    format: String,
    /// Store variant tag.
    kind: String,
    /// Hex SHA-256 of the canonical state encoding.
    checksum: String,
    /// Serialized store state.
    state: serde_json::Value,
}

/// Header fields only, for peeking at a file.
#[derive(Debug, Deserialize)]
struct SnapshotHeader {
    version: u32,
    format: String,
    kind: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Write `store` to `path`.
///
/// The file is written atomically (temp file, then rename). Missing parent
/// directories are created.
///
/// # Errors
///
/// Returns `LedgerError::SerializationError` if the state cannot be
/// encoded, or `LedgerError::Io` for filesystem errors.
pub fn save_snapshot<S: Snapshot>(store: &S, path: &Path) -> Result<()> {
    let state =
        serde_json::to_value(store).map_err(|e| LedgerError::SerializationError(e.to_string()))?;
    let checksum = state_checksum(&state)?;

    let file = SnapshotFile {
        version: SNAPSHOT_VERSION,
        format: SNAPSHOT_FORMAT.to_string(),
        kind: S::KIND.to_string(),
        checksum,
        state,
    };

    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| LedgerError::SerializationError(e.to_string()))?;

    write_atomic(path, json.as_bytes())?;
    log::debug!("saved {} snapshot to {}", S::KIND, path.display());

    Ok(())
}

/// Load a store of type `S` from `path`.
///
/// The returned store has an empty event journal.
///
/// # Errors
///
/// Returns `LedgerError::InvalidFileFormat` if the file is malformed, has
/// an unsupported version, holds a different store kind, or fails its
/// checksum; `LedgerError::Io` for filesystem errors.
pub fn load_snapshot<S: Snapshot>(path: &Path) -> Result<S> {
    let bytes = std::fs::read(path)?;
    let file: SnapshotFile = serde_json::from_slice(&bytes).map_err(|e| {
        LedgerError::InvalidFileFormat(format!(
            "failed to parse snapshot {}: {e}",
            path.display()
        ))
    })?;

    check_header(file.version, &file.format)?;

    if file.kind != S::KIND {
        return Err(LedgerError::InvalidFileFormat(format!(
            "snapshot holds a {} store, expected {}",
            file.kind,
            S::KIND
        )));
    }

    let actual = state_checksum(&file.state)?;
    if actual != file.checksum {
        return Err(LedgerError::InvalidFileFormat(format!(
            "snapshot checksum mismatch: recorded {}, computed {actual}",
            file.checksum
        )));
    }

    let store = serde_json::from_value(file.state)
        .map_err(|e| LedgerError::InvalidFileFormat(format!("invalid store state: {e}")))?;
    log::debug!("loaded {} snapshot from {}", S::KIND, path.display());

    Ok(store)
}

/// Read the store kind recorded in a snapshot file without loading it.
///
/// # Errors
///
/// Returns `LedgerError::InvalidFileFormat` for malformed files or
/// `LedgerError::Io` for filesystem errors.
pub fn snapshot_kind(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let header: SnapshotHeader = serde_json::from_slice(&bytes).map_err(|e| {
        LedgerError::InvalidFileFormat(format!(
            "failed to parse snapshot {}: {e}",
            path.display()
        ))
    })?;
    check_header(header.version, &header.format)?;
    Ok(header.kind)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_header(version: u32, format: &str) -> Result<()> {
    if version != SNAPSHOT_VERSION || format != SNAPSHOT_FORMAT {
        return Err(LedgerError::InvalidFileFormat(format!(
            "unsupported snapshot version={version} format={format}"
        )));
    }
    Ok(())
}

/// Hex SHA-256 of the state's JSON encoding.
///
/// `serde_json::Value` keeps object keys sorted, so the encoding is the
/// same whether the value came from a store or from a parsed file.
fn state_checksum(state: &serde_json::Value) -> Result<String> {
    let canonical =
        serde_json::to_vec(state).map_err(|e| LedgerError::SerializationError(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}

/// Write `data` to `path` atomically using a temp-file-then-rename strategy.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)?;
    std::fs::rename(&tmp_path, path)?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
