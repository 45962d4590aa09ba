//! Persistence for ledger stores.
//!
//! Stores live in memory and have no implicit persistence. This module
//! provides an explicit snapshot/load lifecycle: a whole store is written to
//! a single versioned JSON file and rebuilt from it.
//!
//! # Modules
//!
//! - [`snapshot`] — snapshot save/load with a content checksum.

pub mod snapshot;

pub use snapshot::{load_snapshot, save_snapshot, snapshot_kind, Snapshot};
