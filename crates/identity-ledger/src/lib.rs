//! IdentityLedger — authorization-gated identity registries.
//!
//! Each ledger maps a subject address to a single mutable identity record.
//! Two variants are provided: an issuer-gated store where one issuer writes
//! records, and an open-create store where one operator manages records and
//! any account may attach its own profile to an existing subject.
//!
//! Transport, scheduling and notification delivery are left to the caller:
//! stores are plain values driven through `&mut self`, emit events into a
//! journal, and persist only through explicit snapshots.

pub mod address;
pub mod auth;
pub mod error;
pub mod event;
pub mod record;
pub mod storage;
pub mod store;
pub mod time;

// Re-export primary types
pub use address::Address;
pub use auth::{Grant, Role};
pub use error::{LedgerError, Result};
pub use event::{EventJournal, LedgerEvent};
pub use record::{IdentityRecord, ProfileRecord, EMPTY_LABEL_DIGEST};
pub use storage::{load_snapshot, save_snapshot, snapshot_kind, Snapshot};
pub use store::{
    IssuerGatedStore, OpenCreateStore, ProfileIndex, RecordTable, StoreConfig,
};
