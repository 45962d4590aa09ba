//! Authorization-gated record stores.
//!
//! Two variants share the same building blocks:
//!
//! - [`IssuerGatedStore`] — one issuer creates and updates records; the
//!   issuer or the subject itself may delete.
//! - [`OpenCreateStore`] — one operator creates, updates and deletes
//!   records; any account may attach its own profile to an existing
//!   subject.
//!
//! # Modules
//!
//! - [`table`] — [`RecordTable`], one optional record per subject.
//! - [`profiles`] — [`ProfileIndex`], profiles plus per-subject profiler
//!   lists.
//! - [`issuer`] — the issuer-gated variant.
//! - [`open`] — the open-create variant.
//!
//! Every operation runs to completion on `&mut self`: all preconditions are
//! checked before the first write, so a failed call leaves no trace. Share a
//! store across threads by wrapping it in a `Mutex`.

pub mod issuer;
pub mod open;
pub mod profiles;
pub mod table;

use serde::{Deserialize, Serialize};

pub use issuer::IssuerGatedStore;
pub use open::OpenCreateStore;
pub use profiles::ProfileIndex;
pub use table::RecordTable;

/// Display configuration fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name.
    pub name: String,
    /// Short symbol.
    pub symbol: String,
}

impl StoreConfig {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}
