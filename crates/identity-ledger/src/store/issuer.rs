//! Issuer-gated store.
//!
//! A single issuer account creates and updates identity records. A record
//! may be deleted by the issuer or by its own subject. Records are bound to
//! their subject address and never move to another one.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::auth::{Grant, Role};
use crate::error::Result;
use crate::event::{EventJournal, LedgerEvent};
use crate::record::IdentityRecord;
use crate::store::table::RecordTable;
use crate::store::StoreConfig;

/// Identity registry where only the issuer writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct IssuerGatedStore {
    config: StoreConfig,
    issuer: Grant,
    records: RecordTable<IdentityRecord>,
    #[serde(skip)]
    journal: EventJournal,
}

impl IssuerGatedStore {
    /// Create an empty store whose issuer is `issuer`.
    ///
    /// The issuer is fixed for the lifetime of the store.
    pub fn new(config: StoreConfig, issuer: Address) -> Self {
        Self {
            config,
            issuer: Grant::new(Role::Issuer, issuer),
            records: RecordTable::new(),
            journal: EventJournal::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The issuer account.
    pub fn issuer(&self) -> Address {
        self.issuer.holder()
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Create the identity record for `subject`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` if `caller` is not the issuer.
    /// - `LedgerError::AlreadyExists` if `subject` already has a record.
    pub fn create_token(
        &mut self,
        caller: &Address,
        subject: Address,
        record: IdentityRecord,
    ) -> Result<()> {
        self.issuer.require(caller)?;
        self.records.insert(subject, record)?;
        self.journal.emit(LedgerEvent::Created { subject });
        Ok(())
    }

    /// Delete the identity record for `subject`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` unless `caller` is the subject or the
    ///   issuer.
    /// - `LedgerError::NotFound` if `subject` has no record.
    pub fn remove_token(&mut self, caller: &Address, subject: Address) -> Result<()> {
        self.issuer.require_self_or(caller, &subject)?;
        self.records.remove(&subject)?;
        self.journal.emit(LedgerEvent::Deleted { subject });
        Ok(())
    }

    /// Replace the identity record for `subject` in full.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` if `caller` is not the issuer.
    /// - `LedgerError::NotFound` if `subject` has no record.
    pub fn update_identity_data(
        &mut self,
        caller: &Address,
        subject: Address,
        record: IdentityRecord,
    ) -> Result<()> {
        self.issuer.require(caller)?;
        self.records.replace(subject, record)?;
        self.journal.emit(LedgerEvent::Updated { subject });
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    pub fn is_identity_exists(&self, subject: &Address) -> bool {
        self.records.exists(subject)
    }

    /// The stored record, or the empty record if `subject` has none.
    ///
    /// Check [`is_identity_exists`](Self::is_identity_exists) to tell the
    /// two apart.
    pub fn get_identity_data(&self, subject: &Address) -> IdentityRecord {
        self.records.get(subject)
    }

    /// Subjects with a record, in address order.
    pub fn subjects(&self) -> Vec<Address> {
        self.records.subjects()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ── Events ────────────────────────────────────────────────────────────────

    pub fn events(&self) -> &[LedgerEvent] {
        self.journal.events()
    }

    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.journal.drain()
    }
}
