//! Open-create store.
//!
//! A single operator creates, updates and deletes identity records for any
//! subject. Any account may attach its own profile to a subject that has a
//! record, and may later remove the profiles it attached; the operator may
//! remove any profile.
//!
//! Deleting a subject also removes every profile attached to it. That
//! cascade is linear in the number of profiles on the subject, and the whole
//! cost falls on the caller that deletes the subject.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::auth::{Grant, Role};
use crate::error::{LedgerError, Result};
use crate::event::{EventJournal, LedgerEvent};
use crate::record::{IdentityRecord, ProfileRecord};
use crate::store::profiles::ProfileIndex;
use crate::store::table::RecordTable;
use crate::store::StoreConfig;

/// Identity registry with operator-managed records and open profiles.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenCreateStore {
    config: StoreConfig,
    operator: Grant,
    records: RecordTable<IdentityRecord>,
    profiles: ProfileIndex,
    #[serde(skip)]
    journal: EventJournal,
}

impl OpenCreateStore {
    /// Create an empty store whose operator is `operator`.
    ///
    /// The operator is fixed for the lifetime of the store.
    pub fn new(config: StoreConfig, operator: Address) -> Self {
        Self {
            config,
            operator: Grant::new(Role::Operator, operator),
            records: RecordTable::new(),
            profiles: ProfileIndex::new(),
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

    /// The operator account.
    pub fn operator(&self) -> Address {
        self.operator.holder()
    }

    // ── Record mutations ──────────────────────────────────────────────────────

    /// Create the identity record for `subject`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` if `caller` is not the operator.
    /// - `LedgerError::AlreadyExists` if `subject` already has a record.
    pub fn create_token(
        &mut self,
        caller: &Address,
        subject: Address,
        record: IdentityRecord,
    ) -> Result<()> {
        self.operator.require(caller)?;
        self.records.insert(subject, record)?;
        self.journal.emit(LedgerEvent::Created { subject });
        Ok(())
    }

    /// Delete the record for `subject` and every profile attached to it.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` if `caller` is not the operator.
    /// - `LedgerError::NotFound` if `subject` has no record.
    pub fn delete_token(&mut self, caller: &Address, subject: Address) -> Result<()> {
        self.operator.require(caller)?;
        self.records.remove(&subject)?;
        let purged = self.profiles.purge_subject(&subject);
        if purged > 0 {
            log::debug!("removed {purged} profiles attached to {subject}");
        }
        self.journal.emit(LedgerEvent::Deleted { subject });
        Ok(())
    }

    /// Replace the identity record for `subject` in full.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` if `caller` is not the operator.
    /// - `LedgerError::NotFound` if `subject` has no record.
    pub fn update_token(
        &mut self,
        caller: &Address,
        subject: Address,
        record: IdentityRecord,
    ) -> Result<()> {
        self.operator.require(caller)?;
        self.records.replace(subject, record)?;
        self.journal.emit(LedgerEvent::Updated { subject });
        Ok(())
    }

    // ── Record reads ──────────────────────────────────────────────────────────

    pub fn token_exists(&self, subject: &Address) -> bool {
        self.records.exists(subject)
    }

    /// The stored record, or the empty record if `subject` has none.
    pub fn get_token_data(&self, subject: &Address) -> IdentityRecord {
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

    // ── Profiles ──────────────────────────────────────────────────────────────

    /// Attach `caller`'s profile to `subject`.
    ///
    /// Any account may profile any subject that has a record. Calling again
    /// for the same subject overwrites the profile and lists the caller a
    /// second time in [`list_profiles`](Self::list_profiles).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::SubjectNotFound` if `subject` has no record.
    pub fn create_profile(
        &mut self,
        caller: &Address,
        subject: Address,
        record: ProfileRecord,
    ) -> Result<()> {
        if !self.records.exists(&subject) {
            log::debug!("rejected profile by {caller}: {subject} has no record");
            return Err(LedgerError::SubjectNotFound(subject));
        }
        self.profiles.insert(*caller, subject, record);
        self.journal.emit(LedgerEvent::ProfileCreated {
            profiler: *caller,
            subject,
        });
        Ok(())
    }

    /// Remove `profiler`'s profile on `subject`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Unauthorized` unless `caller` is `profiler` or the
    ///   operator.
    /// - `LedgerError::NotFound` if no such profile exists.
    pub fn delete_profile(
        &mut self,
        caller: &Address,
        profiler: Address,
        subject: Address,
    ) -> Result<()> {
        self.operator.require_self_or(caller, &profiler)?;
        self.profiles.remove(&profiler, &subject)?;
        self.journal
            .emit(LedgerEvent::ProfileDeleted { profiler, subject });
        Ok(())
    }

    /// The stored profile, or the empty profile if there is none.
    pub fn get_profile_data(&self, profiler: &Address, subject: &Address) -> ProfileRecord {
        self.profiles.get(profiler, subject)
    }

    /// Profilers listed on `subject`, as stored.
    ///
    /// May list a profiler more than once; see
    /// [`create_profile`](Self::create_profile).
    pub fn list_profiles(&self, subject: &Address) -> Vec<Address> {
        self.profiles.profilers(subject)
    }

    pub fn profile_exists(&self, profiler: &Address, subject: &Address) -> bool {
        self.profiles.exists(profiler, subject)
    }

    /// Every live profile on `subject`, sorted by profiler.
    pub fn profiles_on(&self, subject: &Address) -> Vec<(Address, ProfileRecord)> {
        self.profiles.profiles_on(subject)
    }

    /// Total number of live profiles.
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    // ── Events ────────────────────────────────────────────────────────────────

    pub fn events(&self) -> &[LedgerEvent] {
        self.journal.events()
    }

    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.journal.drain()
    }
}
