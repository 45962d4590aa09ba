//! Record table — one optional record per subject address.
//!
//! The table holds only present records; an address without an entry is
//! absent. Reads of absent entries return `R::default()`, the empty record,
//! rather than failing. Existence preconditions are checked here so both
//! store variants share them; authorization is the caller's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{LedgerError, Result};

/// Mapping from subject address to its record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable<R> {
    records: HashMap<Address, R>,
}

impl<R: Clone + Default> RecordTable<R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Store a record for a subject that has none.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the subject already has a
    /// record; the stored record is left untouched.
    pub fn insert(&mut self, subject: Address, record: R) -> Result<()> {
        if self.records.contains_key(&subject) {
            return Err(LedgerError::AlreadyExists(subject));
        }
        self.records.insert(subject, record);
        Ok(())
    }

    /// Overwrite the record of an existing subject.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the subject has no record.
    pub fn replace(&mut self, subject: Address, record: R) -> Result<()> {
        match self.records.get_mut(&subject) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(not_found(&subject)),
        }
    }

    /// Remove and return the record of an existing subject.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the subject has no record.
    pub fn remove(&mut self, subject: &Address) -> Result<R> {
        self.records.remove(subject).ok_or_else(|| not_found(subject))
    }

    /// Whether the subject has a record.
    pub fn exists(&self, subject: &Address) -> bool {
        self.records.contains_key(subject)
    }

    /// The subject's record, or the empty record when absent.
    pub fn get(&self, subject: &Address) -> R {
        self.records.get(subject).cloned().unwrap_or_default()
    }

    /// All subjects with a record, in address order.
    pub fn subjects(&self) -> Vec<Address> {
        let mut subjects: Vec<Address> = self.records.keys().copied().collect();
        subjects.sort();
        subjects
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn not_found(subject: &Address) -> LedgerError {
    LedgerError::NotFound(format!("no record for {subject}"))
}
