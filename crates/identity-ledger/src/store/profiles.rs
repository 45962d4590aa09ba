//! Profile index — third-party annotations keyed by (profiler, subject).
//!
//! Alongside the profile entries the index keeps, per subject, the list of
//! profiler addresses that attached a profile. The list is what callers
//! enumerate and what subject deletion walks.
//!
//! Creation never checks for an existing profile from the same profiler:
//! the content is overwritten and the profiler is appended to the list
//! again. One removal takes out one list occurrence, so a profiler that
//! profiled a subject twice and then deleted its profile stays listed once
//! more until the subject itself is deleted. List order is not meaningful;
//! removals swap the last entry into the vacated slot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{LedgerError, Result};
use crate::record::ProfileRecord;

/// Profiles grouped by subject, plus the per-subject profiler list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileIndex {
    /// subject → profiler → profile.
    entries: HashMap<Address, HashMap<Address, ProfileRecord>>,
    /// subject → profilers, in attachment order until a removal reorders it.
    profilers: HashMap<Address, Vec<Address>>,
}

impl ProfileIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach (or overwrite) `profiler`'s profile on `subject`.
    ///
    /// Always appends `profiler` to the subject's list, even when the
    /// profiler already has an entry there.
    pub fn insert(&mut self, profiler: Address, subject: Address, record: ProfileRecord) {
        self.entries
            .entry(subject)
            .or_default()
            .insert(profiler, record);
        self.profilers.entry(subject).or_default().push(profiler);
    }

    /// Remove `profiler`'s profile on `subject` and one list occurrence.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the profiler has no profile on the
    /// subject; nothing is changed in that case.
    pub fn remove(&mut self, profiler: &Address, subject: &Address) -> Result<ProfileRecord> {
        let by_profiler = self
            .entries
            .get_mut(subject)
            .ok_or_else(|| not_found(profiler, subject))?;
        let record = by_profiler
            .remove(profiler)
            .ok_or_else(|| not_found(profiler, subject))?;
        if by_profiler.is_empty() {
            self.entries.remove(subject);
        }

        if let Some(list) = self.profilers.get_mut(subject) {
            if let Some(pos) = list.iter().position(|p| p == profiler) {
                list.swap_remove(pos);
            }
            if list.is_empty() {
                self.profilers.remove(subject);
            }
        }

        Ok(record)
    }

    /// Remove every profile attached to `subject`, and its profiler list.
    ///
    /// Cost is linear in the number of profiles on the subject. Returns the
    /// number of profile entries removed.
    pub fn purge_subject(&mut self, subject: &Address) -> usize {
        self.profilers.remove(subject);
        self.entries
            .remove(subject)
            .map(|by_profiler| by_profiler.len())
            .unwrap_or(0)
    }

    /// The profile, or the empty profile when absent.
    pub fn get(&self, profiler: &Address, subject: &Address) -> ProfileRecord {
        self.entries
            .get(subject)
            .and_then(|by_profiler| by_profiler.get(profiler))
            .cloned()
            .unwrap_or_default()
    }

    pub fn exists(&self, profiler: &Address, subject: &Address) -> bool {
        self.entries
            .get(subject)
            .is_some_and(|by_profiler| by_profiler.contains_key(profiler))
    }

    /// The subject's profiler list as stored, duplicates included.
    pub fn profilers(&self, subject: &Address) -> Vec<Address> {
        self.profilers.get(subject).cloned().unwrap_or_default()
    }

    /// Every live profile on `subject`, sorted by profiler address.
    pub fn profiles_on(&self, subject: &Address) -> Vec<(Address, ProfileRecord)> {
        let mut profiles: Vec<(Address, ProfileRecord)> = self
            .entries
            .get(subject)
            .map(|by_profiler| {
                by_profiler
                    .iter()
                    .map(|(profiler, record)| (*profiler, record.clone()))
                    .collect()
            })
            .unwrap_or_default();
        profiles.sort_by(|a, b| a.0.cmp(&b.0));
        profiles
    }

    /// Total number of live profiles across all subjects.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn not_found(profiler: &Address, subject: &Address) -> LedgerError {
    LedgerError::NotFound(format!("no profile by {profiler} on {subject}"))
}
