//! Change notifications emitted by committed store mutations.
//!
//! Events exist for external observers only; no store behaviour depends on
//! them. Each committed mutation appends exactly one event and logs it.
//! Rejected operations emit nothing.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A state change committed by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    Created { subject: Address },
    Updated { subject: Address },
    Deleted { subject: Address },
    ProfileCreated { profiler: Address, subject: Address },
    ProfileDeleted { profiler: Address, subject: Address },
}

impl LedgerEvent {
    /// Short tag for the event kind.
    pub fn as_tag(&self) -> &'static str {
        match self {
            LedgerEvent::Created { .. } => "created",
            LedgerEvent::Updated { .. } => "updated",
            LedgerEvent::Deleted { .. } => "deleted",
            LedgerEvent::ProfileCreated { .. } => "profile_created",
            LedgerEvent::ProfileDeleted { .. } => "profile_deleted",
        }
    }

    /// The subject the event concerns.
    pub fn subject(&self) -> Address {
        match self {
            LedgerEvent::Created { subject }
            | LedgerEvent::Updated { subject }
            | LedgerEvent::Deleted { subject }
            | LedgerEvent::ProfileCreated { subject, .. }
            | LedgerEvent::ProfileDeleted { subject, .. } => *subject,
        }
    }
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerEvent::ProfileCreated { profiler, subject }
            | LedgerEvent::ProfileDeleted { profiler, subject } => {
                write!(f, "{} profiler={profiler} subject={subject}", self.as_tag())
            }
            _ => write!(f, "{} subject={}", self.as_tag(), self.subject()),
        }
    }
}

/// Append-only journal of events emitted by one store instance.
///
/// Not persisted: a store rebuilt from a snapshot starts with an empty
/// journal.
#[derive(Debug, Default)]
pub struct EventJournal {
    events: Vec<LedgerEvent>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a committed event.
    pub fn emit(&mut self, event: LedgerEvent) {
        log::info!(target: "identity_ledger::event", "{event}");
        self.events.push(event);
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take all pending events, leaving the journal empty.
    pub fn drain(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
