//! Identity and profile records.
//!
//! Both record kinds are replaced wholesale on write; there is no partial
//! patching. The `Default` value of each is the empty record that reads
//! return for absent entries.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 of the empty string.
///
/// Historically an entry counted as absent when its label hashed to this
/// value. Presence is now tracked by the store itself, so an empty label is
/// a legitimate value; the constant remains for callers comparing digests.
pub const EMPTY_LABEL_DIGEST: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

fn digest(label: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(label.as_bytes()));
    out
}

/// A subject's own identity data, written by the privileged role holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Display label for the subject.
    pub subject_label: String,
    /// External reference URL.
    pub reference_url: String,
    /// External reference number.
    pub reference_number: u64,
    /// Last update timestamp (seconds since Unix epoch).
    pub last_updated: u64,
}

impl IdentityRecord {
    /// Build a record from its four fields.
    pub fn new(
        subject_label: impl Into<String>,
        reference_url: impl Into<String>,
        reference_number: u64,
        last_updated: u64,
    ) -> Self {
        Self {
            subject_label: subject_label.into(),
            reference_url: reference_url.into(),
            reference_number,
            last_updated,
        }
    }

    /// SHA-256 of the subject label.
    pub fn label_digest(&self) -> [u8; 32] {
        digest(&self.subject_label)
    }
}

/// A third party's annotation about a subject.
///
/// Same shape as [`IdentityRecord`], but it is the profiler's claim, not
/// the subject's own data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub label: String,
    pub url: String,
    pub score: u64,
    pub timestamp: u64,
}

impl ProfileRecord {
    /// Build a profile from its four fields.
    pub fn new(label: impl Into<String>, url: impl Into<String>, score: u64, timestamp: u64) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            score,
            timestamp,
        }
    }

    /// SHA-256 of the profile label.
    pub fn label_digest(&self) -> [u8; 32] {
        digest(&self.label)
    }
}
