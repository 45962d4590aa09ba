//! Role-based authorization for store mutations.
//!
//! Each store variant has exactly one privileged account. A [`Grant`] binds
//! the role to that account when the store is constructed and never changes
//! afterwards. Checks take the caller explicitly; there is no ambient
//! "current sender".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{LedgerError, Result};

/// The privileged role of a store variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Creates and updates records in an issuer-gated store.
    Issuer,
    /// Creates, updates and deletes records in an open-create store.
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Issuer => "issuer",
            Role::Operator => "operator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role bound to its single holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    role: Role,
    holder: Address,
}

impl Grant {
    pub fn new(role: Role, holder: Address) -> Self {
        Self { role, holder }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn holder(&self) -> Address {
        self.holder
    }

    /// Whether `caller` holds this role.
    pub fn is_held_by(&self, caller: &Address) -> bool {
        self.holder == *caller
    }

    /// Require that `caller` holds this role.
    pub fn require(&self, caller: &Address) -> Result<()> {
        if self.is_held_by(caller) {
            Ok(())
        } else {
            log::debug!("rejected {caller}: {} role required", self.role);
            Err(LedgerError::Unauthorized {
                caller: *caller,
                role: self.role,
            })
        }
    }

    /// Require that `caller` is either `owner` itself or holds this role.
    ///
    /// Used where an account may act on its own entry, e.g. a subject
    /// removing its own record, or a profiler removing its own profile.
    pub fn require_self_or(&self, caller: &Address, owner: &Address) -> Result<()> {
        if caller == owner {
            return Ok(());
        }
        self.require(caller)
    }
}
