//! Capability tokens.
//!
//! A [`Capability`] proves the identity of whoever holds it. Tokens can
//! only be minted inside this crate: the driver surface of
//! [`Party`](crate::party::Party) mints `Driver`, the teleport operation
//! mints `Teleport`, the raw reposition routine mints `Reposition`, and
//! each policy turn mints the kind of the acting agent. Code outside the
//! crate can read a token's caller but never fabricate one.

use crate::registry::AgentRecord;
use party_core::capability::{Caller, PrivilegedOp};
use party_core::error::AuthorizationViolation;
use party_core::types::AgentKind;

/// Unforgeable proof of caller identity.
#[derive(Debug)]
pub struct Capability {
    caller: Caller,
}

impl Capability {
    pub(crate) fn mint(caller: Caller) -> Self {
        Self { caller }
    }

    pub(crate) fn driver() -> Self {
        Self::mint(Caller::Driver)
    }

    pub(crate) fn for_kind(kind: AgentKind) -> Self {
        Self::mint(Caller::Agent(kind))
    }

    /// Who this token speaks for.
    pub fn caller(&self) -> Caller {
        self.caller
    }

    /// Check that this token may perform `op` on `agent`.
    pub fn authorize(&self, op: PrivilegedOp, agent: &AgentRecord) -> Result<(), AuthorizationViolation> {
        if op.permits(self.caller, agent.kind()) {
            Ok(())
        } else {
            Err(AuthorizationViolation::new(op, self.caller, agent.id(), agent.kind()))
        }
    }
}
