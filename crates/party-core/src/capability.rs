//! Vocabulary of the authorization layer.
//!
//! Privileged kernel operations are gated on *who* is calling. The caller
//! is proven by a capability token minted by the runtime; this module only
//! names the callers and the operations, and decides which caller may
//! perform which operation on which kind of agent.

use crate::types::AgentKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity proven by a capability token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Caller {
    /// The top-level driver of the simulation.
    Driver,
    /// The teleport operation.
    Teleport,
    /// The raw reposition routine.
    Reposition,
    /// Code acting on behalf of an agent of the given kind.
    Agent(AgentKind),
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caller::Driver => f.write_str("driver"),
            Caller::Teleport => f.write_str("teleport"),
            Caller::Reposition => f.write_str("reposition"),
            Caller::Agent(kind) => write!(f, "{kind} policy"),
        }
    }
}

/// Operations that require a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrivilegedOp {
    /// Change an agent's size.
    Resize,
    /// Set an agent's position, ignoring its move limit.
    Reposition,
    /// Apply a buffered displacement.
    MoveBy,
    /// Post a zombie alert to a normal.
    Alert,
}

impl PrivilegedOp {
    pub fn name(self) -> &'static str {
        match self {
            PrivilegedOp::Resize => "resize",
            PrivilegedOp::Reposition => "move_to",
            PrivilegedOp::MoveBy => "move_by",
            PrivilegedOp::Alert => "zombie_alert",
        }
    }

    /// Whether `caller` may perform this operation on an agent of `target`
    /// kind.
    pub fn permits(self, caller: Caller, target: AgentKind) -> bool {
        match self {
            PrivilegedOp::Resize => caller == Caller::Agent(target),
            PrivilegedOp::Reposition => matches!(caller, Caller::Driver | Caller::Teleport),
            PrivilegedOp::MoveBy => matches!(caller, Caller::Driver | Caller::Reposition),
            PrivilegedOp::Alert => {
                caller == Caller::Agent(AgentKind::Defender) && target == AgentKind::Normal
            }
        }
    }

    /// Human readable form of the callers this operation accepts.
    pub fn expected(self, target: AgentKind) -> String {
        match self {
            PrivilegedOp::Resize => format!("{} policy", target),
            PrivilegedOp::Reposition => "driver | teleport".to_string(),
            PrivilegedOp::MoveBy => "driver | reposition".to_string(),
            PrivilegedOp::Alert => "Defender policy on a Normal".to_string(),
        }
    }
}

impl fmt::Display for PrivilegedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
