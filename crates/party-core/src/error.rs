//! Error types for party operations.
//!
//! Out-of-range sizes and happiness levels are clamped and rejected moves
//! are ordinary outcomes, so neither appears here.

use crate::capability::{Caller, PrivilegedOp};
use crate::types::{AgentId, AgentKind, Tick};
use thiserror::Error;

/// Result type for party operations.
pub type Result<T> = std::result::Result<T, PartyError>;

/// Errors that can occur while running a party.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartyError {
    /// A privileged operation was invoked by a caller it does not accept.
    #[error(transparent)]
    Authorization(#[from] AuthorizationViolation),

    /// A decision policy failed; the tick it ran in is lost.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// No agent with this id exists, or it has already been erased.
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    /// A driver request carried a NaN or infinite coordinate.
    #[error("non-finite {what} requested for {agent}")]
    NonFinite { agent: AgentId, what: &'static str },

    /// Invalid configuration value.
    #[error("invalid configuration for {field}: {reason}")]
    Config { field: String, reason: String },

    /// A previous tick failed; the party must be re-initialised.
    #[error("party halted after tick {tick} failed")]
    Halted { tick: Tick },
}

/// A privileged operation was called by someone not allowed to call it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "authorization violation: `{operation}` on {agent_kind} {agent} called by {caller}, expected {expected}"
)]
pub struct AuthorizationViolation {
    pub operation: PrivilegedOp,
    pub caller: Caller,
    pub agent: AgentId,
    pub agent_kind: AgentKind,
    pub expected: String,
}

impl AuthorizationViolation {
    pub fn new(operation: PrivilegedOp, caller: Caller, agent: AgentId, agent_kind: AgentKind) -> Self {
        Self {
            operation,
            caller,
            agent,
            agent_kind,
            expected: operation.expected(agent_kind),
        }
    }
}

/// A decision policy could not produce a move.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("policy `{policy}` failed for {kind} {agent}: {reason}")]
pub struct PolicyError {
    pub policy: String,
    pub agent: AgentId,
    pub kind: AgentKind,
    pub reason: String,
}

// Convenience constructors
impl PartyError {
    pub fn policy(
        policy: impl Into<String>,
        agent: AgentId,
        kind: AgentKind,
        reason: impl Into<String>,
    ) -> Self {
        PartyError::Policy(PolicyError {
            policy: policy.into(),
            agent,
            kind,
            reason: reason.into(),
        })
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PartyError::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when this error came from the authorization layer.
    pub fn is_authorization(&self) -> bool {
        matches!(self, PartyError::Authorization(_))
    }
}
