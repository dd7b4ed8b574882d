//! Which kind of agent may teleport which.
//!
//! The rule is supplied once, when the party is built, and never changes
//! afterwards.

use crate::types::AgentKind;

/// Decides whether `teleporter` may teleport `target`.
pub trait TeleportRule: Send + Sync {
    fn can_teleport(&self, teleporter: AgentKind, target: AgentKind) -> bool;
}

impl<F> TeleportRule for F
where
    F: Fn(AgentKind, AgentKind) -> bool + Send + Sync,
{
    fn can_teleport(&self, teleporter: AgentKind, target: AgentKind) -> bool {
        self(teleporter, target)
    }
}

/// Defenders may teleport zombies; nothing else may teleport anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefendersTeleportZombies;

impl TeleportRule for DefendersTeleportZombies {
    fn can_teleport(&self, teleporter: AgentKind, target: AgentKind) -> bool {
        teleporter == AgentKind::Defender && target == AgentKind::Zombie
    }
}

/// Nobody may teleport anybody.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTeleports;

impl TeleportRule for NoTeleports {
    fn can_teleport(&self, _teleporter: AgentKind, _target: AgentKind) -> bool {
        false
    }
}
