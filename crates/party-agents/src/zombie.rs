//! Zombie — shrinks to its smallest (and fastest) size and heads straight
//! for the nearest normal.

use party_core::error::Result;
use party_core::policy::Policy;
use party_core::room::Room;
use party_core::types::*;
use rand::RngCore;

/// Policy for [`AgentKind::Zombie`].
#[derive(Debug, Clone, Default)]
pub struct ZombiePolicy;

impl ZombiePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for ZombiePolicy {
    fn kind(&self) -> AgentKind {
        AgentKind::Zombie
    }

    fn name(&self) -> &str {
        "zombie"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        room.resize_me(AgentKind::Zombie.min_size())?;
        Ok(room
            .nearest(AgentKind::Normal)
            .map_or(Displacement::ZERO, |(_, d)| d.toward()))
    }

    /// Zombies are always perfectly happy.
    fn newcomer(&self, _rng: &mut dyn RngCore) -> AgentAttrs {
        AgentAttrs::default().sized(DEFAULT_SIZE).feeling(1.0)
    }
}
