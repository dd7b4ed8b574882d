//! Defender — keeps zombies away from the normals.
//!
//! A defender stays small while it hunts the nearest zombie. Once the
//! zombie's edge is within [`ENGAGE_MARGIN`] of the teleport threshold it
//! grows to full size, which closes the gap, and throws the zombie to the
//! far corner of the arena. While any zombie is present it also tells
//! every normal to make for the origin corner.
//!
//! Defenders get happier the further they are from the nearest zombie, by
//! at most [`MAX_CHEER`] per turn.

use party_core::error::Result;
use party_core::policy::Policy;
use party_core::room::Room;
use party_core::types::*;
use rand::RngCore;

/// Extra edge distance, beyond the teleport threshold, at which a defender
/// engages a zombie.
pub const ENGAGE_MARGIN: f64 = 20.0;
/// Largest happiness gain per turn.
pub const MAX_CHEER: f64 = 0.05;

/// Policy for [`AgentKind::Defender`].
#[derive(Debug, Clone, Default)]
pub struct DefenderPolicy;

impl DefenderPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for DefenderPolicy {
    fn kind(&self) -> AgentKind {
        AgentKind::Defender
    }

    fn name(&self) -> &str {
        "defender"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        let kind = AgentKind::Defender;
        room.resize_me(kind.min_size())?;

        let Some((zombie, distances)) = room.nearest(AgentKind::Zombie) else {
            return Ok(Displacement::ZERO);
        };
        let bounds = room.bounds();

        if distances.edge <= room.teleport_threshold() + ENGAGE_MARGIN {
            room.resize_me(kind.max_size())?;
            room.teleport(zombie.id, bounds.max_corner())?;
        }

        for normal in room.present(AgentKind::Normal.into()) {
            room.alert(normal.id, bounds.min_corner())?;
        }

        let cheer = (distances.center / bounds.diagonal()).min(MAX_CHEER);
        room.set_happiness(room.me().happiness + cheer)?;

        Ok(distances.toward())
    }

    fn newcomer(&self, _rng: &mut dyn RngCore) -> AgentAttrs {
        AgentAttrs::default().sized(DEFAULT_SIZE).feeling(0.5)
    }
}
