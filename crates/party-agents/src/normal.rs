//! Normal — a guest who just wants to enjoy the party.
//!
//! Each turn a normal settles at medium size and checks on the nearest
//! zombie. A zombie within [`DANGER_RADIUS`] makes it less happy; any
//! other situation makes it happier. An unhappy normal runs straight away
//! from that zombie. A happy one follows the last alert a defender gave
//! it, if any. Reaching the top left corner makes it shrink to the
//! smallest size.

use party_core::error::Result;
use party_core::policy::Policy;
use party_core::room::Room;
use party_core::types::*;
use rand::{Rng, RngCore};

/// Centre distance under which a zombie is frightening.
pub const DANGER_RADIUS: f64 = 100.0;
/// Size of the corner, measured from the origin, where normals hide.
pub const SAFE_CORNER: f64 = 10.0;

/// Policy for [`AgentKind::Normal`].
#[derive(Debug, Clone, Default)]
pub struct NormalPolicy;

impl NormalPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for NormalPolicy {
    fn kind(&self) -> AgentKind {
        AgentKind::Normal
    }

    fn name(&self) -> &str {
        "normal"
    }

    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement> {
        let kind = AgentKind::Normal;
        room.resize_me(kind.max_size() / 2.0)?;

        let nearest = room.nearest(AgentKind::Zombie);
        let mood = match &nearest {
            Some((_, d)) if d.center < DANGER_RADIUS => -1.0,
            _ => 1.0,
        };
        let happiness = room.set_happiness(room.me().happiness + mood)?;

        let mut displacement = match &nearest {
            Some((_, d)) => d.toward(),
            None => Displacement::ZERO,
        };
        if happiness <= 0.0 {
            displacement = displacement.reversed();
        } else if let Some(destination) = room.take_alert() {
            displacement = Displacement::between(room.me().position, destination);
        }

        let me = room.me();
        if me.position.x <= SAFE_CORNER && me.position.y <= SAFE_CORNER {
            room.resize_me(kind.min_size())?;
        }
        Ok(displacement)
    }

    /// Random happiness in [-1, 1] and random size within bounds.
    fn newcomer(&self, rng: &mut dyn RngCore) -> AgentAttrs {
        let kind = AgentKind::Normal;
        let happiness = rng.gen_range(-1.0..=1.0);
        let size = rng.gen_range(kind.min_size()..=kind.max_size());
        AgentAttrs::default().feeling(happiness).sized(size)
    }
}
