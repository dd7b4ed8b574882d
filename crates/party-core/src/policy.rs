//! Policy — how an agent kind decides what to do each tick.
//!
//! A policy is a strategy value shared by every agent of one kind. It is
//! asked once per tick per present agent, through a [`Room`] bound to that
//! agent, and answers with the displacement it would like to make. The
//! kernel buffers the answer and applies it after everyone has decided.

use crate::error::Result;
use crate::room::Room;
use crate::types::*;
use rand::RngCore;

/// Decision function for one agent kind.
pub trait Policy: Send {
    /// The kind of agent this policy drives.
    fn kind(&self) -> AgentKind;

    /// Policy name (for display and error reports).
    fn name(&self) -> &str;

    /// Decide the acting agent's move for this tick.
    ///
    /// Side effects (resizing, alerts, teleports, happiness) go through
    /// `room` and happen immediately. The returned displacement is only a
    /// request: the resolver may shorten it or reject it.
    fn decide(&mut self, room: &mut dyn Room) -> Result<Displacement>;

    /// Attributes for a freshly created agent of this kind.
    fn newcomer(&self, _rng: &mut dyn RngCore) -> AgentAttrs {
        AgentAttrs::default()
    }
}

/// A policy that never moves. Useful as a stand-in.
#[derive(Debug, Clone, Copy)]
pub struct Idle(pub AgentKind);

impl Policy for Idle {
    fn kind(&self) -> AgentKind {
        self.0
    }

    fn name(&self) -> &str {
        "idle"
    }

    fn decide(&mut self, _room: &mut dyn Room) -> Result<Displacement> {
        Ok(Displacement::ZERO)
    }
}
