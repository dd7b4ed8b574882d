//! Movement and collision resolver.
//!
//! Every change of position, size or happiness goes through here. Each
//! privileged routine checks the caller's [`Capability`] first and fails
//! with an authorization violation before touching any state.
//!
//! A rejected move is an ordinary outcome: the agent keeps its position
//! and the caller is told which agent was in the way.

use crate::capability::Capability;
use crate::registry::Registry;
use party_core::capability::{Caller, PrivilegedOp};
use party_core::error::{PartyError, Result};
use party_core::geometry::{clamp_displacement, edge_distance_after_move, is_near};
use party_core::teleport::TeleportRule;
use party_core::types::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// What happened to a requested move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MoveOutcome {
    /// The agent moved.
    Moved { from: Position, to: Position },
    /// The move would have overlapped `blocker`; nothing changed.
    Rejected { blocker: AgentId },
    /// Nothing to do: the displacement was zero.
    Stayed,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveOutcome::Rejected { .. })
    }
}

/// Applies moves, teleports and attribute changes to the registry.
#[derive(Clone)]
pub struct Resolver {
    rule: Arc<dyn TeleportRule>,
    teleport_threshold: f64,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("teleport_threshold", &self.teleport_threshold)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(rule: Arc<dyn TeleportRule>, teleport_threshold: f64) -> Self {
        Self { rule, teleport_threshold }
    }

    pub fn teleport_threshold(&self) -> f64 {
        self.teleport_threshold
    }

    /// Buffered movement: displace `id` by at most its move limit.
    ///
    /// Accepted callers: the driver and the raw reposition routine. A NaN
    /// or infinite displacement is refused before anything moves.
    pub fn move_by(
        &self,
        registry: &mut Registry,
        cap: &Capability,
        id: AgentId,
        requested: Displacement,
    ) -> Result<MoveOutcome> {
        let record = registry.record(id).ok_or(PartyError::UnknownAgent(id))?;
        cap.authorize(PrivilegedOp::MoveBy, record)?;
        if !requested.is_finite() {
            return Err(PartyError::NonFinite { agent: id, what: "displacement" });
        }
        let limit = match cap.caller() {
            Caller::Reposition => None,
            _ => record.move_limit(),
        };
        Ok(displace(registry, id, clamp_displacement(requested, limit)))
    }

    /// Raw reposition: put `id` at `destination` in one unlimited step.
    ///
    /// The teleport operation sets the position directly. The driver goes
    /// through a collision-checked displacement, so a reposition into
    /// another agent is rejected.
    pub fn move_to(
        &self,
        registry: &mut Registry,
        cap: &Capability,
        id: AgentId,
        destination: Position,
    ) -> Result<MoveOutcome> {
        let record = registry.record(id).ok_or(PartyError::UnknownAgent(id))?;
        cap.authorize(PrivilegedOp::Reposition, record)?;
        if !destination.is_finite() {
            return Err(PartyError::NonFinite { agent: id, what: "destination" });
        }
        let from = record.position();

        if cap.caller() == Caller::Teleport {
            if let Some(record) = registry.record_mut(id) {
                record.set_position(destination);
            }
            return Ok(MoveOutcome::Moved { from, to: destination });
        }

        let reposition = Capability::mint(Caller::Reposition);
        self.move_by(registry, &reposition, id, Displacement::between(from, destination))
    }

    /// Teleport `target` to `destination` on behalf of `teleporter`.
    ///
    /// Happens only if the rule allows the kind pair, both agents are
    /// present, and their edges are within the teleport threshold. The
    /// destination is not checked for overlap. Returns whether the
    /// teleport happened.
    pub fn teleport(
        &self,
        registry: &mut Registry,
        teleporter: AgentId,
        target: AgentId,
        destination: Position,
    ) -> Result<bool> {
        let by = registry.record(teleporter).ok_or(PartyError::UnknownAgent(teleporter))?;
        let to = registry.record(target).ok_or(PartyError::UnknownAgent(target))?;
        if !destination.is_finite() {
            return Err(PartyError::NonFinite { agent: target, what: "destination" });
        }

        if teleporter == target || !by.is_present() || !to.is_present() {
            return Ok(false);
        }
        if !self.rule.can_teleport(by.kind(), to.kind()) {
            trace!(%teleporter, %target, "teleport not allowed for this kind pair");
            return Ok(false);
        }
        if !is_near(&by.footprint(), &to.footprint(), self.teleport_threshold) {
            trace!(%teleporter, %target, "teleport out of reach");
            return Ok(false);
        }

        let cap = Capability::mint(Caller::Teleport);
        self.move_to(registry, &cap, target, destination)?;
        debug!(%teleporter, %target, x = destination.x, y = destination.y, "teleported");
        Ok(true)
    }

    /// Resize `id`. Only a caller of the same kind may do this.
    ///
    /// The size is clamped to the kind's range and the move limit is
    /// recomputed. Returns the size actually stored.
    pub fn set_size(
        &self,
        registry: &mut Registry,
        cap: &Capability,
        id: AgentId,
        requested: f64,
    ) -> Result<f64> {
        let record = registry.record(id).ok_or(PartyError::UnknownAgent(id))?;
        cap.authorize(PrivilegedOp::Resize, record)?;
        let record = registry.record_mut(id).ok_or(PartyError::UnknownAgent(id))?;
        Ok(record.apply_size(requested))
    }

    /// Set `id`'s happiness, clamped to [-1, 1].
    pub fn set_happiness(&self, registry: &mut Registry, id: AgentId, level: f64) -> Result<f64> {
        let record = registry.record_mut(id).ok_or(PartyError::UnknownAgent(id))?;
        Ok(record.apply_happiness(level))
    }

    /// Post an alert to `target`. Only defenders may alert, and only normals.
    pub fn alert(
        &self,
        registry: &mut Registry,
        cap: &Capability,
        target: AgentId,
        destination: Position,
    ) -> Result<()> {
        let record = registry.record(target).ok_or(PartyError::UnknownAgent(target))?;
        cap.authorize(PrivilegedOp::Alert, record)?;
        if let Some(record) = registry.record_mut(target) {
            record.post_alert(destination);
        }
        Ok(())
    }
}

/// Move `id` by `displacement` unless it would overlap a present agent.
fn displace(registry: &mut Registry, id: AgentId, displacement: Displacement) -> MoveOutcome {
    if displacement.is_zero() {
        return MoveOutcome::Stayed;
    }
    let Some(record) = registry.record(id) else {
        return MoveOutcome::Stayed;
    };
    let footprint = record.footprint();
    let from = record.position();

    let blocker = registry
        .present_footprints_except(id)
        .find(|(_, other)| edge_distance_after_move(&footprint, other, displacement) <= 0.0)
        .map(|(other, _)| other);
    if let Some(blocker) = blocker {
        debug!(agent = %id, %blocker, "move rejected");
        return MoveOutcome::Rejected { blocker };
    }

    let to = from.offset(displacement);
    if let Some(record) = registry.record_mut(id) {
        record.set_position(to);
    }
    MoveOutcome::Moved { from, to }
}
