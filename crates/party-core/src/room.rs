//! Room — what a policy can see and do during its turn.
//!
//! A policy never touches the registry or a capability token directly.
//! The runtime hands it a `Room` bound to the acting agent; every
//! privileged call made through the room carries that agent's identity,
//! so a policy can only ever act as the kind it drives.

use crate::error::Result;
use crate::geometry::Distances;
use crate::types::*;
use rand::RngCore;

/// The party as seen by the agent whose turn it is.
pub trait Room {
    // --- Observation ---

    /// Current tick (the one being decided).
    fn tick(&self) -> Tick;

    /// Arena bounds.
    fn bounds(&self) -> Bounds;

    /// Fresh copy of the acting agent.
    fn me(&self) -> AgentView;

    /// Present agents matching `query`, in id order.
    fn present(&self, query: KindQuery) -> Vec<AgentView>;

    /// Every agent matching `query`, present or not, in id order.
    fn everyone(&self, query: KindQuery) -> Vec<AgentView>;

    /// Agents matching `query` whose name is exactly `name`.
    fn named(&self, query: KindQuery, name: &str) -> Vec<AgentView>;

    /// Edge distance at or below which zombies infect normals.
    fn touching_threshold(&self) -> f64;

    /// Edge distance at or below which teleports are allowed.
    fn teleport_threshold(&self) -> f64;

    // --- Actions ---

    /// Resize `target`. Only agents of the same kind may do this.
    fn resize(&mut self, target: AgentId, size: f64) -> Result<f64>;

    /// Set the acting agent's happiness, clamped to [-1, 1].
    fn set_happiness(&mut self, level: f64) -> Result<f64>;

    /// Teleport `target` to `destination` if the injected rule and the
    /// proximity threshold allow it. Returns whether it happened.
    fn teleport(&mut self, target: AgentId, destination: Position) -> Result<bool>;

    /// Tell a normal where to go on its next decision.
    fn alert(&mut self, target: AgentId, destination: Position) -> Result<()>;

    /// Consume the acting agent's pending alert, if any.
    fn take_alert(&mut self) -> Option<Position>;

    /// Shared random source; draws are deterministic for a given seed.
    fn rng(&mut self) -> &mut dyn RngCore;

    // --- Provided ---

    /// Resize the acting agent.
    fn resize_me(&mut self, size: f64) -> Result<f64> {
        let id = self.me().id;
        self.resize(id, size)
    }

    /// Nearest present agent of `kind` by centre distance, with the
    /// distances to it.
    fn nearest(&self, kind: AgentKind) -> Option<(AgentView, Distances)> {
        let me = self.me();
        self.present(kind.into())
            .into_iter()
            .filter(|other| other.id != me.id)
            .map(|other| {
                let d = me.distances_to(&other);
                (other, d)
            })
            .min_by(|a, b| a.1.center.total_cmp(&b.1.center))
    }
}
