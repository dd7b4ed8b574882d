//! Events and per-tick reports emitted by the party.

use party_core::types::*;
use serde::Serialize;

/// Something that happened at the party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PartyEvent {
    /// An agent became present.
    Arrived { id: AgentId, kind: AgentKind },
    /// An agent stopped being present.
    Left { id: AgentId, kind: AgentKind },
    /// An agent was removed from the registry.
    Removed { id: AgentId, kind: AgentKind },
    /// An agent teleported another.
    Teleported { by: AgentId, target: AgentId, to: Position },
    /// A defender told a normal where to go.
    Alerted { by: AgentId, target: AgentId, to: Position },
    /// A normal was turned into a zombie.
    Infected(Infection),
    /// A tick completed.
    TickComplete { tick: Tick, census: Headcount },
}

/// One normal replaced by one zombie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Infection {
    /// The zombie that made contact.
    pub by: AgentId,
    /// The normal that was removed.
    pub victim: AgentId,
    /// The zombie created in its place.
    pub zombie: AgentId,
    pub position: Position,
    pub size: f64,
}

/// Summary of one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    /// Policies consulted during the decision phase.
    pub decisions: usize,
    pub moved: usize,
    pub rejected: usize,
    pub stayed: usize,
    pub teleports: usize,
    pub alerts: usize,
    pub infections: Vec<Infection>,
    /// Present agents once the tick ended.
    pub census: Headcount,
}

impl TickReport {
    pub fn infected(&self) -> usize {
        self.infections.len()
    }
}
