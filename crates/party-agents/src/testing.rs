//! In-memory room for exercising policies without a runtime.

use party_core::capability::{Caller, PrivilegedOp};
use party_core::error::{AuthorizationViolation, PartyError, Result};
use party_core::room::Room;
use party_core::types::*;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// The first agent added is the one whose turn it is.
pub(crate) struct StubRoom {
    agents: Vec<AgentView>,
    pub bounds: Bounds,
    pub alert: Option<Position>,
    pub alerts: Vec<(AgentId, Position)>,
    pub teleports: Vec<(AgentId, Position)>,
    rng: SmallRng,
}

impl StubRoom {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            bounds: Bounds::default(),
            alert: None,
            alerts: Vec::new(),
            teleports: Vec::new(),
            rng: SmallRng::seed_from_u64(0),
        }
    }

    pub fn add(&mut self, kind: AgentKind, x: f64, y: f64, size: f64, happiness: f64) -> AgentId {
        let id = AgentId(self.agents.len() as u64 + 1);
        self.agents.push(AgentView {
            id,
            name: format!("ID-{}", id.0),
            kind,
            position: Position::new(x, y),
            size,
            happiness,
            move_limit: kind.move_limit(size),
            present: true,
        });
        id
    }

    pub fn set_present(&mut self, id: AgentId, present: bool) {
        self.slot(id).present = present;
    }

    pub fn view(&self, id: AgentId) -> AgentView {
        self.agents[(id.0 - 1) as usize].clone()
    }

    fn slot(&mut self, id: AgentId) -> &mut AgentView {
        &mut self.agents[(id.0 - 1) as usize]
    }

    fn caller(&self) -> Caller {
        Caller::Agent(self.agents[0].kind)
    }
}

impl Room for StubRoom {
    fn tick(&self) -> Tick {
        1
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn me(&self) -> AgentView {
        self.agents[0].clone()
    }

    fn present(&self, query: KindQuery) -> Vec<AgentView> {
        self.agents
            .iter()
            .filter(|a| a.present && query.matches(a.kind))
            .cloned()
            .collect()
    }

    fn everyone(&self, query: KindQuery) -> Vec<AgentView> {
        self.agents.iter().filter(|a| query.matches(a.kind)).cloned().collect()
    }

    fn named(&self, query: KindQuery, name: &str) -> Vec<AgentView> {
        self.everyone(query).into_iter().filter(|a| a.name == name).collect()
    }

    fn touching_threshold(&self) -> f64 {
        TOUCHING_THRESHOLD
    }

    fn teleport_threshold(&self) -> f64 {
        TELEPORT_THRESHOLD
    }

    fn resize(&mut self, target: AgentId, size: f64) -> Result<f64> {
        let caller = self.caller();
        let agent = self.slot(target);
        if !PrivilegedOp::Resize.permits(caller, agent.kind) {
            return Err(AuthorizationViolation::new(PrivilegedOp::Resize, caller, target, agent.kind).into());
        }
        agent.size = agent.kind.clamp_size(size);
        agent.move_limit = agent.kind.move_limit(agent.size);
        Ok(agent.size)
    }

    fn set_happiness(&mut self, level: f64) -> Result<f64> {
        let me = &mut self.agents[0];
        me.happiness = level.clamp(-1.0, 1.0);
        Ok(me.happiness)
    }

    fn teleport(&mut self, target: AgentId, destination: Position) -> Result<bool> {
        let me = self.me();
        let edge = me.distances_to(&self.view(target)).edge;
        if edge > TELEPORT_THRESHOLD {
            return Ok(false);
        }
        self.slot(target).position = destination;
        self.teleports.push((target, destination));
        Ok(true)
    }

    fn alert(&mut self, target: AgentId, destination: Position) -> Result<()> {
        let caller = self.caller();
        let kind = self.view(target).kind;
        if !PrivilegedOp::Alert.permits(caller, kind) {
            return Err(PartyError::from(AuthorizationViolation::new(
                PrivilegedOp::Alert,
                caller,
                target,
                kind,
            )));
        }
        self.alerts.push((target, destination));
        Ok(())
    }

    fn take_alert(&mut self) -> Option<Position> {
        self.alert.take()
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}
