//! Turn — the runtime side of [`Room`].
//!
//! A `Turn` is created for one agent's decision and dropped right after.
//! It carries the capability of the acting agent's kind, so every
//! privileged call a policy makes is checked against that identity.

use crate::capability::Capability;
use crate::events::PartyEvent;
use crate::registry::Registry;
use crate::resolver::Resolver;
use party_core::error::{PartyError, Result};
use party_core::room::Room;
use party_core::types::*;
use rand::rngs::SmallRng;
use rand::RngCore;

/// One agent's view of the party while it decides.
pub struct Turn<'a> {
    registry: &'a mut Registry,
    resolver: &'a Resolver,
    rng: &'a mut SmallRng,
    events: &'a mut Vec<PartyEvent>,
    bounds: Bounds,
    touching_threshold: f64,
    tick: Tick,
    agent: AgentView,
    cap: Capability,
}

impl<'a> Turn<'a> {
    /// Open a turn for `agent`. Fails if the agent is not registered.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn open(
        registry: &'a mut Registry,
        resolver: &'a Resolver,
        rng: &'a mut SmallRng,
        events: &'a mut Vec<PartyEvent>,
        bounds: Bounds,
        touching_threshold: f64,
        tick: Tick,
        agent: AgentId,
    ) -> Result<Self> {
        let view = registry.get(agent).ok_or(PartyError::UnknownAgent(agent))?;
        let cap = Capability::for_kind(view.kind);
        Ok(Self {
            registry,
            resolver,
            rng,
            events,
            bounds,
            touching_threshold,
            tick,
            agent: view,
            cap,
        })
    }

    fn refresh(&mut self) {
        if let Some(view) = self.registry.get(self.agent.id) {
            self.agent = view;
        }
    }
}

impl Room for Turn<'_> {
    fn tick(&self) -> Tick {
        self.tick
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn me(&self) -> AgentView {
        self.agent.clone()
    }

    fn present(&self, query: KindQuery) -> Vec<AgentView> {
        self.registry.get_all_present(query)
    }

    fn everyone(&self, query: KindQuery) -> Vec<AgentView> {
        self.registry.get_all(query)
    }

    fn named(&self, query: KindQuery, name: &str) -> Vec<AgentView> {
        self.registry.get_by_name(query, name)
    }

    fn touching_threshold(&self) -> f64 {
        self.touching_threshold
    }

    fn teleport_threshold(&self) -> f64 {
        self.resolver.teleport_threshold()
    }

    fn resize(&mut self, target: AgentId, size: f64) -> Result<f64> {
        let stored = self.resolver.set_size(self.registry, &self.cap, target, size)?;
        self.refresh();
        Ok(stored)
    }

    fn set_happiness(&mut self, level: f64) -> Result<f64> {
        let stored = self.resolver.set_happiness(self.registry, self.agent.id, level)?;
        self.refresh();
        Ok(stored)
    }

    fn teleport(&mut self, target: AgentId, destination: Position) -> Result<bool> {
        let done = self.resolver.teleport(self.registry, self.agent.id, target, destination)?;
        if done {
            self.events.push(PartyEvent::Teleported {
                by: self.agent.id,
                target,
                to: destination,
            });
        }
        Ok(done)
    }

    fn alert(&mut self, target: AgentId, destination: Position) -> Result<()> {
        self.resolver.alert(self.registry, &self.cap, target, destination)?;
        self.events.push(PartyEvent::Alerted {
            by: self.agent.id,
            target,
            to: destination,
        });
        Ok(())
    }

    fn take_alert(&mut self) -> Option<Position> {
        self.registry.record_mut(self.agent.id)?.take_alert()
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }
}
