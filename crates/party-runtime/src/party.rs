//! Party — the scheduler and the driver surface.
//!
//! The party owns the registry and runs the simulation one tick at a time.
//! Each tick has four phases, always in this order:
//!
//! 1. **Decision**: every present defender, then normal, then zombie asks
//!    its kind's policy for a move. Moves are buffered. Side effects made
//!    through the [`Room`](party_core::room::Room) (resizing, alerts,
//!    teleports) happen immediately.
//! 2. **Apply**: buffered moves are applied in the same order with the
//!    driver's capability. Moves that would overlap are rejected.
//! 3. **Infection**: every zombie touching a normal turns it into a new
//!    zombie of the same size at the same place.
//! 4. **Publish**: lifecycle notifications and the tick report go to the
//!    presenter, then removed agents are erased.
//!
//! A policy failure aborts the tick and halts the party until the next
//! [`init`](Party::init).

use crate::capability::Capability;
use crate::config::{validate_bounds, PartyConfig};
use crate::events::{Infection, PartyEvent, TickReport};
use crate::policies::Policies;
use crate::presentation::{Notice, NullPresenter, Presenter};
use crate::registry::{Presence, Registry};
use crate::resolver::{MoveOutcome, Resolver};
use crate::turn::Turn;
use party_core::error::{PartyError, Result};
use party_core::geometry::is_near;
use party_core::teleport::DefendersTeleportZombies;
use party_core::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Running totals for a party.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartyStats {
    /// Last completed tick.
    pub tick: Tick,
    /// Present agents per kind.
    pub present: Headcount,
    /// Listed agents that are not present.
    pub absent: usize,
    /// Agents created since the last `init`, including infection zombies.
    pub created: usize,
    pub infections: usize,
    pub teleports: usize,
    pub rejected_moves: usize,
    /// Tick that failed, if the party is halted.
    pub halted_at: Option<Tick>,
}

/// A serializable picture of the party at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct PartySnapshot {
    pub tick: Tick,
    pub bounds: Bounds,
    pub agents: Vec<AgentView>,
    pub stats: PartyStats,
}

/// The simulation kernel.
pub struct Party {
    config: PartyConfig,
    registry: Registry,
    resolver: Resolver,
    policies: Policies,
    presenter: Box<dyn Presenter>,
    rng: SmallRng,
    tick: Tick,
    halted_at: Option<Tick>,
    notices: Vec<Notice>,
    history: VecDeque<PartyEvent>,
    created: usize,
    infections: usize,
    teleports: usize,
    rejected_moves: usize,
}

impl std::fmt::Debug for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Party")
            .field("tick", &self.tick)
            .field("census", &self.registry.census())
            .field("halted_at", &self.halted_at)
            .finish_non_exhaustive()
    }
}

impl Default for Party {
    fn default() -> Self {
        Self::new()
    }
}

impl Party {
    /// An empty party with the default configuration and the standard
    /// policies. Call [`init`](Self::init) to fill it.
    pub fn new() -> Self {
        Self::assemble(
            PartyConfig::default(),
            Arc::new(DefendersTeleportZombies),
            Policies::standard(),
            Box::new(NullPresenter),
        )
    }

    /// An empty party with `config`. Fails if the configuration is invalid.
    pub fn from_config(config: PartyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(
            config,
            Arc::new(DefendersTeleportZombies),
            Policies::standard(),
            Box::new(NullPresenter),
        ))
    }

    pub(crate) fn assemble(
        config: PartyConfig,
        rule: Arc<dyn party_core::teleport::TeleportRule>,
        policies: Policies,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            resolver: Resolver::new(rule, config.teleport_threshold),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            registry: Registry::new(),
            policies,
            presenter,
            tick: 0,
            halted_at: None,
            notices: Vec::new(),
            history: VecDeque::new(),
            created: 0,
            infections: 0,
            teleports: 0,
            rejected_moves: 0,
        }
    }

    // --- Setup ---

    /// Start over with the configured headcount and bounds.
    pub fn reset(&mut self) -> Result<Headcount> {
        let config = self.config.clone();
        self.init(config.headcount, config.bounds)
    }

    /// Remove everyone, then create and place `headcount` new guests.
    ///
    /// Normals are created first, then defenders, then zombies. Each guest
    /// is placed at a random spot within `bounds`; if the spot overlaps an
    /// agent already placed, a new spot is drawn, up to the configured
    /// number of retries. A guest that cannot be placed stays absent.
    ///
    /// Returns the number of guests placed per kind. Clears a halt.
    pub fn init(&mut self, headcount: Headcount, bounds: Bounds) -> Result<Headcount> {
        validate_bounds(&bounds)?;

        for agent in self.registry.clear() {
            self.notices.push(Notice::Remove(agent));
        }
        self.flush();

        self.config.bounds = bounds;
        self.config.headcount = headcount;
        self.rng = SmallRng::seed_from_u64(self.config.seed);
        self.tick = 0;
        self.halted_at = None;
        self.history.clear();
        self.created = 0;
        self.infections = 0;
        self.teleports = 0;
        self.rejected_moves = 0;

        let mut placed = Headcount::default();
        for kind in [AgentKind::Normal, AgentKind::Defender, AgentKind::Zombie] {
            for _ in 0..headcount.of(kind) {
                let attrs = self.policies.get(kind).newcomer(&mut self.rng);
                let id = self.create(kind, attrs);
                if self.place_randomly(id)? {
                    placed.add(kind);
                }
            }
        }
        self.flush();

        info!(
            normals = placed.normals,
            zombies = placed.zombies,
            defenders = placed.defenders,
            requested = headcount.total(),
            "party initialised"
        );
        Ok(placed)
    }

    fn place_randomly(&mut self, id: AgentId) -> Result<bool> {
        let driver = Capability::driver();
        let bounds = self.config.bounds;
        for attempt in 0..=self.config.placement_retries {
            let spot = Position::new(
                self.rng.gen_range(bounds.x_min..=bounds.x_max),
                self.rng.gen_range(bounds.y_min..=bounds.y_max),
            );
            match self.resolver.move_to(&mut self.registry, &driver, id, spot)? {
                MoveOutcome::Rejected { blocker } => {
                    trace!(agent = %id, %blocker, attempt, "placement collided");
                }
                MoveOutcome::Moved { .. } | MoveOutcome::Stayed => {
                    self.set_presence(id, Presence::Present)?;
                    return Ok(true);
                }
            }
        }
        debug!(agent = %id, "no free spot, leaving agent absent");
        Ok(false)
    }

    // --- Simulation ---

    /// Run one tick.
    pub fn step(&mut self) -> Result<TickReport> {
        if let Some(tick) = self.halted_at {
            return Err(PartyError::Halted { tick });
        }
        let tick = self.tick + 1;
        match self.run_tick(tick) {
            Ok(report) => {
                self.tick = tick;
                self.publish(&report);
                Ok(report)
            }
            Err(err) => {
                error!(tick, error = %err, "tick failed, halting party");
                self.halted_at = Some(tick);
                Err(err)
            }
        }
    }

    /// Run `ticks` ticks, stopping at the first failure.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<TickReport>> {
        (0..ticks).map(|_| self.step()).collect()
    }

    fn run_tick(&mut self, tick: Tick) -> Result<TickReport> {
        let mut report = TickReport {
            tick,
            ..Default::default()
        };
        let mut events = Vec::new();

        // Decision
        let mut plan = Vec::new();
        for kind in AgentKind::DECISION_ORDER {
            for id in self.registry.present_ids(kind.into()) {
                if !self.registry.is_present(id) {
                    continue;
                }
                let policy = self.policies.get_mut(kind);
                let mut turn = Turn::open(
                    &mut self.registry,
                    &self.resolver,
                    &mut self.rng,
                    &mut events,
                    self.config.bounds,
                    self.config.touching_threshold,
                    tick,
                    id,
                )?;
                let requested = policy.decide(&mut turn)?;
                if !requested.dx.is_finite() || !requested.dy.is_finite() {
                    return Err(PartyError::policy(
                        policy.name(),
                        id,
                        kind,
                        "requested a non-finite displacement",
                    ));
                }
                trace!(agent = %id, %kind, dx = requested.dx, dy = requested.dy, "decided");
                report.decisions += 1;
                plan.push((id, requested));
            }
        }
        for event in &events {
            match event {
                PartyEvent::Teleported { .. } => report.teleports += 1,
                PartyEvent::Alerted { .. } => report.alerts += 1,
                _ => {}
            }
        }
        self.record_all(events);

        // Apply
        let driver = Capability::driver();
        for (id, requested) in plan {
            match self.resolver.move_by(&mut self.registry, &driver, id, requested)? {
                MoveOutcome::Moved { .. } => report.moved += 1,
                MoveOutcome::Rejected { .. } => report.rejected += 1,
                MoveOutcome::Stayed => report.stayed += 1,
            }
        }

        // Infection
        report.infections = self.spread_infection()?;

        report.census = self.registry.census();
        self.teleports += report.teleports;
        self.rejected_moves += report.rejected;
        self.infections += report.infections.len();
        Ok(report)
    }

    /// Zombies present at the start of the phase infect every present
    /// normal within reach. Zombies created here do not infect until the
    /// next tick.
    fn spread_infection(&mut self) -> Result<Vec<Infection>> {
        let reach = self.config.touching_threshold;
        let mut infections = Vec::new();

        for zombie in self.registry.present_ids(AgentKind::Zombie.into()) {
            let Some(zombie_at) = self.registry.record(zombie).map(|r| r.footprint()) else {
                continue;
            };
            for normal in self.registry.present_ids(AgentKind::Normal.into()) {
                let Some(victim) = self.registry.record(normal) else {
                    continue;
                };
                let victim_at = victim.footprint();
                if !is_near(&zombie_at, &victim_at, reach) {
                    continue;
                }

                let attrs = self
                    .policies
                    .get(AgentKind::Zombie)
                    .newcomer(&mut self.rng)
                    .at(victim_at.position)
                    .sized(victim_at.size);
                let replacement = self.create(AgentKind::Zombie, attrs);
                self.set_presence(replacement, Presence::Present)?;
                self.set_presence(normal, Presence::Absent)?;
                self.retire(normal)?;

                let infection = Infection {
                    by: zombie,
                    victim: normal,
                    zombie: replacement,
                    position: victim_at.position,
                    size: victim_at.size,
                };
                debug!(by = %zombie, victim = %normal, zombie = %replacement, "infected");
                self.record(PartyEvent::Infected(infection));
                infections.push(infection);
            }
        }
        Ok(infections)
    }

    fn publish(&mut self, report: &TickReport) {
        self.flush();
        let agents = self.registry.get_all(KindQuery::Any);
        self.presenter.tick_complete(report, &agents);
        self.record(PartyEvent::TickComplete {
            tick: report.tick,
            census: report.census,
        });
    }

    /// Deliver pending notifications, then erase removed agents.
    fn flush(&mut self) {
        for notice in self.notices.drain(..) {
            notice.deliver(self.presenter.as_mut());
        }
        self.registry.erase_retired();
    }

    // --- Lifecycle ---

    /// Register a new, absent agent.
    pub fn create(&mut self, kind: AgentKind, attrs: AgentAttrs) -> AgentId {
        self.created += 1;
        self.registry.create(kind, attrs)
    }

    /// Make an agent present.
    pub fn arrive(&mut self, id: AgentId) -> Result<()> {
        self.set_presence(id, Presence::Present)?;
        self.flush();
        Ok(())
    }

    /// Make an agent absent. It stays listed and addressable.
    pub fn leave(&mut self, id: AgentId) -> Result<()> {
        self.set_presence(id, Presence::Absent)?;
        self.flush();
        Ok(())
    }

    /// Remove an agent. It is erased once the presenter has been told.
    pub fn remove(&mut self, id: AgentId) -> Result<()> {
        if self.registry.is_present(id) {
            self.set_presence(id, Presence::Absent)?;
        }
        self.retire(id)?;
        self.flush();
        Ok(())
    }

    fn set_presence(&mut self, id: AgentId, presence: Presence) -> Result<()> {
        let before = self
            .registry
            .record(id)
            .filter(|r| !r.is_retired())
            .map(|r| r.presence())
            .ok_or(PartyError::UnknownAgent(id))?;
        if before == presence {
            return Ok(());
        }
        let view = self
            .registry
            .set_presence(id, presence)
            .ok_or(PartyError::UnknownAgent(id))?;
        let kind = view.kind;
        match presence {
            Presence::Present => {
                self.notices.push(Notice::Arrive(view));
                self.record(PartyEvent::Arrived { id, kind });
            }
            Presence::Absent => {
                self.notices.push(Notice::Leave(view));
                self.record(PartyEvent::Left { id, kind });
            }
            Presence::Retired => {}
        }
        Ok(())
    }

    fn retire(&mut self, id: AgentId) -> Result<()> {
        let view = self.registry.remove(id).ok_or(PartyError::UnknownAgent(id))?;
        let kind = view.kind;
        self.notices.push(Notice::Remove(view));
        self.record(PartyEvent::Removed { id, kind });
        Ok(())
    }

    // --- Driver movement ---

    /// Move an agent by up to its move limit, rejecting overlaps.
    pub fn move_by(&mut self, id: AgentId, dx: f64, dy: f64) -> Result<MoveOutcome> {
        let outcome = self.resolver.move_by(
            &mut self.registry,
            &Capability::driver(),
            id,
            Displacement::new(dx, dy),
        )?;
        if outcome.is_rejected() {
            self.rejected_moves += 1;
        }
        Ok(outcome)
    }

    /// Put an agent at (x, y), ignoring its move limit but not overlaps.
    pub fn move_to(&mut self, id: AgentId, x: f64, y: f64) -> Result<MoveOutcome> {
        let outcome = self.resolver.move_to(
            &mut self.registry,
            &Capability::driver(),
            id,
            Position::new(x, y),
        )?;
        if outcome.is_rejected() {
            self.rejected_moves += 1;
        }
        Ok(outcome)
    }

    /// Have `teleporter` teleport `target` to (x, y). Returns whether the
    /// teleport rule and the proximity threshold allowed it.
    pub fn teleport(&mut self, teleporter: AgentId, target: AgentId, x: f64, y: f64) -> Result<bool> {
        let to = Position::new(x, y);
        let done = self.resolver.teleport(&mut self.registry, teleporter, target, to)?;
        if done {
            self.teleports += 1;
            self.record(PartyEvent::Teleported { by: teleporter, target, to });
        }
        Ok(done)
    }

    // --- Reading ---

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// An agent by id, if it has not been erased.
    pub fn agent(&self, id: AgentId) -> Option<AgentView> {
        self.registry.get(id)
    }

    /// Every listed agent of the queried kind, present or absent.
    pub fn get_all(&self, query: impl Into<KindQuery>) -> Vec<AgentView> {
        self.registry.get_all(query.into())
    }

    /// Present agents of the queried kind.
    pub fn get_all_present(&self, query: impl Into<KindQuery>) -> Vec<AgentView> {
        self.registry.get_all_present(query.into())
    }

    pub fn get_by_name(&self, query: impl Into<KindQuery>, name: &str) -> Vec<AgentView> {
        self.registry.get_by_name(query.into(), name)
    }

    /// Present agents per kind.
    pub fn census(&self) -> Headcount {
        self.registry.census()
    }

    pub fn stats(&self) -> PartyStats {
        let present = self.registry.census();
        PartyStats {
            tick: self.tick,
            present,
            absent: self.registry.len() - present.total(),
            created: self.created,
            infections: self.infections,
            teleports: self.teleports,
            rejected_moves: self.rejected_moves,
            halted_at: self.halted_at,
        }
    }

    pub fn snapshot(&self) -> PartySnapshot {
        PartySnapshot {
            tick: self.tick,
            bounds: self.config.bounds,
            agents: self.registry.get_all(KindQuery::Any),
            stats: self.stats(),
        }
    }

    /// The snapshot as pretty-printed JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    /// Events since the last `init`, oldest first.
    pub fn event_history(&self) -> &VecDeque<PartyEvent> {
        &self.history
    }

    fn record(&mut self, event: PartyEvent) {
        self.history.push_back(event);
        self.trim_history();
    }

    fn record_all(&mut self, events: Vec<PartyEvent>) {
        for event in events {
            self.record(event);
        }
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.config.history_limit {
            self.history.pop_front();
        }
    }
}
