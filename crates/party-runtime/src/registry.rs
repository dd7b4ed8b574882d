//! Registry — owns every agent at the party.
//!
//! Agents live in a generational slot arena. Removing an agent does not
//! free its slot straight away: it is marked retired, stays addressable by
//! id so pending lifecycle notifications can still read it, and is erased
//! once those notifications have been delivered. Erasing bumps the slot's
//! generation, so a stale handle fails its lookup instead of reaching a
//! recycled agent.
//!
//! All queries iterate in ascending id order, which is creation order.

use party_core::geometry::Footprint;
use party_core::types::*;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

new_key_type! {
    /// Generational handle to an agent's slot.
    pub struct AgentKey;
}

/// Where an agent stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    /// Created, or has left; ignored by distance and collision checks.
    Absent,
    /// Taking part in the simulation.
    Present,
    /// Removed; no longer listed, waiting to be erased.
    Retired,
}

/// An agent's full mutable state.
///
/// Fields are only changed by the resolver and the scheduler, which live
/// in this crate; everyone else gets read access.
#[derive(Debug, Clone)]
pub struct AgentRecord {
    id: AgentId,
    name: String,
    kind: AgentKind,
    position: Position,
    size: f64,
    happiness: f64,
    move_limit: Option<f64>,
    presence: Presence,
    alert: Option<Position>,
}

impl AgentRecord {
    fn new(id: AgentId, kind: AgentKind, attrs: AgentAttrs) -> Self {
        let size = kind.clamp_size(attrs.size);
        Self {
            id,
            name: attrs.name.unwrap_or_else(|| format!("ID-{}", id.0)),
            kind,
            position: attrs.position,
            size,
            happiness: clamp_happiness(attrs.happiness),
            move_limit: kind.move_limit(size),
            presence: Presence::Absent,
            alert: None,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn happiness(&self) -> f64 {
        self.happiness
    }

    pub fn move_limit(&self) -> Option<f64> {
        self.move_limit
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_present(&self) -> bool {
        self.presence == Presence::Present
    }

    pub fn is_retired(&self) -> bool {
        self.presence == Presence::Retired
    }

    /// Destination of the alert waiting for this agent, if any.
    pub fn pending_alert(&self) -> Option<Position> {
        self.alert
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.size)
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            position: self.position,
            size: self.size,
            happiness: self.happiness,
            move_limit: self.move_limit,
            present: self.is_present(),
        }
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Clamp and store a new size, recomputing the move limit.
    pub(crate) fn apply_size(&mut self, requested: f64) -> f64 {
        self.size = self.kind.clamp_size(requested);
        self.move_limit = self.kind.move_limit(self.size);
        self.size
    }

    pub(crate) fn apply_happiness(&mut self, level: f64) -> f64 {
        self.happiness = clamp_happiness(level);
        self.happiness
    }

    pub(crate) fn set_presence(&mut self, presence: Presence) {
        self.presence = presence;
    }

    pub(crate) fn post_alert(&mut self, destination: Position) {
        self.alert = Some(destination);
    }

    pub(crate) fn take_alert(&mut self) -> Option<Position> {
        self.alert.take()
    }
}

/// Happiness lives in [-1, 1]; NaN reads as neutral.
pub fn clamp_happiness(level: f64) -> f64 {
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(-1.0, 1.0)
}

/// The inventory of agents.
#[derive(Debug, Default)]
pub struct Registry {
    slots: SlotMap<AgentKey, AgentRecord>,
    order: BTreeMap<AgentId, AgentKey>,
    next_id: u64,
    retired: Vec<AgentId>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: BTreeMap::new(),
            next_id: 1,
            retired: Vec::new(),
        }
    }

    /// Create an absent agent and return its id.
    pub fn create(&mut self, kind: AgentKind, attrs: AgentAttrs) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        let key = self.slots.insert(AgentRecord::new(id, kind, attrs));
        self.order.insert(id, key);
        id
    }

    /// Slot handle for `id`, if it has not been erased.
    pub fn key(&self, id: AgentId) -> Option<AgentKey> {
        self.order.get(&id).copied()
    }

    /// Look up a record by slot handle. Fails for erased slots.
    pub fn by_key(&self, key: AgentKey) -> Option<&AgentRecord> {
        self.slots.get(key)
    }

    pub fn record(&self, id: AgentId) -> Option<&AgentRecord> {
        self.slots.get(self.key(id)?)
    }

    pub(crate) fn record_mut(&mut self, id: AgentId) -> Option<&mut AgentRecord> {
        let key = self.key(id)?;
        self.slots.get_mut(key)
    }

    pub fn get(&self, id: AgentId) -> Option<AgentView> {
        self.record(id).map(AgentRecord::view)
    }

    pub fn is_present(&self, id: AgentId) -> bool {
        self.record(id).map_or(false, AgentRecord::is_present)
    }

    /// Every listed agent matching `query`, present or absent.
    pub fn get_all(&self, query: KindQuery) -> Vec<AgentView> {
        self.records(query)
            .filter(|r| !r.is_retired())
            .map(AgentRecord::view)
            .collect()
    }

    /// Present agents matching `query`.
    pub fn get_all_present(&self, query: KindQuery) -> Vec<AgentView> {
        self.records(query)
            .filter(|r| r.is_present())
            .map(AgentRecord::view)
            .collect()
    }

    /// Listed agents matching `query` whose name is exactly `name`.
    pub fn get_by_name(&self, query: KindQuery, name: &str) -> Vec<AgentView> {
        self.records(query)
            .filter(|r| !r.is_retired() && r.name() == name)
            .map(AgentRecord::view)
            .collect()
    }

    /// Ids of present agents matching `query`.
    pub fn present_ids(&self, query: KindQuery) -> Vec<AgentId> {
        self.records(query)
            .filter(|r| r.is_present())
            .map(AgentRecord::id)
            .collect()
    }

    /// Ids of every listed agent matching `query`.
    pub fn listed_ids(&self, query: KindQuery) -> Vec<AgentId> {
        self.records(query)
            .filter(|r| !r.is_retired())
            .map(AgentRecord::id)
            .collect()
    }

    /// Present agents other than `id`, as discs.
    pub fn present_footprints_except(&self, id: AgentId) -> impl Iterator<Item = (AgentId, Footprint)> + '_ {
        self.records(KindQuery::Any)
            .filter(move |r| r.is_present() && r.id() != id)
            .map(|r| (r.id(), r.footprint()))
    }

    /// Present agents per kind.
    pub fn census(&self) -> Headcount {
        let mut census = Headcount::default();
        for record in self.records(KindQuery::Any).filter(|r| r.is_present()) {
            census.add(record.kind());
        }
        census
    }

    /// Number of listed (non-retired) agents.
    pub fn len(&self) -> usize {
        self.order.len() - self.retired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark an agent absent.
    pub(crate) fn set_presence(&mut self, id: AgentId, presence: Presence) -> Option<AgentView> {
        let record = self.record_mut(id)?;
        if record.is_retired() {
            return None;
        }
        record.set_presence(presence);
        Some(record.view())
    }

    /// Retire an agent: it leaves, drops out of every listing and is
    /// erased on the next [`erase_retired`](Self::erase_retired).
    ///
    /// Returns the agent as it was just before retirement, or `None` if it
    /// is unknown or already retired.
    pub fn remove(&mut self, id: AgentId) -> Option<AgentView> {
        let record = self.record_mut(id)?;
        if record.is_retired() {
            return None;
        }
        let before = record.view();
        record.set_presence(Presence::Retired);
        self.retired.push(id);
        Some(before)
    }

    /// Retire every listed agent.
    pub fn clear(&mut self) -> Vec<AgentView> {
        let ids: Vec<AgentId> = self.listed_ids(KindQuery::Any);
        ids.into_iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Ids retired but not yet erased.
    pub fn pending_erasure(&self) -> &[AgentId] {
        &self.retired
    }

    /// Free the slots of all retired agents. Returns the erased ids.
    pub fn erase_retired(&mut self) -> Vec<AgentId> {
        let erased = std::mem::take(&mut self.retired);
        for id in &erased {
            if let Some(key) = self.order.remove(id) {
                self.slots.remove(key);
            }
        }
        erased
    }

    fn records(&self, query: KindQuery) -> impl Iterator<Item = &AgentRecord> + '_ {
        self.order
            .values()
            .filter_map(move |key| self.slots.get(*key))
            .filter(move |r| query.matches(r.kind()))
    }
}
