//! Presentation hooks.
//!
//! The party does not draw anything. Whatever does (a window, a terminal,
//! a log) implements [`Presenter`] and is told about lifecycle changes once
//! per tick, after the tick has completed. A removed agent stays readable
//! until its notification has been delivered.

use crate::events::TickReport;
use party_core::types::AgentView;
use tracing::{debug, info};

/// Receives lifecycle notifications from the party.
pub trait Presenter: Send {
    /// An agent became present.
    fn arrive(&mut self, _agent: &AgentView) {}

    /// An agent stopped being present.
    fn leave(&mut self, _agent: &AgentView) {}

    /// An agent was removed and is about to be erased.
    fn remove(&mut self, _agent: &AgentView) {}

    /// A tick finished. `agents` lists every agent still at the party.
    fn tick_complete(&mut self, _report: &TickReport, _agents: &[AgentView]) {}
}

/// Ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn arrive(&mut self, agent: &AgentView) {
        debug!(id = %agent.id, kind = %agent.kind, name = %agent.name, "arrived");
    }

    fn leave(&mut self, agent: &AgentView) {
        debug!(id = %agent.id, kind = %agent.kind, "left");
    }

    fn remove(&mut self, agent: &AgentView) {
        debug!(id = %agent.id, kind = %agent.kind, "removed");
    }

    fn tick_complete(&mut self, report: &TickReport, _agents: &[AgentView]) {
        info!(
            tick = report.tick,
            normals = report.census.normals,
            zombies = report.census.zombies,
            defenders = report.census.defenders,
            moved = report.moved,
            rejected = report.rejected,
            infected = report.infected(),
            "tick complete"
        );
    }
}

/// Lifecycle notification waiting to be delivered.
#[derive(Debug, Clone)]
pub(crate) enum Notice {
    Arrive(AgentView),
    Leave(AgentView),
    Remove(AgentView),
}

impl Notice {
    pub(crate) fn deliver(&self, presenter: &mut dyn Presenter) {
        match self {
            Notice::Arrive(agent) => presenter.arrive(agent),
            Notice::Leave(agent) => presenter.leave(agent),
            Notice::Remove(agent) => presenter.remove(agent),
        }
    }
}
