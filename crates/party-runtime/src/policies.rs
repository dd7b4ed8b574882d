//! The set of decision policies a party runs with, one per kind.

use party_agents::{DefenderPolicy, NormalPolicy, ZombiePolicy};
use party_core::error::{PartyError, Result};
use party_core::policy::{Idle, Policy};
use party_core::types::AgentKind;

/// One policy for each agent kind.
pub struct Policies {
    normal: Box<dyn Policy>,
    zombie: Box<dyn Policy>,
    defender: Box<dyn Policy>,
}

impl std::fmt::Debug for Policies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Policies")
            .field("normal", &self.normal.name())
            .field("zombie", &self.zombie.name())
            .field("defender", &self.defender.name())
            .finish()
    }
}

impl Default for Policies {
    fn default() -> Self {
        Self::standard()
    }
}

impl Policies {
    /// Build from three policies. Each must drive the kind of its slot.
    pub fn new(
        normal: Box<dyn Policy>,
        zombie: Box<dyn Policy>,
        defender: Box<dyn Policy>,
    ) -> Result<Self> {
        for (slot, policy) in [
            (AgentKind::Normal, &normal),
            (AgentKind::Zombie, &zombie),
            (AgentKind::Defender, &defender),
        ] {
            if policy.kind() != slot {
                return Err(PartyError::invalid_config(
                    "policies",
                    format!("policy `{}` drives {}, not {}", policy.name(), policy.kind(), slot),
                ));
            }
        }
        Ok(Self { normal, zombie, defender })
    }

    /// The reference behaviour: normals flee, zombies chase, defenders
    /// throw zombies out.
    pub fn standard() -> Self {
        Self {
            normal: Box::new(NormalPolicy::new()),
            zombie: Box::new(ZombiePolicy::new()),
            defender: Box::new(DefenderPolicy::new()),
        }
    }

    /// Nobody moves.
    pub fn idle() -> Self {
        Self {
            normal: Box::new(Idle(AgentKind::Normal)),
            zombie: Box::new(Idle(AgentKind::Zombie)),
            defender: Box::new(Idle(AgentKind::Defender)),
        }
    }

    /// Swap in `policy` for the kind it drives.
    pub fn with(mut self, policy: Box<dyn Policy>) -> Self {
        let kind = policy.kind();
        *self.slot_mut(kind) = policy;
        self
    }

    pub fn get(&self, kind: AgentKind) -> &dyn Policy {
        match kind {
            AgentKind::Normal => self.normal.as_ref(),
            AgentKind::Zombie => self.zombie.as_ref(),
            AgentKind::Defender => self.defender.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: AgentKind) -> &mut dyn Policy {
        self.slot_mut(kind).as_mut()
    }

    fn slot_mut(&mut self, kind: AgentKind) -> &mut Box<dyn Policy> {
        match kind {
            AgentKind::Normal => &mut self.normal,
            AgentKind::Zombie => &mut self.zombie,
            AgentKind::Defender => &mut self.defender,
        }
    }
}
