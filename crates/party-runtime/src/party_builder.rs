//! Party builder.
//!
//! The teleport rule and the presenter are fixed when the party is built;
//! neither can be swapped afterwards.
//!
//! # Example
//!
//! ```rust
//! use party_runtime::prelude::*;
//!
//! let mut party = PartyBuilder::new()
//!     .with_config(PartyConfig::default().with_seed(7))
//!     .with_teleport_rule(|by: AgentKind, target: AgentKind| {
//!         by == AgentKind::Defender && target != AgentKind::Defender
//!     })
//!     .with_presenter(LogPresenter)
//!     .build()
//!     .unwrap();
//!
//! party.reset().unwrap();
//! party.run(10).unwrap();
//! ```

use crate::config::PartyConfig;
use crate::party::Party;
use crate::policies::Policies;
use crate::presentation::{NullPresenter, Presenter};
use party_core::error::Result;
use party_core::policy::Policy;
use party_core::teleport::{DefendersTeleportZombies, TeleportRule};
use std::sync::Arc;

/// Builder for [`Party`].
pub struct PartyBuilder {
    config: PartyConfig,
    rule: Arc<dyn TeleportRule>,
    policies: Policies,
    presenter: Box<dyn Presenter>,
}

impl Default for PartyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyBuilder {
    /// Default configuration, standard policies, defenders teleport
    /// zombies, no presenter.
    pub fn new() -> Self {
        Self {
            config: PartyConfig::default(),
            rule: Arc::new(DefendersTeleportZombies),
            policies: Policies::standard(),
            presenter: Box::new(NullPresenter),
        }
    }

    pub fn with_config(mut self, config: PartyConfig) -> Self {
        self.config = config;
        self
    }

    /// Set which kind may teleport which.
    pub fn with_teleport_rule(mut self, rule: impl TeleportRule + 'static) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    pub fn with_policies(mut self, policies: Policies) -> Self {
        self.policies = policies;
        self
    }

    /// Replace the policy for the kind `policy` drives.
    pub fn with_policy(mut self, policy: impl Policy + 'static) -> Self {
        self.policies = self.policies.with(Box::new(policy));
        self
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    /// Validate the configuration and build an empty party.
    pub fn build(self) -> Result<Party> {
        self.config.validate()?;
        Ok(Party::assemble(self.config, self.rule, self.policies, self.presenter))
    }
}
