//! Party Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use party_runtime::prelude::*;
//! ```

// Re-export party
pub use crate::party::{Party, PartySnapshot, PartyStats};

// Re-export party builder
pub use crate::party_builder::PartyBuilder;

pub use crate::config::PartyConfig;
pub use crate::events::{Infection, PartyEvent, TickReport};
pub use crate::policies::Policies;
pub use crate::presentation::{LogPresenter, NullPresenter, Presenter};
pub use crate::registry::{AgentKey, Presence};
pub use crate::resolver::MoveOutcome;

// Re-export from agents
pub use party_agents::prelude::*;
