//! # Party
//!
//! A discrete-tick zombie party.
//!
//! Normals, zombies and defenders move around a bounded floor. Agents
//! never overlap, zombies turn the normals they touch, and defenders
//! teleport zombies out of the way. Who may change what about whom is
//! checked by a capability layer on every privileged call.
//!
//! ## Quick Start
//!
//! ```rust
//! use party::prelude::*;
//!
//! // A party with the standard policies
//! let mut party = Party::from_config(PartyConfig::default().with_seed(7)).unwrap();
//!
//! // Invite the guests
//! party.init(Headcount::new(10, 5, 3), Bounds::new(0.0, 0.0, 800.0, 600.0)).unwrap();
//!
//! // Run the simulation
//! for report in party.run(50).unwrap() {
//!     if report.infected() > 0 {
//!         println!("tick {}: {} infected", report.tick, report.infected());
//!     }
//! }
//!
//! let census = party.census();
//! println!("{} normals left", census.normals);
//! ```
//!
//! ## Architecture
//!
//! - [`party_core`] - Shared types, geometry, errors, the `Room` and `Policy` traits
//! - [`party_agents`] - Reference policies (Normal, Zombie, Defender)
//! - [`party_runtime`] - Registry, resolver, scheduler and driver surface
//!
//! ## Key Concepts
//!
//! ### Tick phases
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | Decision | Defenders, then normals, then zombies pick a move |
//! | Apply | Moves are clamped to the move limit; overlapping moves are rejected |
//! | Infection | Zombies turn every normal within touching distance |
//! | Publish | The presenter hears about arrivals, departures and removals |
//!
//! ### Custom teleport rules
//!
//! ```rust
//! use party::prelude::*;
//!
//! let party = PartyBuilder::new()
//!     .with_teleport_rule(|by: AgentKind, target: AgentKind| by == target)
//!     .build()
//!     .unwrap();
//! assert_eq!(party.tick(), 0);
//! ```

// Re-export all subcrates
pub use party_core as core;
pub use party_runtime as runtime;
pub use party_agents as agents;

/// Prelude module for convenient imports.
///
/// ```rust
/// use party::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use party_core::types::{
        AgentId, AgentKind, KindQuery,
        Position, Displacement, Bounds,
        AgentAttrs, AgentView, Headcount,
        Tick,
        MIN_SIZE, MAX_SIZE, DEFAULT_SIZE,
        TOUCHING_THRESHOLD, TELEPORT_THRESHOLD,
    };

    // Geometry and capabilities
    pub use party_core::geometry::{distances, edge_distance, Distances, Footprint};
    pub use party_core::capability::{Caller, PrivilegedOp};

    // Core traits
    pub use party_core::policy::Policy;
    pub use party_core::room::Room;
    pub use party_core::teleport::{DefendersTeleportZombies, NoTeleports, TeleportRule};

    // Error types
    pub use party_core::error::{AuthorizationViolation, PartyError, Result};

    // Agents
    pub use party_agents::{DefenderPolicy, NormalPolicy, ZombiePolicy};

    // Runtime
    pub use party_runtime::party::{Party, PartySnapshot, PartyStats};
    pub use party_runtime::party_builder::PartyBuilder;
    pub use party_runtime::config::PartyConfig;
    pub use party_runtime::events::{Infection, PartyEvent, TickReport};
    pub use party_runtime::policies::Policies;
    pub use party_runtime::presentation::{LogPresenter, NullPresenter, Presenter};
    pub use party_runtime::resolver::MoveOutcome;
}
