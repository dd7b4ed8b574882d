//! Party Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use party_core::prelude::*;
//! ```

pub use crate::types::{
    AgentId, AgentKind, KindQuery,
    Position, Displacement, Bounds,
    AgentAttrs, AgentView, Headcount,
    Tick,
    MIN_SIZE, MAX_SIZE, DEFAULT_SIZE, DEFENDER_MOVE_LIMIT,
    TOUCHING_THRESHOLD, TELEPORT_THRESHOLD,
};

pub use crate::geometry::{
    Footprint, Distances,
    distances, edge_distance, edge_distance_after_move, is_near, clamp_displacement,
};

pub use crate::capability::{Caller, PrivilegedOp};

pub use crate::room::Room;

pub use crate::policy::{Idle, Policy};

pub use crate::teleport::{DefendersTeleportZombies, NoTeleports, TeleportRule};

pub use crate::error::{AuthorizationViolation, PartyError, PolicyError, Result};
