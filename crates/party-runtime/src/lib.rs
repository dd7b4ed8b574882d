//! # Party Runtime
//!
//! Registry, scheduling and the driver surface.
//!
//! The runtime owns every agent. It runs the tick loop, checks each
//! privileged call against the caller's capability, and tells the
//! presentation layer what changed once each tick is over.

pub mod capability;
pub mod config;
pub mod events;
pub mod party;
pub mod party_builder;
pub mod policies;
pub mod presentation;
pub mod registry;
pub mod resolver;
pub mod turn;
pub mod prelude;
