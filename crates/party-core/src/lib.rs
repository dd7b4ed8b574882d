//! # Party Core
//!
//! Core traits and types for the party simulation.
//!
//! Three kinds of guest share a bounded floor: Normals, Zombies and
//! Defenders. This crate defines what they are and how they see each
//! other, without owning any of them:
//!
//! - **types** — ids, kinds, positions, arena bounds, agent snapshots
//! - **geometry** — centre and edge distances between circular agents
//! - **capability** — callers and privileged operations of the authorization layer
//! - **room** — the view of the party a policy gets during its turn
//! - **policy** — the decision function each kind plugs in
//! - **teleport** — the injected rule deciding who may teleport whom
//!
//! ## Quick Start
//!
//! ```rust
//! use party_core::prelude::*;
//!
//! let a = Footprint::new(Position::new(0.0, 0.0), 10.0);
//! let b = Footprint::new(Position::new(11.0, 0.0), 10.0);
//! assert_eq!(distances(&a, &b).edge, 1.0);
//! ```

pub mod types;
pub mod geometry;
pub mod capability;
pub mod error;
pub mod room;
pub mod policy;
pub mod teleport;
pub mod prelude;
