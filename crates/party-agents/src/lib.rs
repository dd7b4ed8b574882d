//! # Party Agents
//!
//! Reference decision policies for the three kinds of guest.
//!
//! - **Normal** — flees nearby zombies, follows defender alerts when calm
//! - **Zombie** — shrinks for speed and chases the nearest normal
//! - **Defender** — hunts zombies and teleports them out of the way
//!
//! Policies only see the party through a [`Room`](party_core::room::Room),
//! so they can be driven by any runtime.

pub mod defender;
pub mod normal;
pub mod zombie;
pub mod prelude;

#[cfg(test)]
pub(crate) mod testing;

pub use defender::DefenderPolicy;
pub use normal::NormalPolicy;
pub use zombie::ZombiePolicy;
