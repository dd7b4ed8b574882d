//! Party Agents Prelude — convenient imports for common usage.
//!
//! ```rust
//! use party_agents::prelude::*;
//! ```

// Re-export policy types
pub use crate::defender::DefenderPolicy;
pub use crate::normal::NormalPolicy;
pub use crate::zombie::ZombiePolicy;

// Re-export from core
pub use party_core::prelude::*;
