//! Party configuration.

use party_core::error::{PartyError, Result};
use party_core::types::*;
use serde::{Deserialize, Serialize};

/// Tunable parameters of a party.
///
/// Every field has a default, so a partial TOML table is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyConfig {
    /// Seed of the shared random source (default: 42).
    pub seed: u64,
    /// Edge distance at or below which a zombie infects a normal (default: 3).
    pub touching_threshold: f64,
    /// Edge distance at or below which a teleport is allowed (default: 3).
    pub teleport_threshold: f64,
    /// Extra placement attempts per guest before it stays absent (default: 3).
    pub placement_retries: usize,
    /// Events kept in the history; older ones are dropped (default: 10000).
    pub history_limit: usize,
    /// Arena the guests are placed in (default: 0,0 to 800,600).
    pub bounds: Bounds,
    /// Guests created by `init` (default: 10 normals, 5 zombies, 3 defenders).
    pub headcount: Headcount,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            touching_threshold: TOUCHING_THRESHOLD,
            teleport_threshold: TELEPORT_THRESHOLD,
            placement_retries: 3,
            history_limit: 10_000,
            bounds: Bounds::default(),
            headcount: Headcount::standard(),
        }
    }
}

impl PartyConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_headcount(mut self, headcount: Headcount) -> Self {
        self.headcount = headcount;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Check that the configuration describes a runnable party.
    pub fn validate(&self) -> Result<()> {
        validate_bounds(&self.bounds)?;
        for (field, value) in [
            ("touching_threshold", self.touching_threshold),
            ("teleport_threshold", self.teleport_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PartyError::invalid_config(field, "must be a non-negative number"));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_bounds(bounds: &Bounds) -> Result<()> {
    let corners = [bounds.x_min, bounds.y_min, bounds.x_max, bounds.y_max];
    if corners.iter().any(|c| !c.is_finite()) {
        return Err(PartyError::invalid_config("bounds", "corners must be finite"));
    }
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Err(PartyError::invalid_config("bounds", "arena must have a positive area"));
    }
    Ok(())
}
