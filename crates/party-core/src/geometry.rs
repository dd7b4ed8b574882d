//! Geometry between circular agents.
//!
//! Every agent occupies a disc of diameter `size` centred on its position.
//! Most behaviour is driven by the distance between the edges of two
//! discs: negative when they overlap, zero when they touch.

use crate::types::{Displacement, Position};
use serde::{Deserialize, Serialize};

/// The disc an agent occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub position: Position,
    pub size: f64,
}

impl Footprint {
    pub fn new(position: Position, size: f64) -> Self {
        Self { position, size }
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// The same disc after being displaced.
    pub fn moved_by(&self, displacement: Displacement) -> Self {
        Self::new(self.position.offset(displacement), self.size)
    }
}

/// Distances from one agent to another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distances {
    /// Euclidean distance between centres.
    pub center: f64,
    /// `b.x - a.x`
    pub dx: f64,
    /// `b.y - a.y`
    pub dy: f64,
    /// Distance between the circumferences, negative on overlap.
    pub edge: f64,
}

impl Distances {
    /// The displacement that would carry `a` onto `b`'s centre.
    pub fn toward(&self) -> Displacement {
        Displacement::new(self.dx, self.dy)
    }
}

/// Distances from `a` to `b`.
pub fn distances(a: &Footprint, b: &Footprint) -> Distances {
    let dx = b.position.x - a.position.x;
    let dy = b.position.y - a.position.y;
    let center = (dx * dx + dy * dy).sqrt();
    Distances {
        center,
        dx,
        dy,
        edge: center - (a.radius() + b.radius()),
    }
}

/// Edge distance between `a` and `b`.
pub fn edge_distance(a: &Footprint, b: &Footprint) -> f64 {
    distances(a, b).edge
}

/// Edge distance between `a` and `b` once `a` has been displaced.
pub fn edge_distance_after_move(a: &Footprint, b: &Footprint, displacement: Displacement) -> f64 {
    edge_distance(&a.moved_by(displacement), b)
}

/// True when the edges of `a` and `b` are within `epsilon` of each other,
/// or the discs overlap.
pub fn is_near(a: &Footprint, b: &Footprint, epsilon: f64) -> bool {
    edge_distance(a, b) <= epsilon
}

/// Scale `requested` down to `limit` while preserving its direction.
///
/// Displacements already within the limit, and a `None` limit, are
/// returned unchanged.
pub fn clamp_displacement(requested: Displacement, limit: Option<f64>) -> Displacement {
    let Some(limit) = limit else {
        return requested;
    };
    let magnitude = requested.magnitude();
    if magnitude > limit && magnitude > 0.0 {
        let scale = limit / magnitude;
        Displacement::new(requested.dx * scale, requested.dy * scale)
    } else {
        requested
    }
}
