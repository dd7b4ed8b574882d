//! Shared types used across the kernel, the policies and the driver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest size any agent may take.
pub const MIN_SIZE: f64 = 15.0;
/// Largest size any agent may take.
pub const MAX_SIZE: f64 = 60.0;
/// Size given to agents whose kind does not pick one.
pub const DEFAULT_SIZE: f64 = 40.0;
/// Defenders are not slowed or sped up by their size.
pub const DEFENDER_MOVE_LIMIT: f64 = 10.0;
/// Edge distance at or below which a zombie infects a normal.
pub const TOUCHING_THRESHOLD: f64 = 3.0;
/// Edge distance at or below which a teleport is allowed.
pub const TELEPORT_THRESHOLD: f64 = 3.0;

/// Monotonic simulation time, in ticks.
pub type Tick = u64;

/// Unique identifier for an agent at the party.
///
/// Ids start at 1, are assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three kinds of guest. Fixed for the lifetime of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    Normal,
    Zombie,
    Defender,
}

impl AgentKind {
    /// Order in which kinds decide and move within a tick.
    ///
    /// Defenders go first so their alerts and teleports are visible to
    /// everyone deciding after them.
    pub const DECISION_ORDER: [AgentKind; 3] =
        [AgentKind::Defender, AgentKind::Normal, AgentKind::Zombie];

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Normal => "Normal",
            AgentKind::Zombie => "Zombie",
            AgentKind::Defender => "Defender",
        }
    }

    pub fn min_size(self) -> f64 {
        MIN_SIZE
    }

    pub fn max_size(self) -> f64 {
        MAX_SIZE
    }

    /// Clamp a requested size into this kind's bounds.
    pub fn clamp_size(self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min_size();
        }
        size.clamp(self.min_size(), self.max_size())
    }

    /// Maximum displacement per move for an agent of this kind at `size`.
    ///
    /// Normals are slow when small and fast when big, zombies the other way
    /// round. Both range over [5, 15].
    pub fn move_limit(self, size: f64) -> Option<f64> {
        let min = self.min_size();
        let fraction = (self.clamp_size(size) - min) / (self.max_size() - min);
        match self {
            AgentKind::Normal => Some(5.0 + 10.0 * fraction),
            AgentKind::Zombie => Some(15.0 - 10.0 * fraction),
            AgentKind::Defender => Some(DEFENDER_MOVE_LIMIT),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind filter for registry queries.
///
/// `Any` is the base kind: it matches every agent regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KindQuery {
    #[default]
    Any,
    Only(AgentKind),
}

impl KindQuery {
    pub fn matches(self, kind: AgentKind) -> bool {
        match self {
            KindQuery::Any => true,
            KindQuery::Only(k) => k == kind,
        }
    }
}

impl From<AgentKind> for KindQuery {
    fn from(kind: AgentKind) -> Self {
        KindQuery::Only(kind)
    }
}

/// A position on the party floor.
///
/// (0,0) is the top left corner; x grows to the right and y downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn offset(&self, displacement: Displacement) -> Position {
        Position::new(self.x + displacement.dx, self.y + displacement.dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A requested or applied change of position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Displacement that takes `from` onto `to`.
    pub fn between(from: Position, to: Position) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    pub fn reversed(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

/// Rectangular arena the party takes place in, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn diagonal(&self) -> f64 {
        (self.width().powi(2) + self.height().powi(2)).sqrt()
    }

    pub fn contains(&self, position: &Position) -> bool {
        position.x >= self.x_min
            && position.x <= self.x_max
            && position.y >= self.y_min
            && position.y <= self.y_max
    }

    /// Top left corner.
    pub fn min_corner(&self) -> Position {
        Position::new(self.x_min, self.y_min)
    }

    /// Bottom right corner.
    pub fn max_corner(&self) -> Position {
        Position::new(self.x_max, self.y_max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 800.0, 600.0)
    }
}

/// Attributes an agent is created with.
///
/// Size and happiness are clamped on creation, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAttrs {
    pub name: Option<String>,
    pub position: Position,
    pub size: f64,
    pub happiness: f64,
}

impl AgentAttrs {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn sized(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn feeling(mut self, happiness: f64) -> Self {
        self.happiness = happiness;
        self
    }
}

impl Default for AgentAttrs {
    fn default() -> Self {
        Self {
            name: None,
            position: Position::default(),
            size: DEFAULT_SIZE,
            happiness: 0.5,
        }
    }
}

/// Read-only copy of an agent's state, handed to policies and presenters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub name: String,
    pub kind: AgentKind,
    pub position: Position,
    pub size: f64,
    pub happiness: f64,
    pub move_limit: Option<f64>,
    pub present: bool,
}

impl AgentView {
    pub fn footprint(&self) -> crate::geometry::Footprint {
        crate::geometry::Footprint::new(self.position, self.size)
    }

    /// Distances from this agent to `other`.
    pub fn distances_to(&self, other: &AgentView) -> crate::geometry::Distances {
        crate::geometry::distances(&self.footprint(), &other.footprint())
    }
}

/// Number of agents per kind.
///
/// Kinds missing from a serialized headcount take their value from
/// [`Headcount::standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default = "Headcount::standard")]
pub struct Headcount {
    pub normals: usize,
    pub zombies: usize,
    pub defenders: usize,
}

impl Headcount {
    pub fn new(normals: usize, zombies: usize, defenders: usize) -> Self {
        Self { normals, zombies, defenders }
    }

    /// The usual guest list: 10 normals, 5 zombies, 3 defenders.
    pub fn standard() -> Self {
        Self::new(10, 5, 3)
    }

    pub fn of(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::Normal => self.normals,
            AgentKind::Zombie => self.zombies,
            AgentKind::Defender => self.defenders,
        }
    }

    pub fn add(&mut self, kind: AgentKind) {
        match kind {
            AgentKind::Normal => self.normals += 1,
            AgentKind::Zombie => self.zombies += 1,
            AgentKind::Defender => self.defenders += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.normals + self.zombies + self.defenders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_limit_spans_five_to_fifteen() {
        assert_eq!(AgentKind::Normal.move_limit(MIN_SIZE), Some(5.0));
        assert_eq!(AgentKind::Normal.move_limit(MAX_SIZE), Some(15.0));
        assert_eq!(AgentKind::Zombie.move_limit(MIN_SIZE), Some(15.0));
        assert_eq!(AgentKind::Zombie.move_limit(MAX_SIZE), Some(5.0));
        assert_eq!(AgentKind::Defender.move_limit(MIN_SIZE), Some(DEFENDER_MOVE_LIMIT));
        assert_eq!(AgentKind::Defender.move_limit(MAX_SIZE), Some(DEFENDER_MOVE_LIMIT));
    }

    #[test]
    fn clamp_size_handles_out_of_range_and_nan() {
        assert_eq!(AgentKind::Zombie.clamp_size(1.0), MIN_SIZE);
        assert_eq!(AgentKind::Zombie.clamp_size(1000.0), MAX_SIZE);
        assert_eq!(AgentKind::Normal.clamp_size(f64::NAN), MIN_SIZE);
        assert_eq!(AgentKind::Defender.clamp_size(33.0), 33.0);
    }

    #[test]
    fn any_query_matches_every_kind() {
        for kind in AgentKind::DECISION_ORDER {
            assert!(KindQuery::Any.matches(kind));
            assert!(KindQuery::from(kind).matches(kind));
        }
        assert!(!KindQuery::Only(AgentKind::Normal).matches(AgentKind::Zombie));
    }

    #[test]
    fn bounds_contain_their_corners() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 50.0);
        assert!(bounds.contains(&bounds.min_corner()));
        assert!(bounds.contains(&bounds.max_corner()));
        assert!(!bounds.contains(&Position::new(101.0, 10.0)));
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(bounds.height(), 50.0);
    }

    #[test]
    fn agent_id_displays_with_hash() {
        assert_eq!(AgentId(7).to_string(), "#7");
    }
}
