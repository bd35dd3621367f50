//! Entity identification and placed-object data.
//!
//! Every object on the grid (concrete objects and rule tokens alike) is an
//! `Entity` with a unique `EntityId`.
//!
//! ## ID Layout
//!
//! IDs are allocated by the grid in placement order, starting at 0.
//! They are never reused within an episode, so ordering by ID is ordering
//! by placement.
//!
//! ## Usage
//!
//! ```
//! use rust_ruleblocks::core::{Entity, EntityId, Direction, Noun, ObjectKind, Pos};
//!
//! let ball = Entity::new(ObjectKind::Object(Noun::Ball), Pos::new(2, 3));
//! assert_eq!(ball.facing, Direction::Right);
//! assert!(!ball.anchored);
//!
//! assert_eq!(format!("{}", EntityId(7)), "Entity(7)");
//! ```

use serde::{Deserialize, Serialize};

use super::kind::{Color, ObjectKind};
use super::position::{Direction, Pos};

/// Unique identifier for a placed entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// A placed object.
///
/// Pure data: what the entity *can do* is never stored here. Behavior is
/// looked up through the current ruleset at query time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Object kind (concrete noun or rule token).
    pub kind: ObjectKind,

    /// Display color.
    pub color: Color,

    /// Facing direction. Self-moving entities advance along it.
    pub facing: Direction,

    /// Current cell.
    pub pos: Pos,

    /// Anchored entities are never displaced by a push or a pull.
    ///
    /// Used for rule tokens that must stay in place.
    pub anchored: bool,
}

impl Entity {
    /// Create an entity with the kind's default color, facing right.
    #[must_use]
    pub fn new(kind: ObjectKind, pos: Pos) -> Self {
        Self {
            kind,
            color: kind.default_color(),
            facing: Direction::Right,
            pos,
            anchored: false,
        }
    }

    /// Set the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the facing direction.
    #[must_use]
    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Anchor the entity in place.
    #[must_use]
    pub fn anchored(mut self) -> Self {
        self.anchored = true;
        self
    }

    /// Check if this entity is a rule token.
    #[must_use]
    pub fn is_rule_token(&self) -> bool {
        self.kind.is_rule_token()
    }
}
