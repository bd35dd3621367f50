//! Move-object puzzle: push the drawn object onto the door.
//!
//! The grid carries `baba is you` and `<object> is push`, where the object
//! is drawn from the level's list each episode. Every listed object is
//! placed in the middle of the grid. The door has no properties of its
//! own; the level succeeds once the pushable object sits on top of it.

use tracing::trace;

use super::builder::{bordered_grid, place_anywhere, place_random, put_rule};
use super::Level;
use crate::core::{Entity, GridRng, Noun, ObjectKind, Pos, Property, Registry};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::rules::Ruleset;

const AGENT_RULE: [Pos; 3] = [Pos::new(1, 1), Pos::new(2, 1), Pos::new(3, 1)];
const PUSH_RULE: [Pos; 3] = [Pos::new(1, 2), Pos::new(2, 2), Pos::new(3, 2)];

/// Top-left corner of the object placement area.
const OBJECT_AREA: Pos = Pos::new(2, 2);

const DOOR: ObjectKind = ObjectKind::Object(Noun::Door);

/// Where the door goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalPlacement {
    /// Any free cell, drawn each episode.
    Random,
    Fixed(Pos),
}

/// Push the drawn object onto the door.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveObj {
    size: i32,
    objects: Vec<Noun>,
    goal: GoalPlacement,
}

impl MoveObj {
    /// Default side length.
    pub const DEFAULT_SIZE: i32 = 7;

    /// Create the level with a single ball and a random door.
    #[must_use]
    pub fn new(size: i32) -> Self {
        Self {
            size,
            objects: vec![Noun::Ball],
            goal: GoalPlacement::Random,
        }
    }

    /// Objects to place. One of them is drawn as the pushable one.
    #[must_use]
    pub fn with_objects(mut self, objects: Vec<Noun>) -> Self {
        self.objects = objects;
        self
    }

    /// Objects given by name, e.g. `["fball", "wall"]`.
    pub fn with_object_names(self, names: &[&str]) -> Result<Self> {
        let registry = Registry::standard();
        let objects = names
            .iter()
            .map(|name| registry.noun(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_objects(objects))
    }

    /// Put the door at `pos` every episode.
    #[must_use]
    pub fn with_goal_pos(mut self, pos: Pos) -> Self {
        self.goal = GoalPlacement::Fixed(pos);
        self
    }

    #[must_use]
    pub fn objects(&self) -> &[Noun] {
        &self.objects
    }

    #[must_use]
    pub fn goal(&self) -> GoalPlacement {
        self.goal
    }

    fn object_area(&self) -> (i32, i32) {
        (self.size - 4, self.size - 4)
    }
}

impl Default for MoveObj {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl Level for MoveObj {
    fn name(&self) -> &'static str {
        "move-obj"
    }

    fn size(&self) -> (i32, i32) {
        (self.size, self.size)
    }

    fn validate(&self) -> Result<()> {
        if self.size < 6 {
            return Err(Error::InvalidConfig(format!(
                "move-obj needs size >= 6, got {}",
                self.size
            )));
        }
        if self.objects.is_empty() {
            return Err(Error::InvalidConfig("move-obj needs at least one object".into()));
        }
        if let Some(noun) = self.objects.iter().find(|n| matches!(n, Noun::Door | Noun::Baba)) {
            return Err(Error::InvalidConfig(format!("{} can't be the object to move", noun)));
        }
        if let GoalPlacement::Fixed(pos) = self.goal {
            let inside = (1..self.size - 1).contains(&pos.x) && (1..self.size - 1).contains(&pos.y);
            if !inside || AGENT_RULE.contains(&pos) || PUSH_RULE.contains(&pos) {
                return Err(Error::InvalidConfig(format!("goal {} is not a free cell", pos)));
            }
        }
        Ok(())
    }

    fn generate(&self, rng: &mut GridRng) -> Result<Grid> {
        let mut grid = bordered_grid(self.size, self.size)?;
        let mut rules_rng = rng.for_context("rules");
        let mut objects_rng = rng.for_context("objects");

        let target = *rules_rng
            .choose(&self.objects)
            .ok_or_else(|| Error::InvalidConfig("no objects to draw from".into()))?;
        put_rule(&mut grid, Noun::Baba, Property::Agent, AGENT_RULE, false)?;
        put_rule(&mut grid, target, Property::Push, PUSH_RULE, false)?;

        let door = match self.goal {
            GoalPlacement::Random => {
                place_anywhere(&mut grid, &mut objects_rng, Entity::new(DOOR, Pos::default()))?
            }
            GoalPlacement::Fixed(pos) => grid.put_kind(DOOR, pos)?,
        };

        for &noun in &self.objects {
            let object = Entity::new(noun.into(), Pos::default());
            place_random(&mut grid, &mut objects_rng, object, OBJECT_AREA, self.object_area())?;
        }
        place_anywhere(&mut grid, &mut objects_rng, Entity::new(Noun::Baba.into(), Pos::default()))?;

        trace!(object = %target, door = %door, "move-obj generated");
        Ok(grid)
    }

    fn goal_reached(&self, grid: &Grid, ruleset: &Ruleset) -> bool {
        grid.iter()
            .filter(|(_, e)| e.kind == DOOR)
            .filter_map(|(_, door)| grid.top_at(door.pos))
            .any(|top| match top.kind {
                ObjectKind::Object(noun) => {
                    self.objects.contains(&noun) && ruleset.get(Property::Push, top.kind)
                }
                _ => false,
            })
    }
}
