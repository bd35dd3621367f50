//! Step actions.
//!
//! Every agent entity receives one `Action` per step. `Actions` broadcasts a
//! default action to all agents, with optional per-entity overrides for
//! levels where several agents are driven independently.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::position::Direction;

/// One agent action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    /// Do nothing.
    #[default]
    Idle,
    /// Interact with the facing cell. Requests no movement.
    Toggle,
}

impl Action {
    /// All actions.
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Idle,
        Action::Toggle,
    ];

    /// The requested direction, if this is a movement action.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Idle | Action::Toggle => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => Action::Left,
            Direction::Right => Action::Right,
            Direction::Up => Action::Up,
            Direction::Down => Action::Down,
        }
    }
}

/// Actions for every agent in one step.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Action, Actions, EntityId};
///
/// let actions = Actions::all(Action::Left).with(EntityId(3), Action::Up);
/// assert_eq!(actions.for_entity(EntityId(0)), Action::Left);
/// assert_eq!(actions.for_entity(EntityId(3)), Action::Up);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    /// Action for agents without an override.
    pub default: Action,

    /// Per-entity overrides. Few agents per level, so a linear scan is fine.
    pub overrides: SmallVec<[(EntityId, Action); 2]>,
}

impl Actions {
    /// Broadcast one action to every agent.
    #[must_use]
    pub fn all(action: Action) -> Self {
        Self {
            default: action,
            overrides: SmallVec::new(),
        }
    }

    /// Every agent idles.
    #[must_use]
    pub fn idle() -> Self {
        Self::all(Action::Idle)
    }

    /// Override the action of one entity.
    #[must_use]
    pub fn with(mut self, entity: EntityId, action: Action) -> Self {
        self.overrides.retain(|(e, _)| *e != entity);
        self.overrides.push((entity, action));
        self
    }

    /// The action for a given agent entity.
    #[must_use]
    pub fn for_entity(&self, entity: EntityId) -> Action {
        self.overrides
            .iter()
            .find(|(e, _)| *e == entity)
            .map_or(self.default, |(_, a)| *a)
    }
}

impl From<Action> for Actions {
    fn from(action: Action) -> Self {
        Self::all(action)
    }
}

/// A recorded step with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Step number (1-based) at which the action was taken.
    pub step: u32,

    /// The actions taken.
    pub actions: Actions,

    /// Whether any entity changed position.
    pub moved: bool,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(step: u32, actions: Actions, moved: bool) -> Self {
        Self { step, actions, moved }
    }
}
