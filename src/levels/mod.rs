//! Levels: initial layouts and the rules that come with them.
//!
//! A level builds a fresh grid from a seeded RNG and may supply baseline
//! rules for puzzles that keep their rules off the grid.
//!
//! - `GoToObj`, `GoToWinObj`: reference go-to puzzles
//! - `MoveObj`: push an object onto a door
//! - `Fixture`: fixed push/pull/win-lose collision layouts
//! - `builder`: `bordered_grid`, `put_rule`, random placement

pub mod builder;
pub mod fixtures;
pub mod goto;
pub mod move_obj;

pub use builder::{
    bordered_grid, place_anywhere, place_random, put_rule, put_rule_named, rule_row,
    MAX_PLACEMENT_ATTEMPTS,
};
pub use fixtures::{Fixture, FIXTURE_SIZE};
pub use goto::{GoToObj, GoToWinObj, RuleChoice, WIN_OBJ_KINDS, WIN_OBJ_PROPERTIES};
pub use move_obj::{GoalPlacement, MoveObj};

use crate::core::GridRng;
use crate::error::Result;
use crate::grid::Grid;
use crate::rules::Ruleset;

/// A level layout.
///
/// ## Implementation Notes
///
/// - `generate` must be deterministic for a given RNG state
/// - `generate` must return a grid of exactly `size()`
/// - `baseline` is merged with the episode configuration's baseline
pub trait Level {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Grid `(width, height)`.
    fn size(&self) -> (i32, i32);

    /// Rules in force regardless of tokens on the grid.
    fn baseline(&self) -> Ruleset {
        Ruleset::new()
    }

    /// Check the level's parameters before generating.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Build a fresh grid.
    fn generate(&self, rng: &mut GridRng) -> Result<Grid>;

    /// Level-specific success after a step, checked when the rules alone
    /// don't end the episode. Counts as a win.
    fn goal_reached(&self, _grid: &Grid, _ruleset: &Ruleset) -> bool {
        false
    }
}
