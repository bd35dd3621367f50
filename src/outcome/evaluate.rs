//! Win/lose detection over the settled grid.
//!
//! A cell decides the outcome when it holds an agent together with a
//! `defeat` or `goal` entity; an entity counts as sharing a cell with
//! itself. Defeat is checked across the whole grid before goal, so a
//! single defeated agent loses the step even when another agent wins.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Entity, Property};
use crate::grid::Grid;
use crate::rules::{Resolver, Ruleset};

/// Result of one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing decided yet.
    #[default]
    Continue,
    /// An agent reached a goal.
    Win,
    /// An agent met a defeat entity.
    Lose,
}

impl Outcome {
    /// Check if the episode ends here.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Continue
    }

    /// Check if this is a win.
    #[must_use]
    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Outcome::Continue => "continue",
            Outcome::Win => "win",
            Outcome::Lose => "lose",
        };
        f.write_str(name)
    }
}

/// Evaluate the grid under `ruleset`.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Noun, ObjectKind, Pos, Property};
/// use rust_ruleblocks::grid::Grid;
/// use rust_ruleblocks::outcome::{evaluate, Outcome};
/// use rust_ruleblocks::rules::Ruleset;
///
/// let mut grid = Grid::new(4, 4).unwrap();
/// grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(1, 1)).unwrap();
/// grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(1, 1)).unwrap();
///
/// let ruleset = Ruleset::new()
///     .with(Noun::Baba, Property::Agent)
///     .with(Noun::Ball, Property::Goal);
/// assert_eq!(evaluate(&grid, &ruleset), Outcome::Win);
/// ```
#[must_use]
pub fn evaluate(grid: &Grid, ruleset: &Ruleset) -> Outcome {
    let resolver = Resolver::new(ruleset);
    let mut won = false;

    for pos in grid.occupied_cells() {
        let cell: Vec<&Entity> = grid.get_all(pos).collect();
        if !cell.iter().any(|e| resolver.has(e, Property::Agent)) {
            continue;
        }
        if cell.iter().any(|e| resolver.has(e, Property::Defeat)) {
            trace!(%pos, "agent defeated");
            return Outcome::Lose;
        }
        if cell.iter().any(|e| resolver.has(e, Property::Goal)) {
            trace!(%pos, "agent on goal");
            won = true;
        }
    }

    if won {
        Outcome::Win
    } else {
        Outcome::Continue
    }
}
