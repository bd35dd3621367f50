//! The world: grid plus rules, advanced one step at a time.
//!
//! ## Step pipeline
//!
//! ```text
//! actions ─► compile(grid, baseline) ─► collect_requests ─► resolve ─► evaluate
//! ```
//!
//! The ruleset is compiled once at the start of each step and stays fixed
//! for that step: movement and the outcome check both read it. Tokens
//! pushed during the step take effect on the next one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Actions, Entity, EntityId, Property};
use crate::error::Result;
use crate::grid::Grid;
use crate::movement::{collect_requests, resolve, MoveReport};
use crate::outcome::{evaluate, Outcome};
use crate::rules::{compile, has_property, Resolver, Ruleset};

/// Result of one world step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub outcome: Outcome,

    /// Whether any entity changed cell.
    pub moved: bool,

    /// Details of the movement pass.
    pub report: MoveReport,
}

/// A grid and the rules governing it.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Action, Actions, Noun, ObjectKind, Pos, Property};
/// use rust_ruleblocks::grid::Grid;
/// use rust_ruleblocks::outcome::Outcome;
/// use rust_ruleblocks::rules::Ruleset;
/// use rust_ruleblocks::world::World;
///
/// let mut grid = Grid::new(5, 5).unwrap();
/// grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(1, 1)).unwrap();
/// grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(2, 1)).unwrap();
///
/// let baseline = Ruleset::new()
///     .with(Noun::Baba, Property::Agent)
///     .with(Noun::Ball, Property::Goal);
/// let mut world = World::new(grid, baseline);
///
/// let result = world.step(&Actions::all(Action::Right)).unwrap();
/// assert!(result.moved);
/// assert_eq!(result.outcome, Outcome::Win);
/// ```
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    baseline: Ruleset,
    ruleset: Ruleset,
}

impl World {
    /// Create a world. The ruleset is compiled right away.
    #[must_use]
    pub fn new(grid: Grid, baseline: Ruleset) -> Self {
        let ruleset = compile(&grid, &baseline);
        Self {
            grid,
            baseline,
            ruleset,
        }
    }

    /// Advance one step.
    pub fn step(&mut self, actions: &Actions) -> Result<StepResult> {
        self.ruleset = compile(&self.grid, &self.baseline);
        let resolver = Resolver::new(&self.ruleset);

        let requests = collect_requests(&self.grid, &resolver, actions);
        let report = resolve(&mut self.grid, &resolver, &requests)?;
        let outcome = evaluate(&self.grid, &self.ruleset);

        debug!(
            rules = self.ruleset.len(),
            requests = requests.len(),
            moved = report.moved.len(),
            %outcome,
            "world step"
        );

        Ok(StepResult {
            outcome,
            moved: report.any_moved(),
            report,
        })
    }

    /// Ruleset compiled at the start of the last step (or at construction).
    #[must_use]
    pub fn current_ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Rules in force regardless of tokens.
    #[must_use]
    pub fn baseline(&self) -> &Ruleset {
        &self.baseline
    }

    /// Recompile the ruleset from the current grid.
    ///
    /// Only needed after editing the grid through `grid_mut` when the fresh
    /// ruleset is wanted before the next step.
    pub fn recompile(&mut self) -> &Ruleset {
        self.ruleset = compile(&self.grid, &self.baseline);
        &self.ruleset
    }

    /// Check whether an entity holds `property` under the current ruleset.
    ///
    /// Returns false for entities that aren't on the grid.
    #[must_use]
    pub fn has_property(&self, entity: EntityId, property: Property) -> bool {
        self.grid
            .entity(entity)
            .is_some_and(|e| has_property(e, property, &self.ruleset))
    }

    /// Check whether an entity record holds `property` under the current ruleset.
    #[must_use]
    pub fn entity_has_property(&self, entity: &Entity, property: Property) -> bool {
        has_property(entity, property, &self.ruleset)
    }

    /// Outcome of the grid as it stands.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.grid, &self.ruleset)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Entities holding `property`, in grid order.
    #[must_use]
    pub fn entities_with(&self, property: Property) -> Vec<EntityId> {
        self.grid
            .iter()
            .filter(|(_, e)| has_property(e, property, &self.ruleset))
            .map(|(id, _)| id)
            .collect()
    }
}
