//! Go-to puzzles: reach the winning object.
//!
//! - `GoToObj`: `baba is you` plus `ball is win`; walk onto the ball.
//! - `GoToWinObj`: ball and wall get a random pair of `win`/`lose`
//!   properties each episode; walk onto whichever wins.
//!
//! Both can hide their rules: nothing is written on the grid and the same
//! rules come from the baseline instead.

use tracing::trace;

use super::builder::{bordered_grid, place_anywhere, put_rule, rule_row, MAX_PLACEMENT_ATTEMPTS};
use super::Level;
use crate::core::{Entity, GridRng, Noun, ObjectKind, Pos, Property, Registry};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::rules::Ruleset;

/// Cells of the `baba is you` rule in `GoToObj`.
const AGENT_RULE: [Pos; 3] = [Pos::new(1, 1), Pos::new(2, 1), Pos::new(3, 1)];

/// Fixed goal rule cells when rule placement isn't random.
const GOAL_RULE: [Pos; 3] = [Pos::new(1, 2), Pos::new(2, 2), Pos::new(3, 2)];

const FIXED_BALL: Pos = Pos::new(4, 4);
const FIXED_AGENT: Pos = Pos::new(2, 5);

/// Walk onto the ball.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoToObj {
    size: i32,
    random_rule_pos: bool,
    random_ball_pos: bool,
    random_agent_pos: bool,
    push_rule_block: bool,
    n_balls: usize,
    show_rules: bool,
}

impl GoToObj {
    /// Default side length.
    pub const DEFAULT_SIZE: i32 = 8;

    /// Create the level with fixed positions and visible rules.
    #[must_use]
    pub fn new(size: i32) -> Self {
        Self {
            size,
            random_rule_pos: false,
            random_ball_pos: false,
            random_agent_pos: false,
            push_rule_block: false,
            n_balls: 1,
            show_rules: true,
        }
    }

    /// Place the goal rule at a random row away from the border.
    #[must_use]
    pub fn random_rule_pos(mut self) -> Self {
        self.random_rule_pos = true;
        self
    }

    /// Scatter `n_balls` balls randomly.
    #[must_use]
    pub fn random_ball_pos(mut self, n_balls: usize) -> Self {
        self.random_ball_pos = true;
        self.n_balls = n_balls;
        self
    }

    /// Place the agent randomly.
    #[must_use]
    pub fn random_agent_pos(mut self) -> Self {
        self.random_agent_pos = true;
        self
    }

    /// Let the goal rule be pushed. It's anchored otherwise.
    #[must_use]
    pub fn push_rule_block(mut self) -> Self {
        self.push_rule_block = true;
        self
    }

    /// Keep the rules off the grid and in the baseline.
    #[must_use]
    pub fn hide_rules(mut self) -> Self {
        self.show_rules = false;
        self
    }

    fn goal_rule_cells(&self, rng: &mut GridRng) -> Result<[Pos; 3]> {
        if !self.random_rule_pos {
            return Ok(GOAL_RULE);
        }

        // Center at least two cells from the edge
        let span = (self.size - 4, self.size - 4);
        if span.0 <= 0 {
            return Err(Error::InvalidConfig(format!(
                "no room for a random rule on a {0}x{0} grid",
                self.size
            )));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let cells = rule_row(rng.cell_in(Pos::new(2, 2), span));
            let collides = cells.iter().any(|c| {
                (!self.random_ball_pos && *c == FIXED_BALL) || (!self.random_agent_pos && *c == FIXED_AGENT)
            });
            if !collides {
                return Ok(cells);
            }
        }
        Err(Error::PlacementFailed {
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }
}

impl Default for GoToObj {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl Level for GoToObj {
    fn name(&self) -> &'static str {
        "goto-obj"
    }

    fn size(&self) -> (i32, i32) {
        (self.size, self.size)
    }

    fn baseline(&self) -> Ruleset {
        if self.show_rules {
            Ruleset::new()
        } else {
            Ruleset::new()
                .with(Noun::Ball, Property::Goal)
                .with(Noun::Baba, Property::Agent)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.size < 7 {
            return Err(Error::InvalidConfig(format!(
                "goto-obj needs size >= 7, got {}",
                self.size
            )));
        }
        Ok(())
    }

    fn generate(&self, rng: &mut GridRng) -> Result<Grid> {
        let mut grid = bordered_grid(self.size, self.size)?;
        let mut rules_rng = rng.for_context("rules");
        let mut objects_rng = rng.for_context("objects");

        if self.show_rules {
            put_rule(&mut grid, Noun::Baba, Property::Agent, AGENT_RULE, false)?;
            let cells = self.goal_rule_cells(&mut rules_rng)?;
            put_rule(&mut grid, Noun::Ball, Property::Goal, cells, !self.push_rule_block)?;
        }

        if self.random_ball_pos {
            for _ in 0..self.n_balls {
                place_anywhere(&mut grid, &mut objects_rng, Entity::new(Noun::Ball.into(), Pos::default()))?;
            }
        } else {
            grid.put_kind(ObjectKind::Object(Noun::Ball), FIXED_BALL)?;
        }

        if self.random_agent_pos {
            place_anywhere(&mut grid, &mut objects_rng, Entity::new(Noun::Baba.into(), Pos::default()))?;
        } else {
            grid.put_kind(ObjectKind::Object(Noun::Baba), FIXED_AGENT)?;
        }

        trace!(entities = grid.len(), "goto-obj generated");
        Ok(grid)
    }
}

/// Objects and properties encoded by `GoToWinObj::encode_rules`.
pub const WIN_OBJ_KINDS: [ObjectKind; 3] = [
    ObjectKind::Object(Noun::Ball),
    ObjectKind::Object(Noun::Wall),
    ObjectKind::Object(Noun::Baba),
];
pub const WIN_OBJ_PROPERTIES: [Property; 3] = [Property::Goal, Property::Defeat, Property::Agent];

/// Properties given to the ball and the wall for one episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleChoice {
    pub ball: Property,
    pub wall: Property,
}

impl RuleChoice {
    #[must_use]
    pub const fn new(ball: Property, wall: Property) -> Self {
        Self { ball, wall }
    }
}

/// Walk onto whichever object wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoToWinObj {
    size: i32,
    random_pos: bool,
    wall_counts: Vec<usize>,
    ball_counts: Vec<usize>,
    rules: Vec<RuleChoice>,
    show_rules: bool,
}

impl GoToWinObj {
    /// Default side length.
    pub const DEFAULT_SIZE: i32 = 6;

    /// Create the level with fixed positions, visible rules and the four
    /// win/lose combinations.
    #[must_use]
    pub fn new(size: i32) -> Self {
        Self {
            size,
            random_pos: false,
            wall_counts: vec![1],
            ball_counts: vec![1],
            rules: vec![
                RuleChoice::new(Property::Defeat, Property::Goal),
                RuleChoice::new(Property::Goal, Property::Defeat),
                RuleChoice::new(Property::Goal, Property::Goal),
                RuleChoice::new(Property::Defeat, Property::Defeat),
            ],
            show_rules: true,
        }
    }

    /// Place objects randomly.
    #[must_use]
    pub fn random_pos(mut self) -> Self {
        self.random_pos = true;
        self
    }

    /// Number of walls, drawn from `counts` each episode when random.
    #[must_use]
    pub fn with_wall_counts(mut self, counts: Vec<usize>) -> Self {
        self.wall_counts = counts;
        self
    }

    /// Number of balls, drawn from `counts` each episode when random.
    #[must_use]
    pub fn with_ball_counts(mut self, counts: Vec<usize>) -> Self {
        self.ball_counts = counts;
        self
    }

    /// Replace the rule choices.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<RuleChoice>) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the rule choices with `(ball, wall)` property names.
    pub fn with_rule_names(self, rules: &[(&str, &str)]) -> Result<Self> {
        let registry = Registry::standard();
        let parsed = rules
            .iter()
            .map(|(ball, wall)| Ok(RuleChoice::new(registry.property(ball)?, registry.property(wall)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_rules(parsed))
    }

    /// Keep the rules off the grid and in the baseline.
    ///
    /// Only valid with a single rule choice.
    #[must_use]
    pub fn hide_rules(mut self) -> Self {
        self.show_rules = false;
        self
    }

    /// Rule choices this level draws from.
    #[must_use]
    pub fn rules(&self) -> &[RuleChoice] {
        &self.rules
    }

    /// Encode a ruleset as a ball/wall/baba × goal/defeat/agent matrix.
    #[must_use]
    pub fn encode_rules(ruleset: &Ruleset) -> Vec<Vec<u8>> {
        ruleset.encode_matrix(&WIN_OBJ_KINDS, &WIN_OBJ_PROPERTIES)
    }

    fn count(rng: &mut GridRng, counts: &[usize]) -> usize {
        rng.choose(counts).copied().unwrap_or(0)
    }
}

impl Default for GoToWinObj {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl Level for GoToWinObj {
    fn name(&self) -> &'static str {
        "goto-win-obj"
    }

    fn size(&self) -> (i32, i32) {
        (self.size, self.size)
    }

    fn baseline(&self) -> Ruleset {
        match (self.show_rules, self.rules.as_slice()) {
            (false, [choice]) => Ruleset::new()
                .with(Noun::Baba, Property::Agent)
                .with(Noun::Ball, choice.ball)
                .with(Noun::Wall, choice.wall),
            _ => Ruleset::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.size < 6 {
            return Err(Error::InvalidConfig(format!(
                "goto-win-obj needs size >= 6, got {}",
                self.size
            )));
        }
        if self.rules.is_empty() {
            return Err(Error::InvalidConfig("goto-win-obj needs at least one rule choice".into()));
        }
        if !self.show_rules && self.rules.len() != 1 {
            return Err(Error::InvalidConfig(
                "hidden rules need exactly one rule choice".into(),
            ));
        }
        if self.wall_counts.is_empty() || self.ball_counts.is_empty() {
            return Err(Error::InvalidConfig("object counts can't be empty".into()));
        }
        Ok(())
    }

    fn generate(&self, rng: &mut GridRng) -> Result<Grid> {
        let mut grid = bordered_grid(self.size, self.size)?;
        let mut rules_rng = rng.for_context("rules");
        let mut objects_rng = rng.for_context("objects");

        let choice = *rules_rng
            .choose(&self.rules)
            .ok_or_else(|| Error::InvalidConfig("no rule choices".into()))?;
        trace!(ball = %choice.ball, wall = %choice.wall, "rules drawn");

        if self.show_rules {
            put_rule(&mut grid, Noun::Ball, choice.ball, rule_row(Pos::new(2, 1)), false)?;
            put_rule(&mut grid, Noun::Wall, choice.wall, rule_row(Pos::new(2, 2)), false)?;
            put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(Pos::new(2, 3)), false)?;
        }

        if self.random_pos {
            let walls = Self::count(&mut objects_rng, &self.wall_counts);
            let balls = Self::count(&mut objects_rng, &self.ball_counts);
            for _ in 0..walls {
                place_anywhere(&mut grid, &mut objects_rng, Entity::new(Noun::Wall.into(), Pos::default()))?;
            }
            for _ in 0..balls {
                place_anywhere(&mut grid, &mut objects_rng, Entity::new(Noun::Ball.into(), Pos::default()))?;
            }
            place_anywhere(&mut grid, &mut objects_rng, Entity::new(Noun::Baba.into(), Pos::default()))?;
        } else {
            grid.put_kind(ObjectKind::Object(Noun::Wall), Pos::new(1, 4))?;
            grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(3, 4))?;
            grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(2, 4))?;
        }

        Ok(grid)
    }
}
