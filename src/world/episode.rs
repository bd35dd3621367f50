//! Episode driver: step counting, step cap and reward.
//!
//! Wraps a `World` built from a `Level`. Each `reset` regenerates the grid
//! from a seed; each `step` advances the world and scores the transition:
//!
//! - Win: `1 - 0.9 * (step_count / max_steps)`, also when the level's own
//!   goal is reached
//! - Lose: `-1`
//! - otherwise `0`
//!
//! The episode finishes on a terminal outcome or once `step_count` reaches
//! the step cap. Stepping a finished episode is an error until the next
//! `reset`.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::world::World;
use crate::core::{ActionRecord, Actions, EpisodeConfig, GridRng};
use crate::error::{Error, Result};
use crate::levels::Level;
use crate::outcome::Outcome;

/// Scored result of one episode step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub outcome: Outcome,
    pub moved: bool,
    pub reward: f32,
    /// Episode ended on a win or loss.
    pub terminated: bool,
    /// Episode hit the step cap.
    pub truncated: bool,
}

impl Transition {
    /// Check whether the episode is over.
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// One episode over a level.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Action, EpisodeConfig};
/// use rust_ruleblocks::levels::Fixture;
/// use rust_ruleblocks::outcome::Outcome;
/// use rust_ruleblocks::world::Episode;
///
/// let level = Fixture::WinLose { lose: false };
/// let mut episode = Episode::new(level, EpisodeConfig::new(8)).unwrap();
///
/// let t = episode.step(Action::Right).unwrap();
/// assert_eq!(t.outcome, Outcome::Win);
/// assert!(t.terminated && t.reward > 0.0);
/// assert!(episode.step(Action::Right).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Episode<L> {
    level: L,
    config: EpisodeConfig,
    world: World,
    seed: u64,
    step_count: u32,
    history: Vector<ActionRecord>,
    finished: bool,
}

impl<L: Level> Episode<L> {
    /// Validate the configuration and generate the first layout from
    /// `config.seed`.
    pub fn new(level: L, config: EpisodeConfig) -> Result<Self> {
        config.validate()?;
        level.validate()?;
        if level.size() != (config.width, config.height) {
            let (width, height) = level.size();
            return Err(Error::InvalidConfig(format!(
                "level {} is {}x{} but the episode is configured for {}x{}",
                level.name(),
                width,
                height,
                config.width,
                config.height
            )));
        }

        let seed = config.seed;
        let world = build_world(&level, &config, seed)?;
        info!(level = level.name(), seed, entities = world.grid().len(), "episode created");
        Ok(Self {
            level,
            config,
            world,
            seed,
            step_count: 0,
            history: Vector::new(),
            finished: false,
        })
    }

    /// Start over with a freshly generated layout.
    pub fn reset(&mut self, seed: u64) -> Result<&World> {
        self.world = build_world(&self.level, &self.config, seed)?;
        self.seed = seed;
        self.step_count = 0;
        self.history = Vector::new();
        self.finished = false;

        info!(
            level = self.level.name(),
            seed,
            entities = self.world.grid().len(),
            "episode reset"
        );
        Ok(&self.world)
    }

    /// Advance one step.
    pub fn step(&mut self, actions: impl Into<Actions>) -> Result<Transition> {
        if self.finished {
            return Err(Error::EpisodeFinished {
                steps: self.step_count,
            });
        }

        let actions = actions.into();
        let result = self.world.step(&actions)?;
        self.step_count += 1;
        self.history
            .push_back(ActionRecord::new(self.step_count, actions, result.moved));

        let goal_reached = self.level.goal_reached(self.world.grid(), self.world.current_ruleset());
        let outcome = match result.outcome {
            Outcome::Continue if goal_reached => Outcome::Win,
            outcome => outcome,
        };

        let max_steps = self.config.max_steps();
        let reward = match outcome {
            Outcome::Win => 1.0 - 0.9 * (self.step_count as f32 / max_steps as f32),
            Outcome::Lose => -1.0,
            Outcome::Continue => 0.0,
        };
        let terminated = outcome.is_terminal();
        let truncated = self.step_count >= max_steps;
        self.finished = terminated || truncated;

        if self.finished {
            info!(
                step = self.step_count,
                %outcome,
                reward,
                truncated,
                "episode finished"
            );
        } else {
            debug!(step = self.step_count, moved = result.moved, "episode step");
        }

        Ok(Transition {
            outcome,
            moved: result.moved,
            reward,
            terminated,
            truncated,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn level(&self) -> &L {
        &self.level
    }

    #[must_use]
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    /// Seed of the current layout.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Steps taken since the last reset.
    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Effective step cap.
    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.config.max_steps()
    }

    /// Actions taken since the last reset, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Check whether the episode needs a reset before stepping again.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

fn build_world<L: Level>(level: &L, config: &EpisodeConfig, seed: u64) -> Result<World> {
    let mut rng = GridRng::new(seed);
    let grid = level.generate(&mut rng)?;

    let mut baseline = level.baseline();
    baseline.merge(&config.baseline);
    Ok(World::new(grid, baseline))
}
