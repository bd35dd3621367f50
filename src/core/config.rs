//! Episode configuration.
//!
//! Hosts configure an episode at startup by providing:
//! - grid size (the level decides what goes on it)
//! - a step cap (defaults to `4 * width * height`)
//! - a baseline ruleset, given directly or rule by rule by name
//! - a seed for level generation
//!
//! The engine never hardcodes rules: anything not on the grid comes from the
//! baseline.

use serde::{Deserialize, Serialize};

use super::registry::Registry;
use crate::error::{Error, Result};
use crate::rules::Ruleset;

/// Default grid side length.
pub const DEFAULT_SIZE: i32 = 8;

/// Complete episode configuration.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::EpisodeConfig;
///
/// let config = EpisodeConfig::new(6)
///     .with_seed(7)
///     .with_baseline_rule("baba", "you")
///     .unwrap();
///
/// assert_eq!(config.max_steps(), 4 * 6 * 6);
/// assert_eq!(config.baseline.len(), 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Grid width, including any border.
    pub width: i32,

    /// Grid height, including any border.
    pub height: i32,

    /// Step cap. `None` for the default `4 * width * height`.
    pub max_steps: Option<u32>,

    /// Rules in force regardless of tokens on the grid.
    pub baseline: Ruleset,

    /// Seed for level generation.
    pub seed: u64,
}

impl EpisodeConfig {
    /// Create a square configuration.
    #[must_use]
    pub fn new(size: i32) -> Self {
        Self {
            width: size,
            height: size,
            max_steps: None,
            baseline: Ruleset::new(),
            seed: 0,
        }
    }

    /// Set a rectangular size.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the step cap.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Replace the baseline ruleset.
    #[must_use]
    pub fn with_baseline(mut self, baseline: Ruleset) -> Self {
        self.baseline = baseline;
        self
    }

    /// Add one baseline rule by name, e.g. `("baba", "you")`.
    ///
    /// Fails on unknown names.
    pub fn with_baseline_rule(mut self, noun: &str, property: &str) -> Result<Self> {
        let registry = Registry::standard();
        let noun = registry.noun(noun)?;
        let property = registry.property(property)?;
        self.baseline.insert(noun, property);
        Ok(self)
    }

    /// Set the generation seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Effective step cap.
    ///
    /// Saturates at `u32::MAX` when the default cap doesn't fit, which
    /// `validate` rejects.
    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
            .or_else(|| self.default_max_steps())
            .unwrap_or(u32::MAX)
    }

    fn default_max_steps(&self) -> Option<u32> {
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        width.checked_mul(height)?.checked_mul(4)
    }

    /// Check the configuration before building an episode.
    pub fn validate(&self) -> Result<()> {
        let oversized = self.width.checked_mul(self.height).is_none()
            || (self.max_steps.is_none() && self.default_max_steps().is_none());
        if self.width <= 0 || self.height <= 0 || oversized {
            return Err(Error::InvalidGridSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_steps() == 0 {
            return Err(Error::InvalidConfig("max_steps must be positive".into()));
        }
        Ok(())
    }
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}
