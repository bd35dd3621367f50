//! # rust-ruleblocks
//!
//! A rule-block grid puzzle engine for RL training.
//!
//! Entities stack on a 2D grid. Behavior is not hardcoded: rules are
//! written on the grid as three-token sentences (`baba is you`,
//! `wall is push`) and recompiled every step, so pushing a token changes
//! what the objects do.
//!
//! ## Design Principles
//!
//! 1. **Rules Are Data**: An entity's behavior is looked up in a `Ruleset`
//!    compiled from the grid plus a baseline, never stored on the entity.
//!
//! 2. **Simultaneous Movement**: Every mover plans against the same
//!    snapshot; conflicts are resolved by claims, not by update order.
//!
//! 3. **Deterministic**: Same seed, same layout, same trajectory.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `im-rs` maps back the grid, so the
//!   per-step snapshot is an O(1) clone.
//!
//! - **Step Pipeline**: compile, collect requests, plan, resolve, evaluate.
//!
//! ## Modules
//!
//! - `core`: Positions, entities, kinds, actions, RNG, registry, configuration
//! - `grid`: Stacked-entity grid with solid terrain
//! - `rules`: Rulesets, the rule compiler and property queries
//! - `movement`: Push/pull planning and simultaneous resolution
//! - `outcome`: Win/lose evaluation
//! - `world`: The step loop and episodes
//! - `levels`: Level generators and collision fixtures

pub mod core;
pub mod error;
pub mod grid;
pub mod levels;
pub mod movement;
pub mod outcome;
pub mod rules;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Actions,
    Color, Noun, ObjectKind, Property,
    Direction, Pos,
    Entity, EntityId,
    EpisodeConfig,
    GridRng,
    Registry,
};

pub use crate::error::{Error, Result};

pub use crate::grid::Grid;

pub use crate::rules::{compile, has_property, Resolver, Ruleset};

pub use crate::movement::{FailReason, MoveReport, MoveRequest};

pub use crate::outcome::Outcome;

pub use crate::world::{Episode, StepResult, Transition, World};

pub use crate::levels::{Fixture, GoToObj, GoToWinObj, Level, MoveObj};
