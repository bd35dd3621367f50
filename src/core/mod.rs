//! Core types: positions, entities, kinds, actions, RNG, registry, configuration.
//!
//! This module holds the building blocks every other layer shares. Nothing
//! here knows about rules or movement; behavior is looked up through a
//! `Ruleset` elsewhere.

pub mod action;
pub mod config;
pub mod entity;
pub mod kind;
pub mod position;
pub mod registry;
pub mod rng;

pub use action::{Action, ActionRecord, Actions};
pub use config::EpisodeConfig;
pub use entity::{Entity, EntityId};
pub use kind::{Color, Noun, ObjectKind, Property};
pub use position::{Direction, Pos};
pub use registry::{Registry, EMPTY_INDEX};
pub use rng::GridRng;
