//! Engine errors.
//!
//! Only construction-time problems are errors. Malformed rule triples and
//! illegal moves are ordinary game events and never surface here.

use thiserror::Error;

use crate::core::{EntityId, Pos};

/// Engine result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown object kind: {0}")]
    UnknownObject(String),

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("invalid grid size {width}x{height}")]
    InvalidGridSize { width: i32, height: i32 },

    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: i32, height: i32 },

    #[error("position {0} is solid terrain")]
    SolidCell(Pos),

    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("no free cell found after {attempts} attempts")]
    PlacementFailed { attempts: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("episode already finished after {steps} steps")]
    EpisodeFinished { steps: u32 },
}
