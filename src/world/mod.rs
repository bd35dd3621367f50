//! World and episode: the step loop over a grid and its rules.
//!
//! - `World`: grid plus baseline rules; `step` runs compile, movement and
//!   the outcome check
//! - `Episode`: a `World` generated from a `Level`, with a step cap and
//!   reward

pub mod episode;
#[allow(clippy::module_inception)]
mod world;

pub use episode::{Episode, Transition};
pub use world::{StepResult, World};
