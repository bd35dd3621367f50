//! Outcome evaluation: win, lose or keep going.

mod evaluate;

pub use evaluate::{evaluate, Outcome};
