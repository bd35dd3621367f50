//! Entity model: the grid of stacked entities.
//!
//! Pure data. Positions change only through `Grid` methods; every other
//! component reads the grid through this contract.

#[allow(clippy::module_inception)]
mod grid;

pub use grid::{Grid, Stack};
