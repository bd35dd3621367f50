//! Deterministic random number generation for level layout.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same layout
//! - **Context streams**: Independent sequences for different purposes
//!   (e.g., rule placement vs object placement), so adding a random draw
//!   to one part of a level doesn't shift the others
//!
//! ## Usage
//!
//! ```
//! use rust_ruleblocks::core::{GridRng, Pos};
//!
//! let mut rng = GridRng::new(42);
//! let cell = rng.cell_in(Pos::new(1, 1), (6, 6));
//! assert!(cell.x >= 1 && cell.x < 7);
//!
//! let mut again = GridRng::new(42);
//! assert_eq!(again.cell_in(Pos::new(1, 1), (6, 6)), cell);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use super::position::Pos;

/// Deterministic RNG for level generation.
///
/// Uses ChaCha8 for speed while keeping sequences stable across platforms.
#[derive(Clone, Debug)]
pub struct GridRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GridRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// Context seeds come from `FxHasher`, which has a fixed algorithm, so
    /// layouts don't change between toolchain releases.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Pick a cell uniformly inside the rectangle `top .. top + size`.
    ///
    /// `size` must be non-zero in both dimensions.
    pub fn cell_in(&mut self, top: Pos, size: (i32, i32)) -> Pos {
        let x = self.gen_range(top.x..top.x + size.0);
        let y = self.gen_range(top.y..top.y + size.1);
        Pos::new(x, y)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
