//! Ruleset compilation from rule tokens on the grid.
//!
//! A rule is three consecutive cells along one row (read left to right) or
//! one column (read top to bottom) holding an object token, an `is` token
//! and a property token, in that order. Cells are matched by presence: a
//! token anywhere in a cell's stack counts.
//!
//! ```text
//!   [baba][is][you]        row rule:    baba is you
//!
//!   [ball]                 column rule: ball is win
//!   [is]
//!   [win]
//! ```
//!
//! Reversed (`[you][is][baba]`) or gapped sequences never match.

use smallvec::SmallVec;
use tracing::debug;

use super::ruleset::Ruleset;
use crate::core::{Direction, Noun, ObjectKind, Pos, Property};
use crate::grid::Grid;

/// Compile the ruleset for the current grid layout.
///
/// Baseline entries are copied first; triples on the grid only add `true`
/// entries, so they can never remove a baseline fact. Call this before
/// every movement resolution: token layout can change every step.
#[must_use]
pub fn compile(grid: &Grid, baseline: &Ruleset) -> Ruleset {
    let mut ruleset = baseline.clone();
    let mut triples = 0usize;

    for y in 0..grid.height() {
        triples += scan_line(grid, Pos::new(0, y), Direction::Right, grid.width(), &mut ruleset);
    }
    for x in 0..grid.width() {
        triples += scan_line(grid, Pos::new(x, 0), Direction::Down, grid.height(), &mut ruleset);
    }

    debug!(triples, rules = ruleset.len(), "ruleset compiled");
    ruleset
}

/// Scan every 3-cell window along one line. Returns the number of matches.
fn scan_line(grid: &Grid, start: Pos, dir: Direction, length: i32, ruleset: &mut Ruleset) -> usize {
    let mut matches = 0;
    let mut first = start;
    for _ in 0..length.saturating_sub(2) {
        let second = first.step(dir);
        let third = second.step(dir);

        if has_is_token(grid, second) {
            let nouns = object_tokens(grid, first);
            if !nouns.is_empty() {
                for property in property_tokens(grid, third) {
                    for &noun in &nouns {
                        ruleset.insert(noun, property);
                        matches += 1;
                    }
                }
            }
        }

        first = second;
    }
    matches
}

fn object_tokens(grid: &Grid, pos: Pos) -> SmallVec<[Noun; 2]> {
    grid.get_all(pos)
        .filter_map(|e| match e.kind {
            ObjectKind::RuleObject(noun) => Some(noun),
            _ => None,
        })
        .collect()
}

fn has_is_token(grid: &Grid, pos: Pos) -> bool {
    grid.get_all(pos).any(|e| e.kind == ObjectKind::RuleIs)
}

fn property_tokens(grid: &Grid, pos: Pos) -> SmallVec<[Property; 2]> {
    grid.get_all(pos)
        .filter_map(|e| match e.kind {
            ObjectKind::RuleProperty(property) => Some(property),
            _ => None,
        })
        .collect()
}
