//! Rules: the per-step property table, its compiler and property queries.
//!
//! - `Ruleset`: `Property -> (ObjectKind -> bool)`, rebuilt every step
//! - `compile`: scans the grid for `object is property` token triples
//! - `has_property`: answers behavior queries with derived implications

pub mod compiler;
pub mod resolver;
pub mod ruleset;

pub use compiler::compile;
pub use resolver::{has_property, kind_has_property, Resolver};
pub use ruleset::{RuleEntry, Ruleset};
