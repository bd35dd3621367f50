//! Movement resolution: push chains, pull chains, stacking and conflicts.
//!
//! One step of movement runs in three stages:
//!
//! ```text
//! collect_requests ──► plan (per request, against a snapshot) ──► resolve
//!                                                                   │
//!                                     claims, stalemates, pulls, commit
//! ```
//!
//! ## Example
//!
//! ```
//! use rust_ruleblocks::core::{Action, Actions, Noun, ObjectKind, Pos, Property};
//! use rust_ruleblocks::grid::Grid;
//! use rust_ruleblocks::movement::{collect_requests, resolve};
//! use rust_ruleblocks::rules::{Resolver, Ruleset};
//!
//! let mut grid = Grid::new(5, 5).unwrap();
//! let baba = grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(1, 2)).unwrap();
//! let wall = grid.put_kind(ObjectKind::Object(Noun::Wall), Pos::new(2, 2)).unwrap();
//!
//! let ruleset = Ruleset::new()
//!     .with(Noun::Baba, Property::Agent)
//!     .with(Noun::Wall, Property::Push);
//! let resolver = Resolver::new(&ruleset);
//!
//! let requests = collect_requests(&grid, &resolver, &Actions::all(Action::Right));
//! let report = resolve(&mut grid, &resolver, &requests).unwrap();
//!
//! assert!(report.any_moved());
//! assert_eq!(grid.entity(baba).unwrap().pos, Pos::new(2, 2));
//! assert_eq!(grid.entity(wall).unwrap().pos, Pos::new(3, 2));
//! ```

pub mod plan;
pub mod request;
pub mod resolve;

pub use plan::{plan, Blockage, Link, Plan};
pub use request::{collect_requests, Impetus, MoveRequest};
pub use resolve::{resolve, FailReason, MoveReport};
