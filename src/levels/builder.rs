//! Grid construction helpers shared by the levels.

use crate::core::{Entity, EntityId, GridRng, Noun, ObjectKind, Pos, Property, Registry};
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Random placement gives up after this many tries.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Create a grid surrounded by solid terrain.
pub fn bordered_grid(width: i32, height: i32) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;
    grid.wall_rect(0, 0, width, height)?;
    Ok(grid)
}

/// The three cells of a horizontal rule centered on `center`.
#[must_use]
pub fn rule_row(center: Pos) -> [Pos; 3] {
    [Pos::new(center.x - 1, center.y), center, Pos::new(center.x + 1, center.y)]
}

/// Place an `object is property` rule on three cells.
///
/// Anchored tokens block movement but can't be pushed or pulled.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Noun, Pos, Property};
/// use rust_ruleblocks::levels::{bordered_grid, put_rule, rule_row};
/// use rust_ruleblocks::rules::{compile, Ruleset};
///
/// let mut grid = bordered_grid(6, 6).unwrap();
/// put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(Pos::new(2, 1)), false).unwrap();
///
/// let ruleset = compile(&grid, &Ruleset::new());
/// assert_eq!(ruleset.to_string(), "{baba is you}");
/// ```
pub fn put_rule(
    grid: &mut Grid,
    noun: Noun,
    property: Property,
    cells: [Pos; 3],
    anchored: bool,
) -> Result<[EntityId; 3]> {
    let kinds = [
        ObjectKind::RuleObject(noun),
        ObjectKind::RuleIs,
        ObjectKind::RuleProperty(property),
    ];

    let mut ids = [EntityId::default(); 3];
    for ((id, kind), pos) in ids.iter_mut().zip(kinds).zip(cells) {
        let mut token = Entity::new(kind, pos);
        token.anchored = anchored;
        *id = grid.put(token)?;
    }
    Ok(ids)
}

/// Place a rule given by names, e.g. `("fball", "is_goal")`.
pub fn put_rule_named(
    grid: &mut Grid,
    registry: &Registry,
    noun: &str,
    property: &str,
    cells: [Pos; 3],
    anchored: bool,
) -> Result<[EntityId; 3]> {
    let noun = registry.noun(noun)?;
    let property = registry.property(property)?;
    put_rule(grid, noun, property, cells, anchored)
}

/// Place an entity on a random free cell inside `top .. top + size`.
///
/// A free cell is open and holds no entities. `entity.pos` is overwritten.
pub fn place_random(
    grid: &mut Grid,
    rng: &mut GridRng,
    mut entity: Entity,
    top: Pos,
    size: (i32, i32),
) -> Result<EntityId> {
    if size.0 <= 0 || size.1 <= 0 {
        return Err(Error::InvalidConfig(format!(
            "placement area {}x{} is empty",
            size.0, size.1
        )));
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = rng.cell_in(top, size);
        if grid.is_open(pos) && grid.is_empty_at(pos) {
            entity.pos = pos;
            return grid.put(entity);
        }
    }
    Err(Error::PlacementFailed {
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Place an entity on a random free cell anywhere on the grid.
pub fn place_anywhere(grid: &mut Grid, rng: &mut GridRng, entity: Entity) -> Result<EntityId> {
    let size = (grid.width(), grid.height());
    place_random(grid, rng, entity, Pos::new(0, 0), size)
}
