//! Grid storage: cells, stacks and entity records.
//!
//! The grid owns every entity and is the only place positions change.
//! Storage uses `im` persistent collections, so `clone()` is O(1) and the
//! movement engine can hold a pre-step snapshot for free.

use im::{OrdMap, Vector};
use smallvec::SmallVec;

use crate::core::{Direction, Entity, EntityId, ObjectKind, Pos};
use crate::error::{Error, Result};

/// Entities at one cell, bottom to top.
///
/// Most cells hold zero or one entity; two inline slots cover the common
/// stacked case without allocation.
pub type Stack = SmallVec<[EntityId; 2]>;

/// A rectangular grid of stacked entities.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Noun, ObjectKind, Pos};
/// use rust_ruleblocks::grid::Grid;
///
/// let mut grid = Grid::new(5, 5).unwrap();
/// grid.wall_rect(0, 0, 5, 5).unwrap();
///
/// let ball = grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(2, 2)).unwrap();
/// let baba = grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(2, 2)).unwrap();
///
/// // Top of the stack is the last entity placed
/// assert_eq!(grid.get(2, 2).unwrap().kind, ObjectKind::Object(Noun::Baba));
/// let ids: Vec<_> = grid.ids_at(Pos::new(2, 2)).to_vec();
/// assert_eq!(ids, vec![ball, baba]);
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,

    /// Stacks in row-major order (`y * width + x`).
    cells: Vector<Stack>,

    /// Solid terrain, row-major. Behaves like the grid edge.
    solid: Vector<bool>,

    /// Entity records by ID.
    entities: OrdMap<EntityId, Entity>,

    /// Next entity ID to allocate.
    next_id: u32,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let area = width.checked_mul(height).filter(|_| width > 0 && height > 0);
        let Some(area) = area else {
            return Err(Error::InvalidGridSize { width, height });
        };
        let n = area as usize;
        Ok(Self {
            width,
            height,
            cells: (0..n).map(|_| Stack::new()).collect(),
            solid: (0..n).map(|_| false).collect(),
            entities: OrdMap::new(),
            next_id: 0,
        })
    }

    /// Grid width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a position is inside the grid.
    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.y * self.width + pos.x) as usize)
    }

    fn checked_index(&self, pos: Pos) -> Result<usize> {
        self.index(pos).ok_or(Error::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        })
    }

    // === Terrain ===

    /// Check if a cell is solid terrain.
    #[must_use]
    pub fn is_solid(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| self.solid[i])
    }

    /// Check if a cell can ever hold entities (in bounds and not solid).
    #[must_use]
    pub fn is_open(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| !self.solid[i])
    }

    /// Mark a cell as solid terrain.
    ///
    /// Fails if the cell is out of bounds or holds entities.
    pub fn set_solid(&mut self, pos: Pos) -> Result<()> {
        let i = self.checked_index(pos)?;
        if !self.cells[i].is_empty() {
            return Err(Error::InvalidConfig(format!(
                "can't make occupied cell {} solid",
                pos
            )));
        }
        self.solid.set(i, true);
        Ok(())
    }

    /// Surround the rectangle `(x, y, w, h)` with solid terrain.
    pub fn wall_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<()> {
        for i in 0..w {
            self.set_solid(Pos::new(x + i, y))?;
            self.set_solid(Pos::new(x + i, y + h - 1))?;
        }
        for j in 0..h {
            self.set_solid(Pos::new(x, y + j))?;
            self.set_solid(Pos::new(x + w - 1, y + j))?;
        }
        Ok(())
    }

    // === Placement ===

    /// Place an entity on top of the stack at `entity.pos`.
    pub fn put(&mut self, entity: Entity) -> Result<EntityId> {
        let i = self.checked_index(entity.pos)?;
        if self.solid[i] {
            return Err(Error::SolidCell(entity.pos));
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        if let Some(stack) = self.cells.get_mut(i) {
            stack.push(id);
        }
        Ok(id)
    }

    /// Place a default entity of `kind` at `pos`.
    pub fn put_kind(&mut self, kind: ObjectKind, pos: Pos) -> Result<EntityId> {
        self.put(Entity::new(kind, pos))
    }

    /// Remove an entity from the grid.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity> {
        let entity = self.entities.remove(&id).ok_or(Error::EntityNotFound(id))?;
        if let Some(i) = self.index(entity.pos) {
            if let Some(stack) = self.cells.get_mut(i) {
                stack.retain(|e| *e != id);
            }
        }
        Ok(entity)
    }

    /// Move an entity to the top of the stack at `to`.
    ///
    /// Returns the previous position.
    pub fn move_entity(&mut self, id: EntityId, to: Pos) -> Result<Pos> {
        let target = self.checked_index(to)?;
        if self.solid[target] {
            return Err(Error::SolidCell(to));
        }
        let entity = self.entities.get_mut(&id).ok_or(Error::EntityNotFound(id))?;
        let from = entity.pos;
        entity.pos = to;

        if let Some(i) = self.index(from) {
            if let Some(stack) = self.cells.get_mut(i) {
                stack.retain(|e| *e != id);
            }
        }
        if let Some(stack) = self.cells.get_mut(target) {
            stack.push(id);
        }
        Ok(from)
    }

    /// Change an entity's facing.
    pub fn set_facing(&mut self, id: EntityId, facing: Direction) -> Result<()> {
        let entity = self.entities.get_mut(&id).ok_or(Error::EntityNotFound(id))?;
        entity.facing = facing;
        Ok(())
    }

    // === Queries ===

    /// Get an entity by ID.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Entity IDs at a cell, bottom to top. Empty outside the grid.
    #[must_use]
    pub fn ids_at(&self, pos: Pos) -> &[EntityId] {
        self.index(pos)
            .and_then(|i| self.cells.get(i))
            .map_or(&[], |stack| stack.as_slice())
    }

    /// Entities at a cell, bottom to top.
    pub fn get_all(&self, pos: Pos) -> impl Iterator<Item = &Entity> + '_ {
        self.ids_at(pos).iter().filter_map(move |id| self.entities.get(id))
    }

    /// Top entity at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Entity> {
        self.top_at(Pos::new(x, y))
    }

    /// Top entity at `pos`.
    #[must_use]
    pub fn top_at(&self, pos: Pos) -> Option<&Entity> {
        self.ids_at(pos).last().and_then(|id| self.entities.get(id))
    }

    /// Check if a cell holds no entities.
    #[must_use]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.ids_at(pos).is_empty()
    }

    /// All entities in row-major cell order, bottom to top within a cell.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.cells
            .iter()
            .flat_map(|stack| stack.iter())
            .filter_map(move |&id| self.entities.get(&id).map(|e| (id, e)))
    }

    /// Cells holding at least one entity, in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, stack)| !stack.is_empty())
            .map(move |(i, _)| Pos::new(i as i32 % width, i as i32 / width))
    }

    /// Number of entities on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the grid holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Position of every entity, sorted by ID.
    #[must_use]
    pub fn positions(&self) -> Vec<(EntityId, Pos)> {
        self.entities.iter().map(|(&id, e)| (id, e.pos)).collect()
    }
}
