//! Per-request push and pull planning against the pre-step snapshot.
//!
//! A plan answers, for one request in isolation:
//!
//! - **Push line**: the contiguous pushable obstacles ahead of the mover,
//!   nearest first. Planning scans cell by cell; a cell whose obstacles are
//!   all pushable joins the line, an empty cell ends it.
//! - **Blockage**: the line ran into the grid edge, solid terrain, or a
//!   cell holding an obstacle that isn't pushable.
//! - **Pull chain**: `pull` entities directly behind the mover, then behind
//!   those, with their depth (1 = adjacent to the mover).
//!
//! Plans never look at other requests. Conflicts between plans are settled
//! in `resolve`.

use smallvec::SmallVec;

use super::request::MoveRequest;
use crate::core::{Entity, EntityId, Pos};
use crate::grid::Grid;
use crate::rules::Resolver;

/// Why a push line can't advance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Blockage {
    /// Grid edge or solid terrain.
    Edge,
    /// Obstacles that can't be pushed.
    Obstacles(SmallVec<[EntityId; 2]>),
}

/// One pull link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub entity: EntityId,
    /// Distance behind the mover, starting at 1.
    pub depth: u32,
}

/// Everything a request would move, ignoring other requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub request: MoveRequest,

    /// Where the mover came from.
    pub origin: Pos,

    /// Pushed entities, nearest first.
    pub pushed: SmallVec<[EntityId; 4]>,

    /// Set when the push line can't advance.
    pub blocked: Option<Blockage>,

    /// Pull links by increasing depth. Empty for blocked plans.
    pub pulled: SmallVec<[Link; 4]>,
}

impl Plan {
    /// Check whether the push phase is clear.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.blocked.is_none()
    }

    /// Obstacles that stopped the line, if any.
    #[must_use]
    pub fn obstruction(&self) -> &[EntityId] {
        match &self.blocked {
            Some(Blockage::Obstacles(ids)) => ids.as_slice(),
            _ => &[],
        }
    }
}

/// Plan one request against `snapshot`.
///
/// Returns `None` when the requesting entity isn't on the grid.
#[must_use]
pub fn plan(snapshot: &Grid, resolver: &Resolver<'_>, request: MoveRequest) -> Option<Plan> {
    let mover = snapshot.entity(request.entity)?;
    let dir = request.direction;

    let mut pushed = SmallVec::new();
    let mut blocked = None;
    let mut cell = mover.pos.step(dir);
    loop {
        if !snapshot.is_open(cell) {
            blocked = Some(Blockage::Edge);
            break;
        }

        let mut obstacles = obstacles_at(snapshot, resolver, cell);
        obstacles.retain(|(id, _)| *id != request.entity);
        if obstacles.is_empty() {
            break;
        }

        let stuck: SmallVec<[EntityId; 2]> = obstacles
            .iter()
            .filter(|(_, e)| !resolver.is_pushable(e))
            .map(|(id, _)| *id)
            .collect();
        if !stuck.is_empty() {
            blocked = Some(Blockage::Obstacles(stuck));
            break;
        }

        pushed.extend(obstacles.iter().map(|(id, _)| *id));
        cell = cell.step(dir);
    }

    let mut pulled = SmallVec::new();
    if blocked.is_none() {
        let mut depth = 1;
        let mut cell = mover.pos.behind(dir);
        loop {
            let before = pulled.len();
            for &id in snapshot.ids_at(cell) {
                if id == request.entity {
                    continue;
                }
                if snapshot.entity(id).is_some_and(|e| resolver.is_pullable(e)) {
                    pulled.push(Link { entity: id, depth });
                }
            }
            if pulled.len() == before {
                break;
            }
            cell = cell.behind(dir);
            depth += 1;
        }
    }

    Some(Plan {
        request,
        origin: mover.pos,
        pushed,
        blocked,
        pulled,
    })
}

/// Entities at `pos` that stand in the way, bottom to top.
pub(crate) fn obstacles_at(
    grid: &Grid,
    resolver: &Resolver<'_>,
    pos: Pos,
) -> SmallVec<[(EntityId, Entity); 2]> {
    grid.ids_at(pos)
        .iter()
        .filter_map(|&id| grid.entity(id).map(|e| (id, *e)))
        .filter(|(_, e)| resolver.is_obstacle(e))
        .collect()
}
