//! Conflict resolution and commit.
//!
//! Every request is planned against the same pre-step snapshot, then the
//! plans are settled together:
//!
//! 1. **Pressure.** A clear request drives its mover and its push line. An
//!    entity driven in two different directions is in stalemate: every
//!    request driving it fails. A blocked request still presses on its push
//!    line and on the obstacle that stopped it. Pressure fails a request
//!    that pushes the pressed entity another way, or that moves the entity
//!    straight back into the presser. The pressed entity's own move in any
//!    other direction goes ahead.
//! 2. **Pull.** Each surviving request walks its pull chain by depth. A link
//!    breaks when another surviving request drives it another way or drags
//!    it the other way from closer, or when its destination
//!    still holds an obstacle that isn't leaving. Equal-depth drags in
//!    different directions are a tug of war: the tied requests fail.
//!    Links past a break stay put.
//! 3. **Commit.** Requests apply in order: push line front-most first, then
//!    the mover, then kept links. An entity moves at most once and lands on
//!    top of its destination stack.
//!
//! Pull decisions only look at phase-1 survivors, so the outcome doesn't
//! depend on the order plans are visited in.

use std::iter;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::plan::{obstacles_at, plan, Link, Plan};
use super::request::{Impetus, MoveRequest};
use crate::core::{Direction, EntityId};
use crate::error::Result;
use crate::grid::Grid;
use crate::rules::Resolver;

/// Why a request didn't move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailReason {
    /// Push line ran into the edge, terrain or an immovable obstacle.
    Blocked,
    /// Something it drives is driven or pressed another way by a different
    /// request.
    Stalemate,
    /// A pull link is dragged the other way at the same depth.
    TugOfWar,
}

/// Result of one resolution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Entities that changed cell, in commit order.
    pub moved: Vec<EntityId>,

    /// Requests that failed, in request order.
    pub failed: Vec<(MoveRequest, FailReason)>,
}

impl MoveReport {
    /// Check whether anything changed cell.
    #[must_use]
    pub fn any_moved(&self) -> bool {
        !self.moved.is_empty()
    }

    /// Check whether an entity changed cell.
    #[must_use]
    pub fn has_moved(&self, entity: EntityId) -> bool {
        self.moved.contains(&entity)
    }

    /// Failure reason for the request made by `entity`, if it failed.
    #[must_use]
    pub fn failure(&self, entity: EntityId) -> Option<FailReason> {
        self.failed
            .iter()
            .find(|(request, _)| request.entity == entity)
            .map(|&(_, reason)| reason)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClaimKind {
    /// The request's own mover.
    Move,
    /// Part of the request's push line.
    Push,
    /// Obstacle that stopped a blocked request.
    Press,
    Drag { depth: u32 },
}

#[derive(Clone, Copy, Debug)]
struct Claim {
    plan: usize,
    dir: Direction,
    kind: ClaimKind,
}

type ClaimTable = FxHashMap<EntityId, SmallVec<[Claim; 2]>>;

enum Verdict {
    Hold,
    Break,
    Tie,
}

/// Resolve `requests` against the grid and commit the result.
///
/// Requests must be in commit order (see `collect_requests`). Agent
/// requests turn their mover to face the requested direction whether or
/// not the move succeeds.
pub fn resolve(grid: &mut Grid, resolver: &Resolver<'_>, requests: &[MoveRequest]) -> Result<MoveReport> {
    let snapshot = grid.clone();
    let plans: Vec<Plan> = requests
        .iter()
        .filter_map(|&request| plan(&snapshot, resolver, request))
        .collect();

    let mut failures: Vec<Option<FailReason>> = plans
        .iter()
        .map(|p| (!p.is_clear()).then_some(FailReason::Blocked))
        .collect();

    let claims = claim_table(&plans);

    // === Pressure ===

    let blocked: Vec<bool> = failures.iter().map(Option::is_some).collect();
    for entries in claims.values() {
        for claim in entries {
            if stalled(claim, entries, &blocked) {
                failures[claim.plan] = Some(FailReason::Stalemate);
            }
        }
    }

    // === Pull ===

    let survivors: Vec<bool> = failures.iter().map(Option::is_none).collect();
    let departing: FxHashSet<EntityId> = plans
        .iter()
        .zip(&survivors)
        .filter(|(_, &alive)| alive)
        .flat_map(|(p, _)| iter::once(p.request.entity).chain(p.pushed.iter().copied()))
        .collect();

    let mut kept: Vec<SmallVec<[EntityId; 4]>> = vec![SmallVec::new(); plans.len()];
    let mut tied = Vec::new();
    for (index, plan) in plans.iter().enumerate() {
        if !survivors[index] {
            continue;
        }
        match pull_chain(index, plan, &snapshot, resolver, &claims, &survivors, &departing) {
            Some(links) => kept[index] = links,
            None => tied.push(index),
        }
    }
    for index in tied {
        failures[index] = Some(FailReason::TugOfWar);
    }

    // === Commit ===

    for plan in &plans {
        if plan.request.impetus == Impetus::Agent {
            grid.set_facing(plan.request.entity, plan.request.direction)?;
        }
    }

    let mut report = MoveReport::default();
    let mut seen: FxHashSet<EntityId> = FxHashSet::default();
    for (index, plan) in plans.iter().enumerate() {
        let request = plan.request;
        if let Some(reason) = failures[index] {
            trace!(entity = %request.entity, direction = %request.direction, ?reason, "move failed");
            report.failed.push((request, reason));
            continue;
        }

        let order = plan
            .pushed
            .iter()
            .rev()
            .copied()
            .chain(iter::once(request.entity))
            .chain(kept[index].iter().copied());
        for id in order {
            if !seen.insert(id) {
                continue;
            }
            let Some(from) = snapshot.entity(id).map(|e| e.pos) else {
                continue;
            };
            grid.move_entity(id, from.step(request.direction))?;
            report.moved.push(id);
        }
        trace!(
            entity = %request.entity,
            direction = %request.direction,
            pushed = plan.pushed.len(),
            pulled = kept[index].len(),
            "move committed"
        );
    }

    debug!(
        requests = plans.len(),
        moved = report.moved.len(),
        failed = report.failed.len(),
        "movement resolved"
    );
    Ok(report)
}

fn claim_table(plans: &[Plan]) -> ClaimTable {
    let mut claims = ClaimTable::default();
    for (index, plan) in plans.iter().enumerate() {
        let dir = plan.request.direction;
        let claim = |kind| Claim { plan: index, dir, kind };

        claims
            .entry(plan.request.entity)
            .or_default()
            .push(claim(ClaimKind::Move));
        for &id in &plan.pushed {
            claims.entry(id).or_default().push(claim(ClaimKind::Push));
        }
        for &id in plan.obstruction() {
            claims.entry(id).or_default().push(claim(ClaimKind::Press));
        }
        for link in &plan.pulled {
            claims
                .entry(link.entity)
                .or_default()
                .push(claim(ClaimKind::Drag { depth: link.depth }));
        }
    }
    claims
}

/// Check whether a clear request's claim collides with another claim on
/// the same entity.
///
/// Blocked requests only press: their own mover stays put, so it never
/// collides with anything.
fn stalled(claim: &Claim, entries: &[Claim], blocked: &[bool]) -> bool {
    if blocked[claim.plan] || !matches!(claim.kind, ClaimKind::Move | ClaimKind::Push) {
        return false;
    }
    entries.iter().any(|other| {
        if other.plan == claim.plan || other.dir == claim.dir {
            return false;
        }
        match other.kind {
            ClaimKind::Move | ClaimKind::Push if !blocked[other.plan] => true,
            ClaimKind::Push | ClaimKind::Press => {
                claim.kind == ClaimKind::Push || claim.dir == other.dir.opposite()
            }
            ClaimKind::Move | ClaimKind::Drag { .. } => false,
        }
    })
}

/// Links a surviving plan keeps. `None` on a tug of war.
fn pull_chain(
    index: usize,
    plan: &Plan,
    snapshot: &Grid,
    resolver: &Resolver<'_>,
    claims: &ClaimTable,
    survivors: &[bool],
    departing: &FxHashSet<EntityId>,
) -> Option<SmallVec<[EntityId; 4]>> {
    let mut kept = SmallVec::new();
    let mut broken_at = None;

    for link in &plan.pulled {
        if broken_at.is_some_and(|depth| link.depth > depth) {
            break;
        }
        match link_verdict(index, plan, link, claims, survivors) {
            Verdict::Tie => return None,
            Verdict::Break => {
                broken_at.get_or_insert(link.depth);
            }
            Verdict::Hold => {
                let blocked = snapshot.entity(link.entity).is_some_and(|e| {
                    obstacles_at(snapshot, resolver, e.pos.step(plan.request.direction))
                        .iter()
                        .any(|(id, _)| {
                            *id != link.entity && !departing.contains(id) && !kept.contains(id)
                        })
                });
                if blocked {
                    broken_at.get_or_insert(link.depth);
                } else {
                    kept.push(link.entity);
                }
            }
        }
    }

    Some(kept)
}

fn link_verdict(index: usize, plan: &Plan, link: &Link, claims: &ClaimTable, survivors: &[bool]) -> Verdict {
    let dir = plan.request.direction;
    let mut contested = false;
    let mut tie = false;

    for claim in claims.get(&link.entity).into_iter().flatten() {
        if claim.plan == index || claim.dir == dir || !survivors[claim.plan] {
            continue;
        }
        match claim.kind {
            ClaimKind::Drag { depth } => {
                if depth < link.depth {
                    contested = true;
                } else if depth == link.depth {
                    tie = true;
                }
            }
            ClaimKind::Move | ClaimKind::Push | ClaimKind::Press => contested = true,
        }
    }

    if contested {
        Verdict::Break
    } else if tie {
        Verdict::Tie
    } else {
        Verdict::Hold
    }
}
