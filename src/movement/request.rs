//! Move requests: who wants to move where this step.
//!
//! Requests come from two sources. Self-moving entities (`move`) request a
//! step along their facing; agent entities (`agent`) request the direction
//! of their action. Self-moving requests are ordered first, then agent
//! requests, each group in row-major grid order (row, column, stack
//! position). That order is the commit order, which decides stack order
//! when several entities land on one cell.

use serde::{Deserialize, Serialize};

use crate::core::{Actions, Direction, EntityId, Property};
use crate::grid::Grid;
use crate::rules::Resolver;

/// Why an entity is moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Impetus {
    /// Advancing along its facing (`move`).
    SelfMove,
    /// Driven by an agent action (`agent`).
    Agent,
}

/// One requested move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub entity: EntityId,
    pub direction: Direction,
    pub impetus: Impetus,
}

impl MoveRequest {
    /// Create a new request.
    #[must_use]
    pub fn new(entity: EntityId, direction: Direction, impetus: Impetus) -> Self {
        Self {
            entity,
            direction,
            impetus,
        }
    }
}

/// Collect this step's requests in commit order.
///
/// An entity that is both `agent` and `move` follows its action when the
/// action is directional, and its facing otherwise.
#[must_use]
pub fn collect_requests(grid: &Grid, resolver: &Resolver<'_>, actions: &Actions) -> Vec<MoveRequest> {
    let mut self_moving = Vec::new();
    let mut driven = Vec::new();

    for (id, entity) in grid.iter() {
        let action_dir = resolver
            .has(entity, Property::Agent)
            .then(|| actions.for_entity(id).direction())
            .flatten();

        if let Some(direction) = action_dir {
            driven.push(MoveRequest::new(id, direction, Impetus::Agent));
        } else if resolver.has(entity, Property::Move) {
            self_moving.push(MoveRequest::new(id, entity.facing, Impetus::SelfMove));
        }
    }

    self_moving.extend(driven);
    self_moving
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Entity, Noun, ObjectKind, Pos};
    use crate::rules::Ruleset;

    fn object(noun: Noun) -> ObjectKind {
        ObjectKind::Object(noun)
    }

    #[test]
    fn test_agents_follow_action() {
        let mut grid = Grid::new(5, 5).unwrap();
        let baba = grid.put_kind(object(Noun::Baba), Pos::new(2, 2)).unwrap();
        grid.put_kind(object(Noun::Ball), Pos::new(3, 3)).unwrap();

        let ruleset = Ruleset::new().with(Noun::Baba, Property::Agent);
        let resolver = Resolver::new(&ruleset);

        let requests = collect_requests(&grid, &resolver, &Actions::all(Action::Up));
        assert_eq!(requests, vec![MoveRequest::new(baba, Direction::Up, Impetus::Agent)]);
    }

    #[test]
    fn test_idle_and_toggle_request_nothing() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.put_kind(object(Noun::Baba), Pos::new(2, 2)).unwrap();
        let ruleset = Ruleset::new().with(Noun::Baba, Property::Agent);
        let resolver = Resolver::new(&ruleset);

        assert!(collect_requests(&grid, &resolver, &Actions::idle()).is_empty());
        assert!(collect_requests(&grid, &resolver, &Actions::all(Action::Toggle)).is_empty());
    }

    #[test]
    fn test_self_movers_come_first() {
        let mut grid = Grid::new(5, 5).unwrap();
        let baba = grid.put_kind(object(Noun::Baba), Pos::new(1, 1)).unwrap();
        let ball = grid
            .put(Entity::new(object(Noun::Ball), Pos::new(3, 3)).facing(Direction::Down))
            .unwrap();

        let ruleset = Ruleset::new()
            .with(Noun::Baba, Property::Agent)
            .with(Noun::Ball, Property::Move);
        let resolver = Resolver::new(&ruleset);

        let requests = collect_requests(&grid, &resolver, &Actions::all(Action::Left));
        assert_eq!(
            requests,
            vec![
                MoveRequest::new(ball, Direction::Down, Impetus::SelfMove),
                MoveRequest::new(baba, Direction::Left, Impetus::Agent),
            ]
        );
    }

    #[test]
    fn test_row_major_order_within_group() {
        let mut grid = Grid::new(5, 5).unwrap();
        let low = grid.put_kind(object(Noun::Baba), Pos::new(1, 3)).unwrap();
        let high_right = grid.put_kind(object(Noun::Baba), Pos::new(3, 1)).unwrap();
        let high_left = grid.put_kind(object(Noun::Baba), Pos::new(1, 1)).unwrap();

        let ruleset = Ruleset::new().with(Noun::Baba, Property::Agent);
        let resolver = Resolver::new(&ruleset);

        let order: Vec<_> = collect_requests(&grid, &resolver, &Actions::all(Action::Right))
            .into_iter()
            .map(|r| r.entity)
            .collect();
        assert_eq!(order, vec![high_left, high_right, low]);
    }

    #[test]
    fn test_per_entity_overrides() {
        let mut grid = Grid::new(5, 5).unwrap();
        let a = grid.put_kind(object(Noun::Baba), Pos::new(1, 1)).unwrap();
        let b = grid.put_kind(object(Noun::Baba), Pos::new(3, 3)).unwrap();

        let ruleset = Ruleset::new().with(Noun::Baba, Property::Agent);
        let resolver = Resolver::new(&ruleset);
        let actions = Actions::all(Action::Right).with(b, Action::Idle);

        let requests = collect_requests(&grid, &resolver, &actions);
        assert_eq!(requests, vec![MoveRequest::new(a, Direction::Right, Impetus::Agent)]);
    }

    #[test]
    fn test_agent_and_move_entity() {
        let mut grid = Grid::new(5, 5).unwrap();
        let baba = grid
            .put(Entity::new(object(Noun::Baba), Pos::new(2, 2)).facing(Direction::Down))
            .unwrap();

        let ruleset = Ruleset::new()
            .with(Noun::Baba, Property::Agent)
            .with(Noun::Baba, Property::Move);
        let resolver = Resolver::new(&ruleset);

        let driven = collect_requests(&grid, &resolver, &Actions::all(Action::Left));
        assert_eq!(driven, vec![MoveRequest::new(baba, Direction::Left, Impetus::Agent)]);

        let idle = collect_requests(&grid, &resolver, &Actions::idle());
        assert_eq!(idle, vec![MoveRequest::new(baba, Direction::Down, Impetus::SelfMove)]);
    }
}
