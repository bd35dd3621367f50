//! Collision fixtures: small fixed layouts exercising push, pull and
//! win/lose resolution.
//!
//! All fixtures are 8x8 with a solid border. Balls start facing right.
//!
//! Push fixtures carry `baba is you`, `ball is move`, `wall is push` and,
//! unless noted, `ball is win`:
//!
//! | case | agent  | ball   | walls          |
//! |------|--------|--------|----------------|
//! | 1    | (4, 5) | (2, 5) | (3, 5)         |
//! | 2    | (5, 5) | (4, 4) | (5, 4), no win |
//! | 3    | (1, 5) | (6, 6) | (2, 5), (3, 5) |
//! | 4    | (5, 6) | (3, 4) | (5, 5), (4, 4) |
//! | 5    | (5, 5) | (2, 5) | (3, 5), (4, 5) |
//! | 6    | (4, 6) | (2, 5) | (3, 5), (4, 5) |
//!
//! Pull fixtures carry `baba is you`, `ball is move`, `wall is pull` and,
//! unless noted, `ball is win`:
//!
//! | case | agent  | ball   | walls                  |
//! |------|--------|--------|------------------------|
//! | 1    | (2, 5) | (4, 5) | (3, 5)                 |
//! | 2    | (3, 5) | (4, 4) | (3, 4)                 |
//! | 3    | (3, 4) | (1, 6) | (4, 4), (5, 4)         |
//! | 4    | (4, 4) | (4, 4) | (4, 3), (3, 4), no win |
//! | 5    | (4, 4) | (3, 4) | (2, 4), (5, 4), no win |
//! | 6    | (5, 4) | (3, 4) | (2, 4), (6, 4), no win |
//! | 7    | (2, 4) | (5, 4) | (3, 4), (4, 4)         |
//! | 8    | (3, 5) | (5, 4) | (3, 4), (4, 4)         |

use super::builder::{bordered_grid, put_rule, rule_row};
use super::Level;
use crate::core::{GridRng, Noun, ObjectKind, Pos, Property};
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Side length of every fixture.
pub const FIXTURE_SIZE: i32 = 8;

/// A fixed collision layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fixture {
    /// Agent at (4, 4) next to a ball at (5, 4) that is `win`, or `lose`.
    WinLose { lose: bool },
    /// Push case 1..=6.
    Push(u8),
    /// Pull case 1..=8.
    Pull(u8),
}

struct Layout {
    agent: Pos,
    ball: Pos,
    walls: Vec<Pos>,
    goal: bool,
}

const fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

fn push_layout(case: u8) -> Option<Layout> {
    let (agent, ball, walls, goal): (Pos, Pos, Vec<Pos>, bool) = match case {
        1 => (p(4, 5), p(2, 5), vec![p(3, 5)], true),
        2 => (p(5, 5), p(4, 4), vec![p(5, 4)], false),
        3 => (p(1, 5), p(6, 6), vec![p(2, 5), p(3, 5)], true),
        4 => (p(5, 6), p(3, 4), vec![p(5, 5), p(4, 4)], true),
        5 => (p(5, 5), p(2, 5), vec![p(3, 5), p(4, 5)], true),
        6 => (p(4, 6), p(2, 5), vec![p(3, 5), p(4, 5)], true),
        _ => return None,
    };
    Some(Layout { agent, ball, walls, goal })
}

fn pull_layout(case: u8) -> Option<Layout> {
    let (agent, ball, walls, goal): (Pos, Pos, Vec<Pos>, bool) = match case {
        1 => (p(2, 5), p(4, 5), vec![p(3, 5)], true),
        2 => (p(3, 5), p(4, 4), vec![p(3, 4)], true),
        3 => (p(3, 4), p(1, 6), vec![p(4, 4), p(5, 4)], true),
        4 => (p(4, 4), p(4, 4), vec![p(4, 3), p(3, 4)], false),
        5 => (p(4, 4), p(3, 4), vec![p(2, 4), p(5, 4)], false),
        6 => (p(5, 4), p(3, 4), vec![p(2, 4), p(6, 4)], false),
        7 => (p(2, 4), p(5, 4), vec![p(3, 4), p(4, 4)], true),
        8 => (p(3, 5), p(5, 4), vec![p(3, 4), p(4, 4)], true),
        _ => return None,
    };
    Some(Layout { agent, ball, walls, goal })
}

impl Fixture {
    fn layout(self) -> Result<Layout> {
        let (layout, case) = match self {
            Fixture::WinLose { .. } => (None, 0),
            Fixture::Push(case) => (push_layout(case), case),
            Fixture::Pull(case) => (pull_layout(case), case),
        };
        layout.ok_or_else(|| {
            Error::InvalidConfig(format!("no {} fixture case {}", self.name(), case))
        })
    }

    fn generate_win_lose(lose: bool) -> Result<Grid> {
        let mut grid = bordered_grid(FIXTURE_SIZE, FIXTURE_SIZE)?;
        put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(p(2, 1)), false)?;
        let property = if lose { Property::Defeat } else { Property::Goal };
        put_rule(&mut grid, Noun::Ball, property, rule_row(p(3, 2)), false)?;

        grid.put_kind(ObjectKind::Object(Noun::Ball), p(5, 4))?;
        grid.put_kind(ObjectKind::Object(Noun::Baba), p(4, 4))?;
        Ok(grid)
    }
}

impl Level for Fixture {
    fn name(&self) -> &'static str {
        match self {
            Fixture::WinLose { .. } => "win-lose",
            Fixture::Push(_) => "push",
            Fixture::Pull(_) => "pull",
        }
    }

    fn size(&self) -> (i32, i32) {
        (FIXTURE_SIZE, FIXTURE_SIZE)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Fixture::WinLose { .. } => Ok(()),
            _ => self.layout().map(|_| ()),
        }
    }

    fn generate(&self, _rng: &mut GridRng) -> Result<Grid> {
        let pull = match *self {
            Fixture::WinLose { lose } => return Self::generate_win_lose(lose),
            Fixture::Push(_) => false,
            Fixture::Pull(_) => true,
        };
        let layout = self.layout()?;

        let mut grid = bordered_grid(FIXTURE_SIZE, FIXTURE_SIZE)?;
        put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(p(2, 1)), false)?;
        if pull {
            put_rule(&mut grid, Noun::Ball, Property::Move, rule_row(p(2, 2)), false)?;
            put_rule(&mut grid, Noun::Wall, Property::Pull, rule_row(p(5, 2)), false)?;
            if layout.goal {
                put_rule(&mut grid, Noun::Ball, Property::Goal, rule_row(p(5, 1)), false)?;
            }
            grid.put_kind(ObjectKind::Object(Noun::Ball), layout.ball)?;
            grid.put_kind(ObjectKind::Object(Noun::Baba), layout.agent)?;
            for &wall in &layout.walls {
                grid.put_kind(ObjectKind::Object(Noun::Wall), wall)?;
            }
        } else {
            put_rule(&mut grid, Noun::Ball, Property::Move, rule_row(p(5, 1)), false)?;
            put_rule(&mut grid, Noun::Wall, Property::Push, rule_row(p(2, 2)), false)?;
            if layout.goal {
                put_rule(&mut grid, Noun::Ball, Property::Goal, rule_row(p(5, 2)), false)?;
            }
            for &wall in &layout.walls {
                grid.put_kind(ObjectKind::Object(Noun::Wall), wall)?;
            }
            grid.put_kind(ObjectKind::Object(Noun::Ball), layout.ball)?;
            grid.put_kind(ObjectKind::Object(Noun::Baba), layout.agent)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{compile, Ruleset};

    #[test]
    fn test_every_case_generates() {
        let mut rng = GridRng::new(0);
        for case in 1..=6 {
            Fixture::Push(case).generate(&mut rng).unwrap();
        }
        for case in 1..=8 {
            Fixture::Pull(case).generate(&mut rng).unwrap();
        }
        Fixture::WinLose { lose: false }.generate(&mut rng).unwrap();
    }

    #[test]
    fn test_unknown_case() {
        assert!(matches!(Fixture::Push(7).validate(), Err(Error::InvalidConfig(_))));
        assert!(matches!(Fixture::Pull(0).validate(), Err(Error::InvalidConfig(_))));
        assert!(Fixture::Pull(0).generate(&mut GridRng::new(0)).is_err());
    }

    #[test]
    fn test_push_rules() {
        let grid = Fixture::Push(1).generate(&mut GridRng::new(0)).unwrap();
        let ruleset = compile(&grid, &Ruleset::new());
        assert_eq!(ruleset.to_string(), "{ball is win, ball is move, wall is push, baba is you}");
    }

    #[test]
    fn test_pull_rules_without_goal() {
        let grid = Fixture::Pull(5).generate(&mut GridRng::new(0)).unwrap();
        let ruleset = compile(&grid, &Ruleset::new());
        assert!(!ruleset.get(Property::Goal, ObjectKind::Object(Noun::Ball)));
        assert!(ruleset.get(Property::Pull, ObjectKind::Object(Noun::Wall)));
    }

    #[test]
    fn test_pull_case_4_stacks_baba_on_ball() {
        let grid = Fixture::Pull(4).generate(&mut GridRng::new(0)).unwrap();
        let kinds: Vec<_> = grid.get_all(p(4, 4)).map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ObjectKind::Object(Noun::Ball), ObjectKind::Object(Noun::Baba)]
        );
    }
}
