//! Episode integration tests.
//!
//! These tests drive whole episodes: win and lose scoring, level goals,
//! the step cap, resets and rules that change mid-episode.

use rust_ruleblocks::core::{Action, Actions, EpisodeConfig, GridRng, Noun, ObjectKind, Pos, Property};
use rust_ruleblocks::error::{Error, Result};
use rust_ruleblocks::grid::Grid;
use rust_ruleblocks::levels::{
    bordered_grid, put_rule, rule_row, Fixture, GoToObj, GoToWinObj, Level, MoveObj, RuleChoice,
};
use rust_ruleblocks::outcome::Outcome;
use rust_ruleblocks::rules::Ruleset;
use rust_ruleblocks::world::{Episode, World};

// =============================================================================
// Win / Lose
// =============================================================================

/// Stepping onto a `win` ball ends the episode with a positive reward.
#[test]
fn test_win() {
    let mut episode = Episode::new(Fixture::WinLose { lose: false }, EpisodeConfig::new(8)).unwrap();

    let t = episode.step(Action::Right).unwrap();

    assert!(t.done());
    assert!(t.terminated);
    assert_eq!(t.outcome, Outcome::Win);
    assert!(t.reward > 0.0);
}

/// Stepping onto a `lose` ball ends the episode with a negative reward.
#[test]
fn test_lose() {
    let mut episode = Episode::new(Fixture::WinLose { lose: true }, EpisodeConfig::new(8)).unwrap();

    let t = episode.step(Action::Right).unwrap();

    assert!(t.done());
    assert_eq!(t.outcome, Outcome::Lose);
    assert!(t.reward < 0.0);
}

/// Reward shrinks with the number of steps taken.
#[test]
fn test_goto_obj_win_reward_decays() {
    let mut episode = Episode::new(GoToObj::default(), EpisodeConfig::new(8)).unwrap();

    // baba (2, 5) -> (4, 5) -> ball at (4, 4)
    assert_eq!(episode.step(Action::Right).unwrap().outcome, Outcome::Continue);
    assert_eq!(episode.step(Action::Right).unwrap().outcome, Outcome::Continue);
    let t = episode.step(Action::Up).unwrap();

    assert_eq!(t.outcome, Outcome::Win);
    let expected = 1.0 - 0.9 * (3.0 / 256.0);
    assert!((t.reward - expected).abs() < 1e-6);
    assert_eq!(episode.step_count(), 3);
}

/// Walking onto the wall or the ball scores whatever the drawn rules say.
#[test]
fn test_goto_win_obj_follows_drawn_rules() {
    let level = GoToWinObj::default().with_rules(vec![RuleChoice::new(Property::Defeat, Property::Goal)]);
    let mut episode = Episode::new(level.clone(), EpisodeConfig::new(6)).unwrap();
    assert_eq!(episode.step(Action::Left).unwrap().outcome, Outcome::Win);

    let mut episode = Episode::new(level, EpisodeConfig::new(6)).unwrap();
    assert_eq!(episode.step(Action::Right).unwrap().outcome, Outcome::Lose);
}

/// Hidden rules behave like visible ones.
#[test]
fn test_goto_win_obj_hidden_rules() {
    let level = GoToWinObj::default()
        .with_rules(vec![RuleChoice::new(Property::Goal, Property::Defeat)])
        .hide_rules();
    let mut episode = Episode::new(level, EpisodeConfig::new(6)).unwrap();

    assert_eq!(episode.world().grid().len(), 3);
    assert_eq!(episode.step(Action::Right).unwrap().outcome, Outcome::Win);
}

// =============================================================================
// Move Object
// =============================================================================

/// Move-object rules with baba two pushes away from the door.
struct LinedUp(MoveObj);

impl Level for LinedUp {
    fn name(&self) -> &'static str {
        "move-obj-lined-up"
    }

    fn size(&self) -> (i32, i32) {
        self.0.size()
    }

    fn generate(&self, _rng: &mut GridRng) -> Result<Grid> {
        let mut grid = bordered_grid(7, 7)?;
        put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(Pos::new(2, 1)), false)?;
        put_rule(&mut grid, Noun::Ball, Property::Push, rule_row(Pos::new(2, 2)), false)?;
        grid.put_kind(ObjectKind::Object(Noun::Door), Pos::new(5, 4))?;
        grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(3, 4))?;
        grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(2, 4))?;
        Ok(grid)
    }

    fn goal_reached(&self, grid: &Grid, ruleset: &Ruleset) -> bool {
        self.0.goal_reached(grid, ruleset)
    }
}

/// Pushing the ball onto the door wins with the usual decayed reward.
#[test]
fn test_move_obj_push_onto_door_wins() {
    let mut episode = Episode::new(LinedUp(MoveObj::default()), EpisodeConfig::new(7)).unwrap();

    let t = episode.step(Action::Right).unwrap();
    assert_eq!(t.outcome, Outcome::Continue);
    assert_eq!(t.reward, 0.0);

    let t = episode.step(Action::Right).unwrap();
    assert_eq!(t.outcome, Outcome::Win);
    assert!(t.terminated);
    let expected = 1.0 - 0.9 * (2.0 / 196.0);
    assert!((t.reward - expected).abs() < 1e-6);
    assert_eq!(
        episode.world().grid().get(5, 4).map(|e| e.kind),
        Some(ObjectKind::Object(Noun::Ball))
    );
}

/// Baba standing on the door is not the goal.
#[test]
fn test_move_obj_walking_onto_door_continues() {
    let mut episode = Episode::new(LinedUp(MoveObj::default()), EpisodeConfig::new(7)).unwrap();

    // Around the ball: up, right three times, then down onto the door
    for action in [Action::Up, Action::Right, Action::Right, Action::Right] {
        assert_eq!(episode.step(action).unwrap().outcome, Outcome::Continue);
    }
    let t = episode.step(Action::Down).unwrap();

    assert_eq!(episode.world().grid().get(5, 4).map(|e| e.kind), Some(ObjectKind::Object(Noun::Baba)));
    assert_eq!(t.outcome, Outcome::Continue);
    assert!(!t.done());
}

/// A generated move-object episode starts unsolved.
#[test]
fn test_move_obj_episode_starts_unsolved() {
    let level = MoveObj::default().with_object_names(&["fball", "fwall"]).unwrap();
    let mut episode = Episode::new(level, EpisodeConfig::new(7).with_seed(3)).unwrap();

    assert_eq!(episode.max_steps(), 196);
    let t = episode.step(Action::Idle).unwrap();
    assert_eq!(t.outcome, Outcome::Continue);
    assert!(!t.done());
}

// =============================================================================
// Step Cap and Reset
// =============================================================================

/// The default cap is four times the cell count.
#[test]
fn test_default_max_steps() {
    let episode = Episode::new(GoToObj::default(), EpisodeConfig::new(8)).unwrap();
    assert_eq!(episode.max_steps(), 256);
}

/// Hitting the cap truncates without terminating.
#[test]
fn test_truncated_at_cap() {
    let config = EpisodeConfig::new(8).with_max_steps(2);
    let mut episode = Episode::new(GoToObj::default(), config).unwrap();

    assert!(!episode.step(Action::Left).unwrap().done());
    let t = episode.step(Action::Left).unwrap();

    assert!(t.truncated);
    assert!(!t.terminated);
    assert!(episode.is_finished());
    assert_eq!(episode.step(Action::Left), Err(Error::EpisodeFinished { steps: 2 }));
}

/// Reset with the same seed reproduces the same layout.
#[test]
fn test_reset_is_deterministic() {
    let level = GoToObj::default().random_agent_pos().random_ball_pos(2);
    let mut episode = Episode::new(level, EpisodeConfig::new(8).with_seed(11)).unwrap();
    let first = episode.world().grid().positions();

    episode.step(Action::Down).unwrap();
    let after_reset = episode.reset(11).unwrap().grid().positions();

    assert_eq!(after_reset, first);
    assert_eq!(episode.seed(), 11);
    assert_eq!(episode.step_count(), 0);
}

/// Invalid configurations are rejected before any grid is built.
#[test]
fn test_invalid_config() {
    let zero_cap = EpisodeConfig::new(8).with_max_steps(0);
    assert!(matches!(
        Episode::new(GoToObj::default(), zero_cap),
        Err(Error::InvalidConfig(_))
    ));

    let too_small = Episode::new(GoToObj::new(5), EpisodeConfig::new(5));
    assert!(matches!(too_small, Err(Error::InvalidConfig(_))));
}

// =============================================================================
// Rules Changing Mid-episode
// =============================================================================

/// Pushing a rule token out of line removes the rule from the next step on.
#[test]
fn test_breaking_goal_rule() {
    let mut grid = bordered_grid(8, 8).unwrap();
    put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(Pos::new(2, 1)), true).unwrap();
    put_rule(&mut grid, Noun::Ball, Property::Goal, rule_row(Pos::new(3, 4)), false).unwrap();
    grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(3, 5)).unwrap();
    grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(5, 5)).unwrap();

    let mut world = World::new(grid, Ruleset::new());
    let ball = ObjectKind::Object(Noun::Ball);
    assert!(world.current_ruleset().get(Property::Goal, ball));

    // Push [is] up out of the row
    world.step(&Actions::all(Action::Up)).unwrap();
    assert_eq!(world.grid().get(3, 3).map(|e| e.kind), Some(ObjectKind::RuleIs));
    assert!(!world.recompile().get(Property::Goal, ball));

    world.step(&Actions::all(Action::Down)).unwrap();
    world.step(&Actions::all(Action::Right)).unwrap();
    let result = world.step(&Actions::all(Action::Right)).unwrap();

    assert_eq!(world.grid().get(5, 5).map(|e| e.kind), Some(ObjectKind::Object(Noun::Baba)));
    assert_eq!(result.outcome, Outcome::Continue);
}

/// A rule written during a step applies from the next step.
#[test]
fn test_forming_goal_rule() {
    let mut grid = bordered_grid(8, 8).unwrap();
    put_rule(&mut grid, Noun::Baba, Property::Agent, rule_row(Pos::new(2, 1)), true).unwrap();
    grid.put_kind(ObjectKind::RuleObject(Noun::Ball), Pos::new(2, 4)).unwrap();
    grid.put_kind(ObjectKind::RuleIs, Pos::new(3, 3)).unwrap();
    grid.put_kind(ObjectKind::RuleProperty(Property::Goal), Pos::new(4, 4)).unwrap();
    grid.put_kind(ObjectKind::Object(Noun::Baba), Pos::new(3, 2)).unwrap();
    grid.put_kind(ObjectKind::Object(Noun::Ball), Pos::new(5, 5)).unwrap();

    let mut world = World::new(grid, Ruleset::new());
    let ball = ObjectKind::Object(Noun::Ball);
    assert!(!world.current_ruleset().get(Property::Goal, ball));

    // Push [is] down into the gap
    world.step(&Actions::all(Action::Down)).unwrap();
    assert!(!world.current_ruleset().get(Property::Goal, ball));
    assert!(world.recompile().get(Property::Goal, ball));
}
