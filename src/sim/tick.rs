//! Per-frame simulation tick
//!
//! Core game loop step. The caller decides when to tick (frame callback,
//! timer, headless loop); one call advances the run by one frame.

use super::collision::any_swept_collision;
use super::lane::LaneShift;
use super::state::{GamePhase, GameState, Snapshot};

/// Clearance (distance to the nearest obstacle ahead) below which the
/// autopilot looks for another lane
const AUTOPILOT_DANGER_DISTANCE: f32 = 40.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Lane change from a key-press edge (not key repeat)
    pub shift: Option<LaneShift>,
    /// Idle/demo mode - autopilot picks the lane
    pub idle_mode: bool,
}

/// Advance the session by one frame and return what to draw
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    // Nothing moves once the run is over
    if state.phase == GamePhase::GameOver {
        return state.snapshot();
    }

    let shift = if input.idle_mode {
        autopilot_shift(state)
    } else {
        input.shift
    };
    if let Some(shift) = shift {
        state.shift_lane(shift);
    }

    advance(state)
}

/// Advance the session by one frame without new input
///
/// Order: player, spawn, obstacle movement, collision, then scoring. A hit
/// ends the run before anything is scored that tick.
pub fn advance(state: &mut GameState) -> Snapshot {
    if state.phase != GamePhase::Running {
        return state.snapshot();
    }

    state.time_ticks += 1;
    let speed = state.score.speed;
    state.distance += speed;
    state.road_scroll = wrap_unit(state.road_scroll - speed * state.tuning.road_scroll_factor);

    // Player eases toward its lane
    state
        .player
        .tick(&state.lanes, state.tuning.smoothing, state.tuning.tilt_factor);

    // Spawn, then bring everything closer
    state.spawner.tick(speed, &state.lanes, &mut state.rng);
    state.spawner.advance_all(speed);

    // Check the whole depth each obstacle covered, not just where it landed
    let step = speed * state.tuning.obstacle_speed_factor;
    if any_swept_collision(
        &state.player,
        &state.spawner.obstacles,
        step,
        state.tuning.hitbox_half_extents,
    ) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} after {} ticks ({:.0} distance)",
            state.score.score,
            state.time_ticks,
            state.distance
        );
        return state.snapshot();
    }

    let passed = state.spawner.remove_passed(state.tuning.pass_threshold_z);
    if passed > 0 {
        log::debug!("{} obstacle(s) passed", passed);
        state.score.on_obstacles_passed(passed);
        state.score.maybe_increase_speed();
    }

    state.snapshot()
}

/// Wrap into [0, 1)
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 1.0.
fn wrap_unit(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

impl GameState {
    /// Advance by one frame; see [`advance`]
    pub fn advance(&mut self) -> Snapshot {
        advance(self)
    }
}

/// Distance from the player to the nearest obstacle still ahead in `lane`
fn lane_clearance(state: &GameState, lane: usize) -> f32 {
    let front = state.player.z + state.tuning.hitbox_half_extents.y;
    state
        .obstacles()
        .iter()
        .filter(|o| o.lane == lane && o.z < front)
        .map(|o| state.player.z - o.z)
        .fold(f32::INFINITY, f32::min)
}

/// Pick a one-step shift toward the lane with the most clearance
///
/// Stays put while the current lane is clear enough. A neighbouring lane is
/// only entered if it has more room than the current one.
fn autopilot_shift(state: &GameState) -> Option<LaneShift> {
    let current = state.player.lane;
    let here = lane_clearance(state, current);
    if here >= AUTOPILOT_DANGER_DISTANCE {
        return None;
    }

    [LaneShift::Left, LaneShift::Right]
        .into_iter()
        .map(|shift| (shift, state.lanes.shifted(current, shift)))
        .filter(|&(_, lane)| lane != current)
        .map(|(shift, lane)| (shift, lane_clearance(state, lane)))
        .filter(|&(_, clearance)| clearance > here)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(shift, _)| shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawner::Obstacle;
    use crate::tuning::Tuning;

    #[test]
    fn test_tick_applies_shift_before_moving() {
        let mut state = GameState::with_seed(12345);
        let input = TickInput {
            shift: Some(LaneShift::Left),
            ..Default::default()
        };
        let snapshot = tick(&mut state, &input);

        assert_eq!(snapshot.player_lane, 0);
        assert!((snapshot.player_x - (-3.0 * LANE_SMOOTHING)).abs() < 1e-6);
        assert!(snapshot.player_tilt > 0.0);
        assert_eq!(snapshot.time_ticks, 1);
    }

    #[test]
    fn test_shift_at_edge_is_noop() {
        let mut state = GameState::with_seed(1);
        let left = TickInput {
            shift: Some(LaneShift::Left),
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &left);
        }
        assert_eq!(state.player.lane, 0);
    }

    #[test]
    fn test_passing_obstacles_scores_and_speeds_up() {
        let mut state = GameState::with_seed(8);
        state.score.on_obstacles_passed(9);
        state.score.maybe_increase_speed();

        // Two obstacles in the side lanes, one step from the pass threshold
        let near = PASS_THRESHOLD_Z - 0.1;
        state.spawner.obstacles.push(Obstacle::new(&state.lanes, 0, near));
        state.spawner.obstacles.push(Obstacle::new(&state.lanes, 2, near));

        let snapshot = state.advance();
        assert!(snapshot.alive);
        assert_eq!(snapshot.score, 11);
        assert!((snapshot.speed - (INITIAL_SPEED + SPEED_INCREMENT)).abs() < 1e-6);
        assert!(snapshot.obstacle_positions.iter().all(|p| p.y < 0.0));
    }

    #[test]
    fn test_speed_steps_exactly_per_milestone() {
        let mut state = GameState::with_seed(8);
        state.score.on_obstacles_passed(7);
        state.score.maybe_increase_speed();
        let old_score = state.score.score;

        // 15 obstacles clear at once: 7 -> 22 crosses milestones 10 and 20
        let near = PASS_THRESHOLD_Z - 0.1;
        for i in 0..15 {
            let lane = if i % 2 == 0 { 0 } else { 2 };
            state.spawner.obstacles.push(Obstacle::new(&state.lanes, lane, near));
        }
        let snapshot = state.advance();

        let expected = snapshot.score / SPEED_MILESTONE - old_score / SPEED_MILESTONE;
        assert_eq!(expected, 2);
        assert_eq!(state.score.milestones_reached(), 2);
        assert!((snapshot.speed - (INITIAL_SPEED + 2.0 * SPEED_INCREMENT)).abs() < 1e-6);
    }

    #[test]
    fn test_no_obstacles_in_lane_keeps_running() {
        let mut total_score = 0;
        for seed in 0..10 {
            let mut state = GameState::with_seed(seed);
            let lane = state.player.lane;
            let mut expected_score = 0;

            for _ in 0..1000 {
                let before = state.obstacles().len();
                let countdown = state.spawner.countdown;
                let snapshot = state.advance();
                assert!(snapshot.alive, "seed {seed} crashed at tick {}", snapshot.time_ticks);

                // The countdown only jumps up when something spawned
                let spawned = usize::from(state.spawner.countdown > countdown);
                let passed = before + spawned - state.obstacles().len();
                expected_score += passed as u32;
                assert_eq!(snapshot.score, expected_score);

                // Keep the player's lane empty
                state.spawner.obstacles.retain(|o| o.lane != lane);
            }

            assert_eq!(state.phase, GamePhase::Running);
            total_score += state.score.score;
        }
        // Some early obstacles make it all the way past the player
        assert!(total_score > 0);
    }

    #[test]
    fn test_obstacle_in_lane_ends_run() {
        let mut state = GameState::with_seed(21);
        let z = state.player.z - 1.0;
        state
            .spawner
            .obstacles
            .push(Obstacle::new(&state.lanes, state.player.lane, z));

        let snapshot = state.advance();
        assert!(!snapshot.alive);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Colliding obstacle stays where it was
        assert_eq!(state.obstacles().len(), snapshot.obstacle_positions.len());
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = GameState::with_seed(21);
        let z = state.player.z - 1.0;
        state
            .spawner
            .obstacles
            .push(Obstacle::new(&state.lanes, state.player.lane, z));
        let over = state.advance();
        assert!(!over.alive);

        let spawner = state.spawner.clone();
        let score = state.score.clone();
        let player = state.player.clone();

        let input = TickInput {
            shift: Some(LaneShift::Right),
            idle_mode: true,
        };
        for _ in 0..100 {
            assert_eq!(state.advance(), over);
            assert_eq!(tick(&mut state, &input), over);
        }
        assert_eq!(state.spawner, spawner);
        assert_eq!(state.score, score);
        assert_eq!(state.player, player);
    }

    #[test]
    fn test_reset_matches_fresh_session() {
        let mut state = GameState::new(77, Tuning::default()).unwrap();
        for _ in 0..300 {
            state.advance();
        }
        let z = state.player.z - 1.0;
        state
            .spawner
            .obstacles
            .push(Obstacle::new(&state.lanes, state.player.lane, z));
        state.advance();
        assert!(!state.alive());

        state.reset();
        let mut fresh = GameState::with_seed(77);

        assert!(state.alive());
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.speed, INITIAL_SPEED);
        assert!(state.obstacles().is_empty());
        assert_eq!(state.player.lane, DEFAULT_LANE);
        assert_eq!(state.player, fresh.player);
        assert_eq!(state.spawner, fresh.spawner);
        assert_eq!(state.snapshot(), fresh.snapshot());

        // And it keeps matching from here on
        for _ in 0..500 {
            assert_eq!(state.advance(), fresh.advance());
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::with_seed(99999);
        let mut state2 = GameState::with_seed(99999);

        let inputs = [
            TickInput {
                shift: Some(LaneShift::Left),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                shift: Some(LaneShift::Right),
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];

        for input in inputs.iter().cycle().take(2000) {
            let a = tick(&mut state1, input);
            let b = tick(&mut state2, input);
            assert_eq!(a, b);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
    }

    #[test]
    fn test_road_scroll_stays_wrapped() {
        let mut state = GameState::with_seed(4);
        for _ in 0..500 {
            let snapshot = state.advance();
            if !snapshot.alive {
                break;
            }
            assert!((0.0..1.0).contains(&snapshot.road_scroll));
        }
        assert!(state.distance > 0.0);
    }

    #[test]
    fn test_wrap_unit_stays_below_one() {
        assert_eq!(wrap_unit(-1e-9), 0.0);
        assert_eq!(wrap_unit(0.0), 0.0);
        assert_eq!(wrap_unit(1.0), 0.0);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
        assert!((wrap_unit(2.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fast_obstacle_cannot_skip_the_player() {
        let mut state = GameState::with_seed(21);
        // Speed 2.5 per tick, more than the 2.4-deep hitbox
        state.score.on_obstacles_passed(450);
        state.score.maybe_increase_speed();
        let step = state.score.speed * state.tuning.obstacle_speed_factor;
        assert!(step > 2.0 * state.tuning.hitbox_half_extents.y);

        // Just outside the front of the hitbox: the next step lands past the back
        let z = state.player.z - state.tuning.hitbox_half_extents.y - 0.01;
        state
            .spawner
            .obstacles
            .push(Obstacle::new(&state.lanes, state.player.lane, z));

        for _ in 0..10 {
            state.advance();
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score.score, 450);
    }

    #[test]
    fn test_fast_obstacle_in_other_lane_still_passes() {
        let mut state = GameState::with_seed(21);
        state.score.on_obstacles_passed(450);
        state.score.maybe_increase_speed();

        let z = PASS_THRESHOLD_Z - 1.0;
        state.spawner.obstacles.push(Obstacle::new(&state.lanes, 0, z));
        let snapshot = state.advance();
        assert!(snapshot.alive);
        assert_eq!(snapshot.score, 451);
    }

    #[test]
    fn test_autopilot_leaves_blocked_lane() {
        let mut state = GameState::with_seed(5);
        let z = state.player.z - 20.0;
        state
            .spawner
            .obstacles
            .push(Obstacle::new(&state.lanes, DEFAULT_LANE, z));
        state.spawner.obstacles.push(Obstacle::new(&state.lanes, 0, z));

        assert_eq!(autopilot_shift(&state), Some(LaneShift::Right));

        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &idle);
        assert_eq!(state.player.lane, 2);
    }

    #[test]
    fn test_autopilot_stays_when_clear() {
        let state = GameState::with_seed(5);
        assert_eq!(autopilot_shift(&state), None);
    }
}
