//! Session state and the snapshot handed to the presentation layer
//!
//! One [`GameState`] owns every entity of a run. The frame loop keeps it and
//! passes it to [`tick`](super::tick::tick); nothing else mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lane::{LaneModel, LaneShift};
use super::player::Player;
use super::score::ScoreTracker;
use super::spawner::{Obstacle, SpawnRanges, Spawner};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended by a collision (terminal)
    GameOver,
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Validated balance values
    pub tuning: Tuning,
    /// Lane offset table
    pub lanes: LaneModel,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total distance travelled
    pub distance: f32,
    /// Road texture offset in [0, 1), cosmetic only
    pub road_scroll: f32,
    pub player: Player,
    pub spawner: Spawner,
    pub score: ScoreTracker,
    /// RNG shared by every random draw in the session
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = Self::build(seed, tuning);
        log::info!(
            "Session started (seed {}, {} lanes, speed {:.2})",
            seed,
            state.lanes.lane_count(),
            state.score.speed
        );
        Ok(state)
    }

    /// Default-balance session for tests
    #[cfg(test)]
    pub(crate) fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default()).expect("default tuning is valid")
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let lanes = LaneModel::new(&tuning.lane_offsets);
        let player = Player::new(&lanes, tuning.default_lane, tuning.player_z);
        let spawner = Spawner::new(
            SpawnRanges {
                min_interval: tuning.min_interval,
                max_interval: tuning.max_interval,
                min_spawn_z: tuning.min_spawn_z,
                max_spawn_z: tuning.max_spawn_z,
                speed_factor: tuning.obstacle_speed_factor,
            },
            &mut rng,
        );
        let score = ScoreTracker::new(
            tuning.initial_speed,
            tuning.milestone,
            tuning.speed_increment,
        );

        Self {
            seed,
            tuning,
            lanes,
            phase: GamePhase::Running,
            time_ticks: 0,
            distance: 0.0,
            road_scroll: 0.0,
            player,
            spawner,
            score,
            rng,
        }
    }

    /// Discard everything and start over with the same seed and tuning
    pub fn reset(&mut self) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::build(self.seed, tuning);
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Discard everything and start over with a new seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Queue a lane change for the next tick (ignored once the run is over)
    pub fn shift_lane(&mut self, shift: LaneShift) {
        if self.alive() {
            self.player.shift_lane(&self.lanes, shift);
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.spawner.obstacles
    }

    /// Immutable view for rendering and HUD
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_x: self.player.x,
            player_z: self.player.z,
            player_tilt: self.player.tilt,
            player_lane: self.player.lane,
            obstacle_positions: self.spawner.obstacles.iter().map(Obstacle::pos).collect(),
            score: self.score.score,
            speed: self.score.speed,
            alive: self.alive(),
            road_scroll: self.road_scroll,
            distance: self.distance,
            time_ticks: self.time_ticks,
        }
    }
}

/// Per-tick view of the session for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_x: f32,
    pub player_z: f32,
    /// Cosmetic roll (radians)
    pub player_tilt: f32,
    pub player_lane: usize,
    /// Obstacle positions on the road plane as (x, z)
    pub obstacle_positions: Vec<Vec2>,
    pub score: u32,
    pub speed: f32,
    pub alive: bool,
    /// Road texture offset in [0, 1)
    pub road_scroll: f32,
    pub distance: f32,
    pub time_ticks: u64,
}
