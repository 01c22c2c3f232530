//! Lane Runner - simulation core for an endless three-lane runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, player, obstacles, scoring, session)
//! - `tuning`: Data-driven game balance
//! - `wasm`: Browser bindings for the JavaScript presentation layer

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use sim::{GamePhase, GameState, LaneShift, Snapshot, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lane centers on the x axis, left to right
    pub const LANE_OFFSETS: [f32; 3] = [-3.0, 0.0, 3.0];
    /// Player starts in the middle lane
    pub const DEFAULT_LANE: usize = 1;

    /// Player depth on the road (fixed, obstacles come to it)
    pub const PLAYER_Z: f32 = 5.0;
    /// Exponential smoothing toward the target lane per tick
    pub const LANE_SMOOTHING: f32 = 0.15;
    /// Tilt per unit of lateral lag (radians)
    pub const TILT_FACTOR: f32 = 0.1;

    /// Starting speed (distance per tick)
    pub const INITIAL_SPEED: f32 = 0.25;
    /// Speed added at each milestone
    pub const SPEED_INCREMENT: f32 = 0.05;
    /// Speed steps up every 10 points
    pub const SPEED_MILESTONE: u32 = 10;

    /// Obstacles approach at the full speed
    pub const OBSTACLE_SPEED_FACTOR: f32 = 1.0;
    /// Road texture scrolls much slower than obstacles approach
    pub const ROAD_SCROLL_FACTOR: f32 = 0.05;

    /// Distance travelled between spawns
    pub const MIN_SPAWN_INTERVAL: f32 = 6.0;
    pub const MAX_SPAWN_INTERVAL: f32 = 20.0;
    /// Spawn depth range, far ahead of the player
    pub const MIN_SPAWN_Z: f32 = -200.0;
    pub const MAX_SPAWN_Z: f32 = -150.0;
    /// Obstacles past this depth are scored and removed
    pub const PASS_THRESHOLD_Z: f32 = 10.0;

    /// Hitbox half extents
    pub const HITBOX_HALF_X: f32 = 1.2;
    pub const HITBOX_HALF_Z: f32 = 1.2;
}
