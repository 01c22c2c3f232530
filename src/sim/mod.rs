//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per presentation frame, driven by the caller
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod lane;
pub mod player;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{any_collision, any_swept_collision, collides, overlaps, sweeps};
pub use lane::{LaneModel, LaneShift};
pub use player::Player;
pub use score::ScoreTracker;
pub use spawner::{Obstacle, SpawnRanges, Spawner};
pub use state::{GamePhase, GameState, Snapshot};
pub use tick::{TickInput, advance, tick};
