//! Data-driven game balance
//!
//! Every number the simulation depends on lives in [`Tuning`]. Values are
//! checked once when a session is built; the simulation itself never
//! re-validates them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a [`Tuning`] is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("at least one lane is required")]
    NoLanes,
    #[error("default lane {lane} is outside 0..{count}")]
    DefaultLaneOutOfRange { lane: usize, count: usize },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("smoothing must lie strictly between 0 and 1, got {0}")]
    SmoothingOutOfRange(f32),
    #[error("milestone must be at least 1")]
    ZeroMilestone,
    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("obstacles must spawn ahead of the player (max spawn z {spawn_z} vs player z {player_z})")]
    SpawnBehindPlayer { spawn_z: f32, player_z: f32 },
    #[error("spawn depth must be negative (max spawn z {0})")]
    SpawnNotAhead(f32),
    #[error("pass threshold {threshold} must lie behind the player's hitbox edge {edge}")]
    ThresholdInsideHitbox { threshold: f32, edge: f32 },
    #[error("min spawn interval {interval} must exceed one tick of travel ({speed})")]
    IntervalTooShort { interval: f32, speed: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lanes ===
    /// X offset of each lane, left to right
    pub lane_offsets: Vec<f32>,
    /// Lane the player starts in
    pub default_lane: usize,

    // === Player ===
    /// Fixed depth of the player on the road
    pub player_z: f32,
    /// Fraction of the remaining lag closed each tick
    pub smoothing: f32,
    /// Tilt per unit of lag (cosmetic)
    pub tilt_factor: f32,

    // === Speed curve ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    /// Score interval between speed steps
    pub milestone: u32,

    // === Obstacles ===
    /// Obstacle approach per tick, as a multiple of speed
    pub obstacle_speed_factor: f32,
    /// Road texture scroll per tick, as a multiple of speed
    pub road_scroll_factor: f32,
    /// Distance budget between spawns
    pub min_interval: f32,
    pub max_interval: f32,
    pub min_spawn_z: f32,
    pub max_spawn_z: f32,
    /// Obstacles beyond this z have passed the player
    pub pass_threshold_z: f32,

    // === Collision ===
    /// Half width (x) and half depth (z) of the hitbox
    pub hitbox_half_extents: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_offsets: LANE_OFFSETS.to_vec(),
            default_lane: DEFAULT_LANE,

            player_z: PLAYER_Z,
            smoothing: LANE_SMOOTHING,
            tilt_factor: TILT_FACTOR,

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            milestone: SPEED_MILESTONE,

            obstacle_speed_factor: OBSTACLE_SPEED_FACTOR,
            road_scroll_factor: ROAD_SCROLL_FACTOR,
            min_interval: MIN_SPAWN_INTERVAL,
            max_interval: MAX_SPAWN_INTERVAL,
            min_spawn_z: MIN_SPAWN_Z,
            max_spawn_z: MAX_SPAWN_Z,
            pass_threshold_z: PASS_THRESHOLD_Z,

            hitbox_half_extents: Vec2::new(HITBOX_HALF_X, HITBOX_HALF_Z),
        }
    }
}

impl Tuning {
    /// Parse from JSON (missing fields keep their defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Number of lanes
    pub fn lane_count(&self) -> usize {
        self.lane_offsets.len()
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_offsets.is_empty() {
            return Err(TuningError::NoLanes);
        }
        if self.default_lane >= self.lane_count() {
            return Err(TuningError::DefaultLaneOutOfRange {
                lane: self.default_lane,
                count: self.lane_count(),
            });
        }
        for &offset in &self.lane_offsets {
            finite("lane_offsets", offset)?;
        }
        finite("player_z", self.player_z)?;
        finite("min_spawn_z", self.min_spawn_z)?;
        finite("max_spawn_z", self.max_spawn_z)?;
        finite("pass_threshold_z", self.pass_threshold_z)?;

        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(TuningError::SmoothingOutOfRange(self.smoothing));
        }
        if self.milestone == 0 {
            return Err(TuningError::ZeroMilestone);
        }

        positive("tilt_factor", self.tilt_factor)?;
        positive("initial_speed", self.initial_speed)?;
        positive("speed_increment", self.speed_increment)?;
        positive("obstacle_speed_factor", self.obstacle_speed_factor)?;
        positive("road_scroll_factor", self.road_scroll_factor)?;
        positive("min_interval", self.min_interval)?;
        positive("max_interval", self.max_interval)?;
        positive("hitbox_half_extents.x", self.hitbox_half_extents.x)?;
        positive("hitbox_half_extents.y", self.hitbox_half_extents.y)?;

        ordered("spawn interval", self.min_interval, self.max_interval)?;
        ordered("spawn z", self.min_spawn_z, self.max_spawn_z)?;

        // Obstacles must appear outside the hitbox and approach before reaching the player
        let front_edge = self.player_z - self.hitbox_half_extents.y;
        if self.max_spawn_z >= front_edge {
            return Err(TuningError::SpawnBehindPlayer {
                spawn_z: self.max_spawn_z,
                player_z: self.player_z,
            });
        }
        if self.max_spawn_z >= 0.0 {
            return Err(TuningError::SpawnNotAhead(self.max_spawn_z));
        }
        let back_edge = self.player_z + self.hitbox_half_extents.y;
        if self.pass_threshold_z < back_edge {
            return Err(TuningError::ThresholdInsideHitbox {
                threshold: self.pass_threshold_z,
                edge: back_edge,
            });
        }
        if self.min_interval <= self.initial_speed {
            return Err(TuningError::IntervalTooShort {
                interval: self.min_interval,
                speed: self.initial_speed,
            });
        }

        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvertedRange { name, min, max })
    }
}
