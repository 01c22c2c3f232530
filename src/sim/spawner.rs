//! Obstacle spawning and movement
//!
//! The spawn countdown is a distance budget: each tick subtracts the distance
//! travelled, so obstacle density per unit of road stays the same as the
//! session speeds up.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::lane::LaneModel;

/// An approaching obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Lane the obstacle occupies
    pub lane: usize,
    /// Lateral position (fixed at the lane offset)
    pub x: f32,
    /// Depth, increases as it approaches
    pub z: f32,
}

impl Obstacle {
    pub fn new(lanes: &LaneModel, lane: usize, z: f32) -> Self {
        Self {
            lane,
            x: lanes.offset_of(lane),
            z,
        }
    }

    /// Position on the road plane as (x, z)
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

/// Spawn timing ranges, copied out of the tuning at session start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRanges {
    pub min_interval: f32,
    pub max_interval: f32,
    pub min_spawn_z: f32,
    pub max_spawn_z: f32,
    /// Obstacle approach per tick, as a multiple of speed
    pub speed_factor: f32,
}

/// Owns the spawn countdown and every active obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub ranges: SpawnRanges,
    /// Distance left until the next spawn
    pub countdown: f32,
    /// Active obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
}

impl Spawner {
    pub fn new(ranges: SpawnRanges, rng: &mut Pcg32) -> Self {
        let countdown = draw_interval(&ranges, rng);
        Self {
            ranges,
            countdown,
            obstacles: Vec::new(),
        }
    }

    /// Burn `speed` off the countdown; spawn one obstacle when it runs out
    ///
    /// Returns the spawned obstacle, if any.
    pub fn tick(&mut self, speed: f32, lanes: &LaneModel, rng: &mut Pcg32) -> Option<Obstacle> {
        self.countdown -= speed;
        if self.countdown > 0.0 {
            return None;
        }

        let lane = rng.random_range(0..lanes.lane_count());
        let z = draw_between(self.ranges.min_spawn_z, self.ranges.max_spawn_z, rng);
        let obstacle = Obstacle::new(lanes, lane, z);
        self.obstacles.push(obstacle);
        self.countdown = draw_interval(&self.ranges, rng);

        log::debug!("Spawned obstacle in lane {} at z={:.1}", lane, z);
        Some(obstacle)
    }

    /// Move every obstacle toward the player
    pub fn advance_all(&mut self, speed: f32) {
        let step = speed * self.ranges.speed_factor;
        for obstacle in &mut self.obstacles {
            obstacle.z += step;
        }
    }

    /// Drop obstacles beyond `threshold_z` and return how many were dropped
    pub fn remove_passed(&mut self, threshold_z: f32) -> u32 {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.z <= threshold_z);
        (before - self.obstacles.len()) as u32
    }
}

fn draw_interval(ranges: &SpawnRanges, rng: &mut Pcg32) -> f32 {
    draw_between(ranges.min_interval, ranges.max_interval, rng)
}

/// Uniform draw from `[min, max]` (a degenerate range returns `min`)
fn draw_between(min: f32, max: f32, rng: &mut Pcg32) -> f32 {
    if min < max {
        rng.random_range(min..=max)
    } else {
        min
    }
}
