//! Player controller
//!
//! The player owns a discrete lane and a continuous x that chases the lane's
//! offset with exponential smoothing.

use glam::Vec2;

use super::lane::{LaneModel, LaneShift};

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Target lane index
    pub lane: usize,
    /// Continuous lateral position
    pub x: f32,
    /// Fixed depth on the road
    pub z: f32,
    /// Cosmetic roll (radians), leans into lane changes
    pub tilt: f32,
}

impl Player {
    /// Player centered on `lane`
    pub fn new(lanes: &LaneModel, lane: usize, z: f32) -> Self {
        Self {
            lane,
            x: lanes.offset_of(lane),
            z,
            tilt: 0.0,
        }
    }

    /// Position on the road plane as (x, z)
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Move the target lane one step, clamped at the road edges
    pub fn shift_lane(&mut self, lanes: &LaneModel, shift: LaneShift) {
        self.lane = lanes.shifted(self.lane, shift);
    }

    /// Remaining lateral distance to the target lane
    #[inline]
    pub fn lag(&self, lanes: &LaneModel) -> f32 {
        lanes.offset_of(self.lane) - self.x
    }

    /// Close a `smoothing` fraction of the lag and update tilt from what remains
    pub fn tick(&mut self, lanes: &LaneModel, smoothing: f32, tilt_factor: f32) {
        self.x += self.lag(lanes) * smoothing;
        // Lean toward the target; settles back to level as the lag closes
        self.tilt = -self.lag(lanes) * tilt_factor;
    }
}
