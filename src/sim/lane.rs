//! Discrete lanes and their positions on the road
//!
//! Lanes are indexed left to right from 0. Each index maps to a fixed x
//! offset through a lookup table built once per session.

use serde::{Deserialize, Serialize};

/// Direction of a single lane change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

impl LaneShift {
    /// Signed step (-1 for left, +1 for right)
    #[inline]
    pub fn step(self) -> isize {
        match self {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        }
    }
}

/// Fixed table of lane offsets
#[derive(Debug, Clone, PartialEq)]
pub struct LaneModel {
    offsets: Vec<f32>,
}

impl LaneModel {
    pub fn new(offsets: &[f32]) -> Self {
        debug_assert!(!offsets.is_empty(), "lane model needs at least one lane");
        Self {
            offsets: offsets.to_vec(),
        }
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.offsets.len()
    }

    /// Index of the rightmost lane
    #[inline]
    pub fn last_lane(&self) -> usize {
        self.offsets.len() - 1
    }

    /// X offset of a lane
    ///
    /// Callers clamp first; an out-of-range index is a bug and panics.
    #[inline]
    pub fn offset_of(&self, lane: usize) -> f32 {
        debug_assert!(lane < self.offsets.len(), "lane {lane} out of range");
        self.offsets[lane]
    }

    /// Lane reached by shifting once from `lane`, clamped to the road edges
    pub fn shifted(&self, lane: usize, shift: LaneShift) -> usize {
        lane.saturating_add_signed(shift.step()).min(self.last_lane())
    }
}
