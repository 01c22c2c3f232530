//! Score and difficulty curve
//!
//! Score goes up by one per passed obstacle. Speed steps up once for every
//! milestone multiple the score crosses, even when several obstacles pass in
//! the same tick.

/// Score, speed and the milestones already paid out
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTracker {
    pub score: u32,
    pub speed: f32,
    /// Score interval between speed steps
    pub milestone: u32,
    pub speed_increment: f32,
    /// Milestones already rewarded with a speed step
    milestones_reached: u32,
}

impl ScoreTracker {
    pub fn new(initial_speed: f32, milestone: u32, speed_increment: f32) -> Self {
        Self {
            score: 0,
            speed: initial_speed,
            milestone,
            speed_increment,
            milestones_reached: 0,
        }
    }

    /// Number of milestones that have raised the speed so far
    #[inline]
    pub fn milestones_reached(&self) -> u32 {
        self.milestones_reached
    }

    /// Credit passed obstacles
    pub fn on_obstacles_passed(&mut self, count: u32) {
        self.score = self.score.saturating_add(count);
    }

    /// Apply one speed step per newly crossed milestone
    ///
    /// Returns how many steps were applied.
    pub fn maybe_increase_speed(&mut self) -> u32 {
        let reached = self.score / self.milestone;
        let steps = reached.saturating_sub(self.milestones_reached);
        for _ in 0..steps {
            self.speed += self.speed_increment;
        }
        self.milestones_reached = self.milestones_reached.max(reached);
        if steps > 0 {
            log::info!(
                "Score {} reached milestone {}: speed now {:.2}",
                self.score,
                self.milestones_reached,
                self.speed
            );
        }
        steps
    }
}
