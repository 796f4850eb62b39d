//! Score-driven pacing: how many obstacles the field should hold and how
//! often the game ticks.

use std::time::Duration;

use crate::config::{ObstacleFormula, SpeedFormula};

/// Pure mapping from score to obstacle target and tick interval.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Difficulty {
    obstacles: ObstacleFormula,
    speed: SpeedFormula,
}

impl Difficulty {
    #[must_use]
    pub fn new(obstacles: ObstacleFormula, speed: SpeedFormula) -> Self {
        Self { obstacles, speed }
    }

    /// Obstacles the field should hold at `score`, capped at the formula max.
    #[must_use]
    pub fn target_obstacle_count(&self, score: u32) -> usize {
        let extra = score / self.obstacles.increase_every.max(1);
        let extra = usize::try_from(extra).unwrap_or(usize::MAX);
        self.obstacles
            .base
            .saturating_add(extra)
            .min(self.obstacles.max)
    }

    /// Obstacles placed on reset, before any score.
    #[must_use]
    pub fn base_obstacle_count(&self) -> usize {
        self.target_obstacle_count(0)
    }

    /// Delay between ticks at `score`.
    #[must_use]
    pub fn tick_interval(&self, score: u32) -> Duration {
        let millis = match self.speed {
            SpeedFormula::Constant { interval_ms } => interval_ms,
            SpeedFormula::Progressive {
                base_ms,
                step_ms,
                increase_every,
                min_ms,
            } => {
                let level = u64::from(score / increase_every.max(1));
                base_ms
                    .saturating_sub(step_ms.saturating_mul(level))
                    .max(min_ms)
            }
        };

        Duration::from_millis(millis)
    }
}
