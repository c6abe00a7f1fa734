use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::components::Rules;
use crate::game::{
    FALL_INTERVAL_STEP_MS, INITIAL_FALL_INTERVAL_MS, LINES_PER_LEVEL, MIN_FALL_INTERVAL_MS,
    POINTS_PER_LINE,
};

// Speed and scoring tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub initial_fall_interval_ms: u64,
    pub min_fall_interval_ms: u64,
    pub fall_interval_step_ms: u64,
    pub lines_per_level: u32,
    pub points_per_line: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            initial_fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
            min_fall_interval_ms: MIN_FALL_INTERVAL_MS,
            fall_interval_step_ms: FALL_INTERVAL_STEP_MS,
            lines_per_level: LINES_PER_LEVEL,
            points_per_line: POINTS_PER_LINE,
        }
    }
}

impl GameplayConfig {
    /// Session rules for these settings. A floor above the starting interval
    /// is lowered to it, and a zero line quota is treated as one.
    #[must_use]
    pub fn rules(&self) -> Rules {
        let initial = Duration::from_millis(self.initial_fall_interval_ms.max(1));
        Rules {
            initial_fall_interval: initial,
            min_fall_interval: Duration::from_millis(self.min_fall_interval_ms).min(initial),
            fall_interval_step: Duration::from_millis(self.fall_interval_step_ms),
            lines_per_level: self.lines_per_level.max(1),
            points_per_line: self.points_per_line,
        }
    }
}
