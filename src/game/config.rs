use serde::{Deserialize, Serialize};

use super::state::Position;

/// Configuration for the game
///
/// Defaults match the classic tuning: 20 px cells, a one-cell border, a 0.3 s
/// move interval that drops 0.02 s per five points down to a 0.1 s floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of one grid cell, in pixels
    pub cell_size: u32,
    /// Thickness of the border strips around the play area, in pixels
    pub border_thickness: u32,
    /// Grid cell the snake starts on after init and after every reset
    pub start_cell: Position,
    /// Seconds between move steps at score 0
    pub initial_move_interval: f64,
    /// How much the move interval shrinks per threshold crossed
    pub interval_decrement: f64,
    /// Floor for the move interval
    pub min_move_interval: f64,
    /// Points needed per interval decrement
    pub score_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            border_thickness: 20,
            start_cell: Position::new(5, 5),
            initial_move_interval: 0.3,
            interval_decrement: 0.02,
            min_move_interval: 0.1,
            score_threshold: 5,
        }
    }
}

impl GameConfig {
    /// Config with caller-supplied tuning. A zero or negative interval would
    /// step the snake every frame, so both knobs are floored to sane values.
    pub fn with_tuning(interval: f64, threshold: u32) -> Self {
        let base = Self::default();
        Self {
            initial_move_interval: interval.max(base.min_move_interval),
            score_threshold: threshold.max(1),
            ..base
        }
    }

    /// Border thickness expressed in whole grid cells
    pub fn border_cells(&self) -> i32 {
        (self.border_thickness / self.cell_size) as i32
    }

    /// Move interval for a given score: the initial interval minus one
    /// decrement per full threshold, clamped at the floor.
    pub fn move_interval_for_score(&self, score: u32) -> f64 {
        let steps = (score / self.score_threshold) as f64;
        let interval = self.initial_move_interval - steps * self.interval_decrement;
        interval.max(self.min_move_interval)
    }
}
