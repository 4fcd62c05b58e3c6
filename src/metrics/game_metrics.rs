use std::time::{Duration, Instant};

/// In-memory session stats: per-run clock, runs finished, best score.
/// Nothing here survives process exit.
pub struct GameMetrics {
    run_started: Instant,
    pub high_score: u32,
    pub runs_finished: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            high_score: 0,
            runs_finished: 0,
        }
    }

    /// Time spent in the current run so far
    pub fn run_time(&self) -> Duration {
        self.run_started.elapsed()
    }

    pub fn on_run_start(&mut self) {
        self.run_started = Instant::now();
    }

    /// Record a finished run; called when a collision resets the game
    pub fn on_run_over(&mut self, final_score: u32) {
        self.runs_finished += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
