use std::time::{Duration, Instant};

/// Run-level bookkeeping for the HUD. Scores live in the game state; this
/// only tracks wall-clock session time and how many games the run has seen.
pub struct GameMetrics {
    started: Instant,
    elapsed: Duration,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            elapsed: Duration::ZERO,
            games_played: 0,
        }
    }

    /// Refresh the elapsed-time snapshot the renderer reads
    pub fn update(&mut self) {
        self.elapsed = self.started.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.started = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    /// Session time as mm:ss for the HUD
    pub fn session_time(&self) -> String {
        format_mm_ss(self.elapsed)
    }
}

fn format_mm_ss(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
