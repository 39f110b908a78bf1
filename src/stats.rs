/// Conventional characters-per-word used to turn cpm into wpm
pub const AVERAGE_WORD_LENGTH: u64 = 5;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Typing speed over a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedStats {
    pub chars_per_minute: u64,
    pub words_per_minute: u64,
}

impl SpeedStats {
    /// Speed for `typed_characters` over `[started_at_ms, ended_at_ms]`.
    /// A run with no measurable duration scores zero.
    pub fn from_run(started_at_ms: f64, ended_at_ms: f64, typed_characters: u64) -> Self {
        let minutes = (ended_at_ms - started_at_ms) / MS_PER_MINUTE;
        if minutes <= 0.0 || !minutes.is_finite() {
            return Self::default();
        }

        let chars_per_minute = (typed_characters as f64 / minutes).floor() as u64;
        Self {
            chars_per_minute,
            words_per_minute: chars_per_minute / AVERAGE_WORD_LENGTH,
        }
    }
}

/// Final figures shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub score: u64,
    pub high_score: u64,
    pub is_new_best: bool,
    pub duration_ms: f64,
    pub speed: SpeedStats,
}
