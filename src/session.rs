use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::language::LanguageTag;

pub const STARTING_LIVES: u32 = 5;
pub const MOTION_TICK_MS: u64 = 20;

/// Play-area geometry in virtual units; the UI scales these to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
    /// Horizontal room reserved so a word spawned at the right edge stays visible
    pub word_width: f64,
    /// Vertical start position, just above the visible top edge
    pub spawn_y: f64,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            word_width: 100.0,
            spawn_y: -20.0,
        }
    }
}

impl PlayArea {
    /// Largest x a word may be spawned at
    pub fn max_x(&self) -> f64 {
        (self.width - self.word_width).max(0.0)
    }
}

/// How many lives a motion tick costs when words reach the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissPolicy {
    /// One life per missed word
    #[default]
    PerWord,
    /// One life per tick with at least one miss
    PerTick,
}

impl MissPolicy {
    pub fn lives_lost(&self, missed: usize) -> u32 {
        match (self, missed) {
            (_, 0) => 0,
            (MissPolicy::PerWord, n) => u32::try_from(n).unwrap_or(u32::MAX),
            (MissPolicy::PerTick, _) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub language: LanguageTag,
    pub play_area: PlayArea,
    pub tick_ms: u64,
    pub starting_lives: u32,
    pub miss_policy: MissPolicy,
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            language: LanguageTag::default(),
            play_area: PlayArea::default(),
            tick_ms: MOTION_TICK_MS,
            starting_lives: STARTING_LIVES,
            miss_policy: MissPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Over,
}

/// A word on its way down
#[derive(Debug, Clone, PartialEq)]
pub struct FallingWord {
    pub id: u64,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl FallingWord {
    /// Length used for scoring and typing-speed statistics
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: Phase,
    pub score: u64,
    pub lives: u32,
    /// Insertion order is spawn order
    pub active_words: Vec<FallingWord>,
    pub input_buffer: String,
    pub typed_characters: u64,
    pub started_at_ms: Option<f64>,
    pub ended_at_ms: Option<f64>,
    pub high_score: u64,
    pub is_new_best: bool,
}

impl SessionState {
    pub fn new(lives: u32, high_score: u64) -> Self {
        Self {
            phase: Phase::NotStarted,
            score: 0,
            lives,
            active_words: Vec::new(),
            input_buffer: String::new(),
            typed_characters: 0,
            started_at_ms: None,
            ended_at_ms: None,
            high_score,
            is_new_best: false,
        }
    }

    /// Clear everything transient and enter `Running`. High score survives.
    pub fn begin_run(&mut self, lives: u32, now_ms: f64) {
        self.active_words.clear();
        self.score = 0;
        self.lives = lives;
        self.typed_characters = 0;
        self.input_buffer.clear();
        self.started_at_ms = Some(now_ms);
        self.ended_at_ms = None;
        self.is_new_best = false;
        self.phase = Phase::Running;
    }

    /// Drop a run in progress without finishing it: no end time, no high
    /// score, nothing left on screen.
    pub fn abandon(&mut self) {
        self.active_words.clear();
        self.input_buffer.clear();
        self.phase = Phase::NotStarted;
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
