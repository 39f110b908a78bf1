use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Difficulty tier picked on the menu or with `--difficulty`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Resolve a raw selection. Anything other than the three tier names,
    /// including no value at all, means the player still has to choose.
    pub fn from_selection(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|r| r.parse().ok())
    }

    pub fn params(&self) -> TierParams {
        match self {
            Difficulty::Easy => TierParams {
                base_speed: 1.0,
                speed_jitter: 2.0,
                speed_per_point: 0.0,
                base_interval_ms: 2300.0,
                interval_per_point_ms: 2.0,
                min_interval_ms: 800.0,
            },
            Difficulty::Medium => TierParams {
                base_speed: 1.1,
                speed_jitter: 2.3,
                speed_per_point: 0.002,
                base_interval_ms: 2000.0,
                interval_per_point_ms: 2.0,
                min_interval_ms: 500.0,
            },
            Difficulty::Hard => TierParams {
                base_speed: 1.3,
                speed_jitter: 2.5,
                speed_per_point: 0.0025,
                base_interval_ms: 1500.0,
                interval_per_point_ms: 3.0,
                min_interval_ms: 300.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl std::fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown difficulty {:?} (expected easy, medium or hard)", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownDifficulty(other.to_string())),
        }
    }
}

/// Balance coefficients for one tier.
///
/// Speed is in play-area units per motion tick, intervals in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierParams {
    pub base_speed: f64,
    pub speed_jitter: f64,
    pub speed_per_point: f64,
    pub base_interval_ms: f64,
    pub interval_per_point_ms: f64,
    pub min_interval_ms: f64,
}

/// Fall speed for the next word and the spawn cadence at the current score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pace {
    pub speed: f64,
    pub spawn_interval_ms: f64,
}

impl TierParams {
    /// `jitter` is a uniform sample in `[0, 1)`; it only affects speed.
    pub fn curve(&self, score: u64, jitter: f64) -> Pace {
        let jitter = jitter.clamp(0.0, 1.0);
        Pace {
            speed: self.base_speed + jitter * self.speed_jitter + self.speed_bonus(score),
            spawn_interval_ms: self.spawn_interval_ms(score),
        }
    }

    pub fn spawn_interval_ms(&self, score: u64) -> f64 {
        (self.base_interval_ms - score as f64 * self.interval_per_point_ms)
            .max(self.min_interval_ms)
    }

    /// Expected speed over the jitter distribution
    pub fn mean_speed(&self, score: u64) -> f64 {
        self.base_speed + self.speed_jitter / 2.0 + self.speed_bonus(score)
    }

    fn speed_bonus(&self, score: u64) -> f64 {
        score as f64 * self.speed_per_point
    }
}
