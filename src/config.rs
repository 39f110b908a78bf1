use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::difficulty::Difficulty;
use crate::language::LanguageTag;
use crate::session::{MissPolicy, PlayArea, SessionConfig, MOTION_TICK_MS, STARTING_LIVES};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: LanguageTag,
    pub play_area: PlayArea,
    pub tick_ms: u64,
    pub starting_lives: u32,
    pub miss_policy: MissPolicy,
    pub sound: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: LanguageTag::default(),
            play_area: PlayArea::default(),
            tick_ms: MOTION_TICK_MS,
            starting_lives: STARTING_LIVES,
            miss_policy: MissPolicy::default(),
            sound: true,
        }
    }
}

impl Config {
    pub fn session_config(&self, difficulty: Difficulty) -> SessionConfig {
        SessionConfig {
            difficulty,
            language: self.language,
            play_area: self.play_area,
            tick_ms: self.tick_ms.max(1),
            starting_lives: self.starting_lives.max(1),
            miss_policy: self.miss_policy,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config {}: {e}", self.path.display());
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
