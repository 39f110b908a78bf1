use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::app_dirs::AppDirs;

/// Durable home of the single best score
pub trait HighScoreStore {
    fn get(&self) -> u64;
    fn set(&mut self, score: u64) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
    pub achieved_at: Option<DateTime<Local>>,
}

/// JSON file under the state directory
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
    record: HighScoreRecord,
}

impl FileHighScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_path(AppDirs::high_score_path())
    }

    /// Reads the file once; a missing or unreadable file counts as no score yet.
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        let path = p.as_ref().to_path_buf();
        let record = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<HighScoreRecord>(&bytes).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable high score at {}: {e}", path.display());
                HighScoreRecord::default()
            }),
            Err(_) => HighScoreRecord::default(),
        };
        Self { path, record }
    }

    pub fn record(&self) -> &HighScoreRecord {
        &self.record
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn get(&self) -> u64 {
        self.record.high_score
    }

    fn set(&mut self, score: u64) -> std::io::Result<()> {
        let record = HighScoreRecord {
            high_score: score,
            achieved_at: Some(Local::now()),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&record)?;
        fs::write(&self.path, data)?;
        self.record = record;
        Ok(())
    }
}

/// Keeps the score for the life of the process only
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: u64,
}

impl MemoryHighScoreStore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get(&self) -> u64 {
        self.value
    }

    fn set(&mut self, score: u64) -> std::io::Result<()> {
        self.value = score;
        Ok(())
    }
}

/// One store shared by every game of a process, so the file is read once
impl<S: HighScoreStore> HighScoreStore for Rc<RefCell<S>> {
    fn get(&self) -> u64 {
        self.borrow().get()
    }

    fn set(&mut self, score: u64) -> std::io::Result<()> {
        self.borrow_mut().set(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let store = FileHighScoreStore::with_path(dir.path().join("best.json"));
        assert_eq!(store.get(), 0);
        assert!(store.record().achieved_at.is_none());
    }

    #[test]
    fn set_survives_reopening() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");

        let mut store = FileHighScoreStore::with_path(&path);
        store.set(1_234).unwrap();
        assert_eq!(store.get(), 1_234);

        let reopened = FileHighScoreStore::with_path(&path);
        assert_eq!(reopened.get(), 1_234);
        assert!(reopened.record().achieved_at.is_some());
    }

    #[test]
    fn malformed_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileHighScoreStore::with_path(&path);
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryHighScoreStore::new(10);
        assert_eq!(store.get(), 10);
        store.set(99).unwrap();
        assert_eq!(store.get(), 99);
    }

    #[test]
    fn shared_handles_see_each_others_scores() {
        let shared = Rc::new(RefCell::new(MemoryHighScoreStore::new(5)));
        let mut first = Rc::clone(&shared);
        let second = Rc::clone(&shared);

        first.set(40).unwrap();

        assert_eq!(second.get(), 40);
    }

    #[test]
    fn shared_file_store_is_read_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, br#"{ "high_score": 70, "achieved_at": null }"#).unwrap();

        let shared = Rc::new(RefCell::new(FileHighScoreStore::with_path(&path)));
        fs::write(&path, br#"{ "high_score": 9000, "achieved_at": null }"#).unwrap();

        assert_eq!(Rc::clone(&shared).get(), 70);
    }
}
