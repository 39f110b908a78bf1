use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::EnvFilter;

/// Environment variable holding the log filter, e.g. `WORD_DROP_LOG=debug`
pub const LOG_ENV: &str = "WORD_DROP_LOG";

/// The terminal belongs to the UI, so logs go to a file.
pub fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(tracing::Level::INFO.into()));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_the_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("word-drop.log");

        init(&path).unwrap();

        assert!(path.exists());
    }
}
