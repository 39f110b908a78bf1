// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod audio;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod language;
pub mod logging;
pub mod matcher;
pub mod motion;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod spawner;
pub mod stats;
pub mod store;
