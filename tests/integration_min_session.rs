// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_starts_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("word-drop");
    let cmd = format!("{} --difficulty easy --mute", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // Start the run and type a little; no word needs to match.
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(300));
    p.send("abc")?;
    std::thread::sleep(Duration::from_millis(100));

    // First ESC leaves the game for the menu, the second quits.
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(200));
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn unknown_difficulty_opens_the_menu() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("word-drop");
    let cmd = format!("{} --difficulty nightmare --mute", bin.display());

    let mut p = spawn(cmd)?;
    p.expect("choose a difficulty")?;

    p.send("\x1b")?;
    p.expect(Eof)?;
    Ok(())
}
