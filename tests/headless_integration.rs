use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use word_drop::difficulty::Difficulty;
use word_drop::game::{Game, GameEvent};
use word_drop::language::ScriptedWordSource;
use word_drop::runtime::{ChannelInputSource, FixedFrameClock, InputEvent, Runner};
use word_drop::session::{Phase, SessionConfig};
use word_drop::store::MemoryHighScoreStore;

fn scripted_game(difficulty: Difficulty, words: &[&str]) -> Game {
    Game::with_rng(
        SessionConfig::new(difficulty),
        Box::new(ScriptedWordSource::new(words.iter().copied())),
        Box::new(MemoryHighScoreStore::new(0)),
        StdRng::seed_from_u64(42),
    )
}

fn send_text(tx: &mpsc::Sender<InputEvent>, text: &str) {
    for c in text.chars() {
        tx.send(InputEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
}

// Frames advance simulated time by one motion tick so the outcome does not
// depend on how fast the test machine is.
fn pump(
    runner: &Runner<ChannelInputSource, FixedFrameClock>,
    game: &mut Game,
    steps: usize,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..steps {
        match runner.step() {
            InputEvent::Frame => events.extend(game.advance_ms(20.0)),
            InputEvent::Resize => {}
            InputEvent::Key(key) => match key.code {
                KeyCode::Char(c) => events.extend(game.push_char(c)),
                KeyCode::Backspace => game.backspace(),
                _ => {}
            },
        }
    }
    events
}

#[test]
fn headless_typing_clears_a_falling_word() {
    let mut game = scripted_game(Difficulty::Easy, &["orbit"]);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelInputSource::new(rx), FixedFrameClock::from_millis(1));

    game.start();
    game.spawn();
    assert_eq!(game.active_words().len(), 1);

    send_text(&tx, "orbit");
    let events = pump(&runner, &mut game, 5);

    assert_eq!(
        events,
        vec![GameEvent::Cleared {
            id: 0,
            text: "orbit".to_string(),
            points: 25
        }]
    );
    assert!(game.active_words().is_empty());
    assert_eq!(game.score(), 25);
}

#[test]
fn headless_frames_move_words_down() {
    let mut game = scripted_game(Difficulty::Medium, &["drift"]);
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelInputSource::new(rx), FixedFrameClock::from_millis(1));

    game.start();
    game.spawn();
    let before = game.active_words()[0].y;

    pump(&runner, &mut game, 10);

    let after = game.active_words()[0].y;
    assert!(after > before);
    assert_eq!(game.phase(), Phase::Running);
}

#[test]
fn headless_untyped_words_end_the_run() {
    let mut game = scripted_game(Difficulty::Hard, &["never", "typed"]);
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelInputSource::new(rx), FixedFrameClock::from_millis(1));

    game.start();
    let mut events = Vec::new();
    for _ in 0..200 {
        events.extend(pump(&runner, &mut game, 100));
        if game.phase() == Phase::Over {
            break;
        }
    }

    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.lives(), 0);
    assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    assert!(game.summary().is_some());
}

#[test]
fn headless_input_is_ignored_before_start() {
    let mut game = scripted_game(Difficulty::Easy, &["early"]);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelInputSource::new(rx), FixedFrameClock::from_millis(1));

    send_text(&tx, "early");
    let events = pump(&runner, &mut game, 10);

    assert!(events.is_empty());
    assert_eq!(game.phase(), Phase::NotStarted);
    assert!(game.input().is_empty());
}
