use assert_matches::assert_matches;
use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;
use word_drop::difficulty::Difficulty;
use word_drop::game::{Game, GameEvent};
use word_drop::language::{LanguageTag, RandomWordSource, ScriptedWordSource, WordList};
use word_drop::session::{Phase, PlayArea, SessionConfig};
use word_drop::store::{FileHighScoreStore, HighScoreStore};

fn shallow_config(difficulty: Difficulty) -> SessionConfig {
    SessionConfig {
        play_area: PlayArea {
            height: 0.0,
            ..PlayArea::default()
        },
        ..SessionConfig::new(difficulty)
    }
}

fn play_until_over(game: &mut Game) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..20_000 {
        events.extend(game.advance_ms(20.0));
        if game.phase() == Phase::Over {
            break;
        }
    }
    events
}

#[test]
fn new_best_is_written_and_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("high_score.json");

    let mut game = Game::with_rng(
        shallow_config(Difficulty::Easy),
        Box::new(ScriptedWordSource::new(["harbor"])),
        Box::new(FileHighScoreStore::with_path(&path)),
        StdRng::seed_from_u64(1),
    );
    assert_eq!(game.high_score(), 0);

    game.start();
    game.spawn();
    assert_matches!(game.set_input("harbor"), Some(GameEvent::Cleared { points: 30, .. }));
    let events = play_until_over(&mut game);
    assert_matches!(
        events.last(),
        Some(GameEvent::GameOver {
            score: 30,
            is_new_best: true
        })
    );

    let reopened = FileHighScoreStore::with_path(&path);
    assert_eq!(reopened.get(), 30);
    assert!(reopened.record().achieved_at.is_some());

    // A fresh game picks the stored score up at construction.
    let next = Game::with_rng(
        shallow_config(Difficulty::Easy),
        Box::new(ScriptedWordSource::new(["harbor"])),
        Box::new(reopened),
        StdRng::seed_from_u64(2),
    );
    assert_eq!(next.high_score(), 30);
}

#[test]
fn weaker_run_leaves_the_file_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("high_score.json");
    let mut seeded = FileHighScoreStore::with_path(&path);
    seeded.set(500).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let mut game = Game::with_rng(
        shallow_config(Difficulty::Medium),
        Box::new(ScriptedWordSource::new(["ab"])),
        Box::new(FileHighScoreStore::with_path(&path)),
        StdRng::seed_from_u64(3),
    );
    game.start();
    play_until_over(&mut game);

    let summary = game.summary().unwrap();
    assert!(!summary.is_new_best);
    assert_eq!(summary.high_score, 500);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn bundled_words_fall_in_every_tier() {
    for difficulty in Difficulty::ALL {
        let words = RandomWordSource::with_rng(LanguageTag::En, StdRng::seed_from_u64(9)).unwrap();
        let list = WordList::load(LanguageTag::En).unwrap();
        let mut game = Game::with_rng(
            SessionConfig::new(difficulty),
            Box::new(words),
            Box::new(word_drop::store::MemoryHighScoreStore::new(0)),
            StdRng::seed_from_u64(4),
        );

        game.start();
        for _ in 0..5 {
            game.spawn();
        }

        for word in game.active_words() {
            assert!(list.words.contains(&word.text));
            assert!(word.x >= 0.0 && word.x <= PlayArea::default().max_x());
            assert_eq!(word.y, PlayArea::default().spawn_y);
        }
        let ids: Vec<u64> = game.active_words().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn french_session_draws_french_words() {
    let list = WordList::load(LanguageTag::Fr).unwrap();
    let config = SessionConfig {
        language: LanguageTag::Fr,
        ..SessionConfig::new(Difficulty::Easy)
    };
    let mut game = Game::with_rng(
        config,
        Box::new(RandomWordSource::with_rng(LanguageTag::Fr, StdRng::seed_from_u64(11)).unwrap()),
        Box::new(word_drop::store::MemoryHighScoreStore::new(0)),
        StdRng::seed_from_u64(12),
    );

    game.start();
    game.spawn();

    assert!(list.words.contains(&game.active_words()[0].text));
}

#[test]
fn ids_keep_counting_across_restarts() {
    let mut game = Game::with_rng(
        shallow_config(Difficulty::Hard),
        Box::new(ScriptedWordSource::new(["one"])),
        Box::new(word_drop::store::MemoryHighScoreStore::new(0)),
        StdRng::seed_from_u64(5),
    );

    game.start();
    game.spawn();
    play_until_over(&mut game);
    game.start();
    game.spawn();

    let first_id_after_restart = game.active_words()[0].id;
    assert!(first_id_after_restart >= 5);
}
