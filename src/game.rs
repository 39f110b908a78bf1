use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::difficulty::TierParams;
use crate::language::WordSource;
use crate::matcher;
use crate::motion;
use crate::scheduler::{Scheduler, Trigger};
use crate::session::{FallingWord, Phase, SessionConfig, SessionState};
use crate::spawner::Spawner;
use crate::stats::{RunSummary, SpeedStats};
use crate::store::HighScoreStore;

/// Things that happened during a call, in order, for sound and display
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u64 },
    Cleared { id: u64, text: String, points: u64 },
    LifeLost { missed: usize, lives_left: u32 },
    GameOver { score: u64, is_new_best: bool },
}

/// One player's game: the session state plus the collaborators that feed it.
///
/// Time is simulated. The host reports elapsed wall time through
/// [`Game::advance`] and the scheduler fires spawn and motion triggers for
/// every instant that falls inside it.
pub struct Game {
    config: SessionConfig,
    tier: TierParams,
    state: SessionState,
    spawner: Spawner,
    scheduler: Scheduler,
    words: Box<dyn WordSource>,
    store: Box<dyn HighScoreStore>,
    rng: StdRng,
    clock_ms: f64,
}

impl Game {
    pub fn new(
        config: SessionConfig,
        words: Box<dyn WordSource>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        Self::with_rng(config, words, store, StdRng::from_entropy())
    }

    pub fn with_rng(
        config: SessionConfig,
        words: Box<dyn WordSource>,
        store: Box<dyn HighScoreStore>,
        rng: StdRng,
    ) -> Self {
        let tier = config.difficulty.params();
        let scheduler = Scheduler::new(tier.spawn_interval_ms(0), config.tick_ms as f64);
        let state = SessionState::new(config.starting_lives, store.get());

        Self {
            config,
            tier,
            state,
            spawner: Spawner::new(),
            scheduler,
            words,
            store,
            rng,
            clock_ms: 0.0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn active_words(&self) -> &[FallingWord] {
        &self.state.active_words
    }

    pub fn input(&self) -> &str {
        &self.state.input_buffer
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Simulated milliseconds since the game was created
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Begin a run from `NotStarted` or restart after `Over`. Returns false
    /// (and changes nothing) while a run is already going.
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }

        self.state
            .begin_run(self.config.starting_lives, self.clock_ms);
        self.scheduler.arm(self.tier.spawn_interval_ms(0));

        tracing::info!(
            difficulty = %self.config.difficulty,
            language = %self.config.language,
            "session started"
        );
        true
    }

    /// Stop both triggers and abandon a run in progress. Called when the
    /// game screen goes away; a later `start` begins a fresh run.
    pub fn teardown(&mut self) {
        self.scheduler.cancel();
        if self.state.is_running() {
            tracing::debug!(score = self.state.score, "running session torn down");
            self.state.abandon();
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        self.advance_ms(elapsed.as_nanos() as f64 / 1_000_000.0)
    }

    /// Run every trigger due within the next `ms` milliseconds, stopping
    /// early if the run ends.
    pub fn advance_ms(&mut self, ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.state.is_running() {
            return events;
        }

        let mut budget = ms.max(0.0);
        while self.state.is_running() {
            let Some((trigger, used)) = self.scheduler.poll(budget) else {
                break;
            };
            budget -= used;
            self.clock_ms += used;
            match trigger {
                Trigger::Spawn => events.extend(self.spawn()),
                Trigger::Motion => events.extend(self.motion_tick()),
            }
        }
        self.clock_ms += budget;

        events
    }

    /// Drop a new word in from the top
    pub fn spawn(&mut self) -> Option<GameEvent> {
        if !self.state.is_running() {
            return None;
        }

        let pace = self.tier.curve(self.state.score, self.rng.gen::<f64>());
        let text = self.words.next_word(self.config.language);
        if text.is_empty() {
            tracing::warn!("word source returned an empty word; skipping spawn");
            return None;
        }

        let word = self
            .spawner
            .spawn(text, pace.speed, &self.config.play_area, &mut self.rng);
        let id = word.id;
        tracing::trace!(id, text = %word.text, x = word.x, speed = word.speed, "spawned");

        self.state.active_words.push(word);
        self.scheduler.reschedule(pace.spawn_interval_ms);

        Some(GameEvent::Spawned { id })
    }

    /// Move every word one step and settle misses
    pub fn motion_tick(&mut self) -> Vec<GameEvent> {
        let outcome = motion::motion_tick(
            &mut self.state,
            &self.config.play_area,
            self.config.miss_policy,
            self.clock_ms,
        );

        let mut events = Vec::new();
        if !outcome.missed.is_empty() {
            tracing::debug!(
                missed = outcome.missed.len(),
                lives_left = self.state.lives,
                "words reached the floor"
            );
            events.push(GameEvent::LifeLost {
                missed: outcome.missed.len(),
                lives_left: self.state.lives,
            });
        }
        if outcome.game_over {
            events.push(self.finish_run());
        }
        events
    }

    /// Replace the whole input line, as a text field's change event would
    pub fn set_input(&mut self, raw: &str) -> Option<GameEvent> {
        let cleared = matcher::apply_input(&mut self.state, raw)?;

        // Score moved, so the spawn cadence may have too.
        self.scheduler
            .reschedule(self.tier.spawn_interval_ms(self.state.score));
        tracing::debug!(text = %cleared.word.text, points = cleared.points, "cleared");

        Some(GameEvent::Cleared {
            id: cleared.word.id,
            text: cleared.word.text,
            points: cleared.points,
        })
    }

    pub fn push_char(&mut self, c: char) -> Option<GameEvent> {
        if !self.state.is_running() {
            return None;
        }
        let mut raw = self.state.input_buffer.clone();
        raw.push(c);
        self.set_input(&raw)
    }

    pub fn backspace(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let mut raw = self.state.input_buffer.clone();
        raw.pop();
        // A shorter buffer can still spell a word that is on screen.
        let _ = self.set_input(&raw);
    }

    /// Final figures once the run is over
    pub fn summary(&self) -> Option<RunSummary> {
        if self.state.phase != Phase::Over {
            return None;
        }
        let started = self.state.started_at_ms?;
        let ended = self.state.ended_at_ms?;

        Some(RunSummary {
            score: self.state.score,
            high_score: self.state.high_score,
            is_new_best: self.state.is_new_best,
            duration_ms: ended - started,
            speed: SpeedStats::from_run(started, ended, self.state.typed_characters),
        })
    }

    fn finish_run(&mut self) -> GameEvent {
        self.scheduler.cancel();

        let score = self.state.score;
        if score > self.state.high_score {
            self.state.high_score = score;
            self.state.is_new_best = true;
            if let Err(e) = self.store.set(score) {
                tracing::warn!("could not save high score {score}: {e}");
            }
        }

        tracing::info!(
            score,
            high_score = self.state.high_score,
            new_best = self.state.is_new_best,
            "game over"
        );
        GameEvent::GameOver {
            score,
            is_new_best: self.state.is_new_best,
        }
    }
}
