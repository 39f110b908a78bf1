use std::io::Write;

use crate::game::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    WordCleared,
    LifeLost,
    GameOver,
}

impl SoundCue {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Cleared { .. } => Some(SoundCue::WordCleared),
            GameEvent::LifeLost { .. } => Some(SoundCue::LifeLost),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::Spawned { .. } => None,
        }
    }
}

/// Plays cues. Failures are swallowed: sound never affects the game.
pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell for bad news
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundPlayer for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        let rings = match cue {
            SoundCue::WordCleared => 0,
            SoundCue::LifeLost => 1,
            SoundCue::GameOver => 2,
        };
        for _ in 0..rings {
            let _ = self.out.write_all(b"\x07");
        }
        let _ = self.out.flush();
    }
}

#[derive(Debug, Default)]
pub struct Muted;

impl SoundPlayer for Muted {
    fn play(&mut self, _cue: SoundCue) {}
}
