use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the main loop reacts to
#[derive(Clone, Debug)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
    /// No input arrived within one frame interval
    Frame,
}

/// Source of terminal input
pub trait InputSource: Send + 'static {
    /// Wait up to `timeout` for the next event
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread
pub struct CrosstermInputSource {
    rx: Receiver<InputEvent>,
}

impl CrosstermInputSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses type letters.
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(InputEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(InputEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    tracing::warn!("terminal input stopped: {e}");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for CrosstermInputSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait FrameClock: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedFrameClock {
    interval: Duration,
}

impl FixedFrameClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms.max(1)))
    }
}

impl FrameClock for FixedFrameClock {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-backed source for tests
pub struct ChannelInputSource {
    rx: Receiver<InputEvent>,
}

impl ChannelInputSource {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInputSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Hands the main loop one event or frame at a time
pub struct Runner<S: InputSource, C: FrameClock> {
    source: S,
    clock: C,
}

impl<S: InputSource, C: FrameClock> Runner<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    /// Blocks for at most one frame interval
    pub fn step(&self) -> InputEvent {
        match self.source.recv_timeout(self.clock.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                InputEvent::Frame
            }
        }
    }
}
