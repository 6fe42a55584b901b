use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

pub const TICK_RATE_MS: u64 = 100;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TutorEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TutorEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TutorEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<TutorEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => TutorEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => TutorEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("terminal event stream closed: {e}");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TutorEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for tests and headless runs
pub struct TestEventSource {
    rx: Receiver<TutorEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TutorEvent>) -> Self {
        Self { rx }
    }

    /// Source pre-loaded with `events`; yields ticks once they run out
    pub fn from_events<I: IntoIterator<Item = TutorEvent>>(events: I) -> Self {
        let (tx, rx) = mpsc::channel();
        for evt in events {
            let _ = tx.send(evt);
        }
        Self { rx }
    }
}

impl TutorEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TutorEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: TutorEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TutorEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> TutorEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TutorEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => {
                // keep the loop's cadence when the sender is gone
                std::thread::sleep(self.ticker.interval());
                TutorEvent::Tick
            }
        }
    }
}
