use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum LeaveEvent {
    Key(KeyEvent),
    /// left button pressed at a terminal cell
    Click { column: u16, row: u16 },
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait LeaveEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<LeaveEvent, RecvTimeoutError>;
}

/// Maps a raw crossterm event; presses only, so a click counts once
pub fn translate(event: CtEvent) -> Option<LeaveEvent> {
    match event {
        CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(LeaveEvent::Key(key)),
        CtEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(LeaveEvent::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        CtEvent::Resize(_, _) => Some(LeaveEvent::Resize),
        _ => None,
    }
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<LeaveEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(raw) => {
                    if let Some(ev) = translate(raw) {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Err(_) => break,
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

impl LeaveEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<LeaveEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<LeaveEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<LeaveEvent>) -> Self {
        Self { rx }
    }
}

impl LeaveEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<LeaveEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: LeaveEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: LeaveEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> LeaveEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => LeaveEvent::Tick,
        }
    }
}
