//! Terminal events and the background event poller

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A crossterm event the poller forwards
///
/// Key releases and repeats, mouse, focus and paste events never leave the
/// poller.
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl RawEvent {
    fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(RawEvent::Key(key)),
            Event::Resize(width, height) => Some(RawEvent::Resize(width, height)),
            _ => None,
        }
    }
}

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Key press
    Key(KeyEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
}

impl EventKind {
    /// The key event, if this is a key press
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) => Some(key),
            EventKind::Resize(..) => None,
        }
    }

    /// Ctrl+C, which quits regardless of focus
    pub fn is_interrupt(&self) -> bool {
        self.as_key().is_some_and(|key| {
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
        })
    }
}

/// Timing for [`spawn_event_poller`]
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// How long one `crossterm::event::poll` call may block
    pub poll_timeout: Duration,
    /// Pause between batches
    pub loop_sleep: Duration,
    /// Most events read per batch
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Read crossterm events on a tokio task and forward them through `tx`
///
/// Stops when `cancel_token` is cancelled (draining whatever input is still
/// buffered) or when the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    return;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    for _ in 0..config.max_batch {
                        if !event::poll(config.poll_timeout).unwrap_or(false) {
                            break;
                        }
                        let Some(raw) = event::read().ok().and_then(RawEvent::from_crossterm) else {
                            continue;
                        };
                        if tx.send(raw).is_err() {
                            debug!("event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Turn a forwarded event into what components receive
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Resize(width, height) => EventKind::Resize(width, height),
    }
}
