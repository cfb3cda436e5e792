//! Terminal input events
//!
//! A blocking reader thread polls crossterm and forwards what the board
//! cares about over a channel, with a tick on idle so the loop can redraw.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Events coming from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize { cols: u16, rows: u16 },
    Tick,
}

/// Reader thread plus the channel it feeds
pub struct EventHandler {
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, tick_rate }
    }

    /// Start reading terminal events on a background thread
    ///
    /// The thread exits once the receiving side is gone.
    pub fn start_input_polling(&self) {
        let tx = self.tx.clone();
        let tick_rate = self.tick_rate;

        std::thread::spawn(move || loop {
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(event) => translate(event),
                    Err(e) => {
                        tracing::error!("Error reading terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => Some(AppEvent::Tick),
                Err(e) => {
                    tracing::error!("Error polling terminal: {}", e);
                    break;
                }
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Keep key presses, pastes and resizes; drop everything else
fn translate(event: CrosstermEvent) -> Option<AppEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        CrosstermEvent::Paste(text) => Some(AppEvent::Paste(text)),
        CrosstermEvent::Resize(cols, rows) => Some(AppEvent::Resize { cols, rows }),
        _ => None,
    }
}
