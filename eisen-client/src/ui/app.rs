use std::time::Duration;

use eisen_protocol::MatrixId;
use eisen_utils::Result;
use tokio::sync::mpsc;

use super::event::{AppEvent, EventHandler};
use super::input::key_to_msg;
use super::terminal::Tui;
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::runtime::EffectRunner;
use crate::state::{update, AppState, Msg, TextEdit};

/// How long the input thread waits before sending a redraw tick
const TICK_RATE: Duration = Duration::from_millis(250);

enum Wake {
    Event(Option<AppEvent>),
    Msg(Option<Msg>),
}

/// The interactive board
pub struct App {
    state: AppState,
    runner: EffectRunner,
    messages: mpsc::UnboundedReceiver<Msg>,
    /// Kept so the message channel never closes while the app runs
    _tx: mpsc::UnboundedSender<Msg>,
    initial: Option<MatrixId>,
}

impl App {
    pub fn new(config: &ClientConfig, initial: Option<MatrixId>) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let (tx, messages) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(api, tx.clone(), config.sync.poll_interval());

        Ok(Self {
            state: AppState::new(config.web.origin.clone()),
            runner,
            messages,
            _tx: tx,
            initial,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run one message through the state machine and start its effects
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if !effects.is_empty() {
            tracing::trace!("Effects: {:?}", effects);
        }
        self.runner.run_all(effects);
    }

    /// Run until the user quits
    pub async fn run(mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        let mut events = EventHandler::new(TICK_RATE);
        events.start_input_polling();

        if let Some(id) = self.initial.take() {
            self.dispatch(Msg::Open(id));
        }

        while !self.state.should_quit {
            tui.draw(&self.state)?;

            let wake = tokio::select! {
                event = events.next() => Wake::Event(event),
                msg = self.messages.recv() => Wake::Msg(msg),
            };

            match wake {
                Wake::Event(Some(event)) => self.handle_event(event, &mut tui)?,
                Wake::Msg(Some(msg)) => self.dispatch(msg),
                Wake::Event(None) | Wake::Msg(None) => break,
            }
        }

        tracing::info!("Board closed");
        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent, tui: &mut Tui) -> Result<()> {
        match event {
            AppEvent::Key(key) => {
                if let Some(msg) = key_to_msg(&self.state, key) {
                    self.dispatch(msg);
                }
            }
            AppEvent::Paste(text) => self.dispatch(Msg::Edit(TextEdit::Paste(text))),
            AppEvent::Resize { .. } => tui.invalidate()?,
            AppEvent::Tick => {}
        }
        Ok(())
    }

    /// Wait for the next completion and apply it
    #[cfg(test)]
    async fn pump(&mut self) {
        let msg = tokio::time::timeout(Duration::from_secs(5), self.messages.recv())
            .await
            .expect("timed out waiting for message")
            .expect("channel closed");
        self.dispatch(msg);
    }
}
