//! Effect execution
//!
//! [`EffectRunner`] turns the [`Effect`]s produced by
//! [`crate::state::update`] into work on the tokio runtime. Every HTTP call
//! runs in its own task and reports back as a [`Msg`]; the board never
//! waits on the network.

use std::io;
use std::time::Duration;

use eisen_protocol::MatrixId;
use eisen_utils::Result;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::state::{Effect, Msg, Request};
use crate::sync::Poller;
use crate::ui::clipboard;

/// Perform one write against the API
pub async fn perform(api: &ApiClient, matrix_id: &MatrixId, request: &Request) -> Result<()> {
    match request {
        Request::CreateTask(body) => api.create_task(matrix_id, body).await.map(|_| ()),
        Request::UpdateTask(task_id, body) => {
            api.update_task(matrix_id, *task_id, body).await.map(|_| ())
        }
        Request::DeleteTask(task_id) => api.delete_task(matrix_id, *task_id).await,
        Request::CreateLabel(body) => api.create_label(matrix_id, body).await.map(|_| ()),
        Request::UpdateLabel(label_id, body) => {
            api.update_label(matrix_id, *label_id, body).await.map(|_| ())
        }
        Request::DeleteLabel(label_id) => api.delete_label(matrix_id, *label_id).await,
    }
}

/// Runs effects and owns the poller
pub struct EffectRunner {
    api: ApiClient,
    tx: mpsc::UnboundedSender<Msg>,
    poll_interval: Duration,
    poller: Option<Poller>,
}

impl EffectRunner {
    pub fn new(api: ApiClient, tx: mpsc::UnboundedSender<Msg>, poll_interval: Duration) -> Self {
        Self {
            api,
            tx,
            poll_interval,
            poller: None,
        }
    }

    /// Currently running poller, if any
    pub fn poller(&self) -> Option<&Poller> {
        self.poller.as_ref()
    }

    pub fn run_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    /// Start one effect; HTTP work is spawned and returns immediately
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::CreateMatrix => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.create_matrix().await;
                    let _ = tx.send(Msg::MatrixCreated(result));
                });
            }
            Effect::Fetch(matrix_id) => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.fetch_matrix(&matrix_id).await;
                    let _ = tx.send(Msg::Synced { matrix_id, result });
                });
            }
            Effect::StartPolling(matrix_id) => {
                // Replacing the old poller drops it, which cancels it
                self.poller = Some(Poller::spawn(matrix_id, self.poll_interval, self.tx.clone()));
            }
            Effect::StopPolling => {
                self.poller = None;
            }
            Effect::Mutate { matrix_id, request } => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = perform(&api, &matrix_id, &request).await;
                    let _ = tx.send(Msg::MutationDone {
                        matrix_id,
                        request,
                        result,
                    });
                });
            }
            Effect::CopyToClipboard(text) => {
                if let Err(e) = clipboard::copy(&mut io::stdout(), &text) {
                    tracing::warn!("Failed to copy to clipboard: {}", e);
                }
            }
        }
    }
}
