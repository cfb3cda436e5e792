//! Fixed-interval refresh
//!
//! [`Poller`] only keeps time. Each tick becomes a [`Msg::PollTick`] and the
//! state machine decides whether to fetch, so every fetch is counted the
//! same way whatever triggered it.
//!
//! ```rust,ignore
//! let poller = Poller::spawn(id, Duration::from_secs(5), tx.clone());
//! // ...
//! drop(poller); // stops ticking
//! ```

use std::time::Duration;

use eisen_protocol::MatrixId;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::state::Msg;

/// Ticker for one matrix; stops when cancelled or dropped
#[derive(Debug)]
pub struct Poller {
    matrix_id: MatrixId,
    cancel: CancellationToken,
}

impl Poller {
    /// Start ticking every `period`, first tick one period from now
    ///
    /// The immediate fetch on identity change is issued by the state
    /// machine, not by the poller.
    pub fn spawn(matrix_id: MatrixId, period: Duration, tx: mpsc::UnboundedSender<Msg>) -> Self {
        let cancel = CancellationToken::new();
        tokio::spawn(run(matrix_id.clone(), period, tx, cancel.clone()));
        Self { matrix_id, cancel }
    }

    pub fn matrix_id(&self) -> &MatrixId {
        &self.matrix_id
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    matrix_id: MatrixId,
    period: Duration,
    tx: mpsc::UnboundedSender<Msg>,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::debug!("Polling matrix {} every {:?}", matrix_id, period);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if tx.send(Msg::PollTick(matrix_id.clone())).is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!("Stopped polling matrix {}", matrix_id);
}
