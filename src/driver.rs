//! Runs the side effects requested by the summarizer state.
//!
//! Each effect reports back through an unbounded channel. The event type is
//! generic so the TUI can multiplex summarizer messages with terminal input.

use crate::client::SummarizerClient;
use crate::config::ProgressConfig;
use crate::progress::ProgressTicker;
use crate::selection::SelectedFile;
use crate::state::{Command, Msg, RequestId, SummarizerState};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};

pub struct Effects<E> {
    client: Arc<SummarizerClient>,
    timing: ProgressConfig,
    tx: UnboundedSender<E>,
}

impl<E> Effects<E>
where
    E: From<Msg> + Send + 'static,
{
    pub fn new(client: Arc<SummarizerClient>, timing: ProgressConfig, tx: UnboundedSender<E>) -> Self {
        Self { client, timing, tx }
    }

    /// Start the effect in the background. Must be called within a tokio runtime.
    pub fn run(&self, command: Command) {
        match command {
            Command::Send { id, file } => self.spawn_request(id, file),
            Command::Settle { id } => self.spawn_settle(id),
        }
    }

    fn spawn_request(&self, id: RequestId, file: SelectedFile) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let period = self.timing.tick();

        tokio::spawn(async move {
            let tick_tx = tx.clone();
            let ticker = ProgressTicker::start(period, move || {
                tick_tx.send(Msg::ProgressTick(id).into()).is_ok()
            });

            let outcome = client.summarize(&file).await;
            ticker.stop();

            if tx.send(Msg::Finished { id, outcome }.into()).is_err() {
                tracing::debug!(?id, "response arrived after the view closed");
            }
        });
    }

    fn spawn_settle(&self, id: RequestId) {
        let tx = self.tx.clone();
        let delay = self.timing.settle();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Msg::Settled(id).into());
        });
    }
}

/// Submit the selected file and drive the state until the cycle is back to idle.
///
/// `observe` sees the state after every applied message. Returns immediately
/// if the submission is rejected (no file selected, or already loading).
pub async fn run_cycle<F>(
    state: &mut SummarizerState,
    client: Arc<SummarizerClient>,
    timing: ProgressConfig,
    mut observe: F,
) where
    F: FnMut(&SummarizerState),
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Msg>();
    let effects = Effects::new(client, timing, tx);

    let Some(command) = state.update(Msg::Submit) else {
        observe(state);
        return;
    };
    effects.run(command);
    observe(state);

    while let Some(msg) = rx.recv().await {
        if let Some(command) = state.update(msg) {
            effects.run(command);
        }
        observe(state);
        if !state.is_loading() {
            break;
        }
    }
}
