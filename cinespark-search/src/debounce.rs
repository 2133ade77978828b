//! Debounced search-as-you-type input.
//!
//! Terms pushed while the user is typing are held until the input has been
//! quiet for the configured delay; only the latest term is then emitted.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle feeding a background debounce task.
///
/// Created with [`SearchDebouncer::spawn`], which also returns the receiver
/// settled terms arrive on. The receiver closes once the handle is closed or
/// dropped and any pending term has been flushed.
#[derive(Debug)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Starts a debounce task with the given quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output, output_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(delay, input_rx, output));

        (Self { input, task }, output_rx)
    }

    /// Records a new term and restarts the quiet period.
    ///
    /// Returns `false` when the debounce task is no longer running.
    pub fn push(&self, term: impl Into<String>) -> bool {
        self.input.send(term.into()).is_ok()
    }

    /// Stops accepting input, flushes any pending term and waits for the task.
    pub async fn close(self) {
        drop(self.input);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Search debounce task ended abnormally");
        }
    }
}

async fn run(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
) {
    let mut pending: Option<String> = None;
    let mut last_emitted: Option<String> = None;

    loop {
        let Some(term) = pending.take() else {
            match input.recv().await {
                Some(term) => pending = Some(term),
                None => break,
            }
            continue;
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(next) => pending = Some(next),
                None => {
                    emit(term, &mut last_emitted, &output);
                    break;
                }
            },
            () = tokio::time::sleep(delay) => {
                if !emit(term, &mut last_emitted, &output) {
                    break;
                }
            }
        }
    }

    tracing::debug!("Search debounce task finished");
}

/// Sends a settled term unless it repeats the previous one.
///
/// Returns `false` once the receiving side is gone.
fn emit(term: String, last_emitted: &mut Option<String>, output: &mpsc::UnboundedSender<String>) -> bool {
    let term = term.trim().to_string();
    if last_emitted.as_deref() == Some(term.as_str()) {
        tracing::trace!(term = %term, "Skipping repeated search term");
        return true;
    }

    tracing::debug!(term = %term, "Search term settled");
    *last_emitted = Some(term.clone());
    output.send(term).is_ok()
}
