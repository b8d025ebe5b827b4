//! Trailing debounce for continuous input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Classic trailing debounce.
///
/// Each submitted value replaces the pending one and re-arms the timer;
/// once the input goes quiet for the whole window, the last value is
/// handed to `on_settle`. Cancelling (or dropping) discards the pending
/// value, so nothing fires after the owner is gone.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce worker. Must be called inside a tokio runtime.
    pub fn spawn(window: Duration, on_settle: impl Fn(T) + Send + 'static) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(run_debounce(rx, window, on_settle, cancel.clone()));
        Self { tx, cancel }
    }

    /// Replace the pending value and restart the debounce window.
    pub fn submit(&self, value: T) {
        let _ = self.tx.send(value);
    }

    /// Discard the pending value and stop the worker.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_debounce<T>(
    mut rx: mpsc::UnboundedReceiver<T>,
    window: Duration,
    on_settle: impl Fn(T),
    cancel: CancellationToken,
) {
    let mut pending: Option<T> = None;
    let mut deadline = Instant::now();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            value = rx.recv() => match value {
                Some(value) => {
                    pending = Some(value);
                    deadline = Instant::now() + window;
                }
                None => break,
            },
            _ = sleep_until(deadline), if pending.is_some() => {
                if let Some(value) = pending.take() {
                    on_settle(value);
                }
            }
        }
    }
}
