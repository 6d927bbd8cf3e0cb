// ── Trailing-edge debounce ──
//
// Coalesces rapid field-edit events into one delayed lookup. Timers are
// abort-and-replace: each new call aborts the pending sleep task before
// scheduling a new one, so only the last call within the window runs.
// Tests drive this with tokio's paused clock instead of real timers.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::trace;

/// A cancellable trailing-edge delay.
///
/// Owned by a controller instance; not shared across field groups.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule `action` to run after the window elapses, aborting any
    /// previously scheduled action first.
    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            action.await;
        });

        trace!(?window, "debounce scheduled");
        self.pending = Some(handle.abort_handle());
    }

    /// Abort the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
