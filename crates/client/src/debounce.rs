//! Trailing-edge debounce on the tokio timer.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs only the most recent of a burst of calls, `delay` after the burst
/// goes quiet.
///
/// Each [`call`](Self::call) cancels the pending one and restarts the timer.
/// Dropping the debouncer cancels whatever is pending.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task`, replacing any call still waiting for its timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled call has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
