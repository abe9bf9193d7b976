//! Debounce controller.
//!
//! Coalesces bursts of edits into at most one action per quiet interval.
//! The scheduled action is an explicit task handle: scheduling again aborts
//! the pending one and replaces it. Once the interval has elapsed the action
//! is detached into its own task, so a later schedule or cancel never aborts
//! work that has already started.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::trace;

/// Cancellable delayed action.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `action` after the quiet interval unless rescheduled first.
    ///
    /// The action is only constructed when the interval elapses, so it can
    /// read whatever state is current at that moment.
    pub async fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().await;

        if let Some(previous) = pending.take() {
            previous.abort();
            trace!("rescheduled pending action");
        }

        let interval = self.interval;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            tokio::spawn(action());
        }));
    }

    /// Drop the pending action, if any. Returns whether one was waiting.
    pub async fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                trace!("cancelled pending action");
                true
            }
            _ => false,
        }
    }

    /// Whether an action is waiting for its interval to elapse.
    pub async fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
