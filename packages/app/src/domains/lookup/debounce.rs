use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Keystroke debouncer: at most one scheduled lookup per input session.
///
/// Each call to [`Debouncer::schedule`] cancels whatever was pending and, if
/// the trimmed text meets the length threshold and suggestions are active,
/// arms a fresh timer. When the timer fires, the lookup future is spawned as
/// its own task: cancellation is coarse — it stops timers that have not
/// fired, never a request already on the wire. Stale responses are the
/// caller's problem (generation counters in the lookup sessions).
pub struct Debouncer {
    delay: Duration,
    min_chars: usize,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration, min_chars: usize) -> Self {
        Self {
            delay,
            min_chars,
            pending: None,
        }
    }

    /// Schedule `run` with the trimmed text after the quiescence interval.
    ///
    /// Always cancels the previous timer first. Does not arm a new one when
    /// `active` is false or the trimmed text is below the threshold.
    pub fn schedule<F, Fut>(&mut self, text: &str, active: bool, run: F)
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let query = text.trim().to_string();
        if !active || query.chars().count() < self.min_chars {
            return;
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach: once fired, the lookup outlives this timer task.
            tokio::spawn(run(query));
        }));
    }

    /// Cancel the pending timer, if any. Safe to call repeatedly.
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
