//! Live-document subscriptions with explicit teardown.
//!
//! External stores push document changes to watchers. Each subscription owns
//! exactly one disposer: dropping the subscription (or calling
//! [`Subscription::unsubscribe`]) runs it once, detaching the watcher from
//! the store. There is no implicit re-subscription; callers that want a new
//! stream ask the store again.

use tokio::sync::watch;

/// A live view of one value, backed by a `watch` channel.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    disposer: Option<Box<dyn FnOnce() + Send>>,
}

impl<T: Clone> Subscription<T> {
    /// Wrap a receiver together with the teardown that detaches it.
    pub fn new(rx: watch::Receiver<T>, disposer: impl FnOnce() + Send + 'static) -> Self {
        Self {
            rx,
            disposer: Some(Box::new(disposer)),
        }
    }

    /// A subscription with no teardown (the channel dies with its sender).
    pub fn without_disposer(rx: watch::Receiver<T>) -> Self {
        Self { rx, disposer: None }
    }

    /// Latest value pushed by the store.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next change. Returns `None` once the store side is gone.
    pub async fn changed(&mut self) -> Option<T> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Tear down explicitly. Equivalent to dropping the subscription.
    pub fn unsubscribe(mut self) {
        self.dispose();
    }

    fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_current_and_changed() {
        let (tx, rx) = watch::channel(0_u32);
        let mut sub = Subscription::without_disposer(rx);
        assert_eq!(sub.current(), 0);

        tx.send(7).unwrap();
        assert_eq!(sub.changed().await, Some(7));

        drop(tx);
        assert_eq!(sub.changed().await, None);
    }

    #[tokio::test]
    async fn test_disposer_runs_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (_tx, rx) = watch::channel(());

        let counted = calls.clone();
        let sub = Subscription::new(rx, move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        sub.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_invokes_disposer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (_tx, rx) = watch::channel(());

        let counted = calls.clone();
        {
            let _sub = Subscription::new(rx, move || {
                counted.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
