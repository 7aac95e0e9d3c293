//! Shutdown coordination.
//!
//! One `Shutdown` is created at startup. The signal watcher holds a clone
//! and triggers it; the HTTP server waits on [`Shutdown::signalled`] and
//! drains its connections once it resolves.

use std::future::Future;

use tokio::sync::broadcast;

/// Broadcast trigger that stops the server and any background tasks.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for tasks that poll the trigger themselves.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Future that resolves once [`Shutdown::trigger`] is called, or once
    /// every `Shutdown` handle is dropped.
    ///
    /// Subscribes immediately, so a trigger fired after this call but
    /// before the first poll is not missed.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Fire the trigger. Waiters that subscribed earlier all wake.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of waiters still subscribed.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.clone().subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();
        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_signalled_sees_trigger_before_first_poll() {
        let shutdown = Shutdown::new();
        let waiter = shutdown.signalled();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signalled future did not resolve");
    }

    #[tokio::test]
    async fn test_signalled_resolves_when_dropped() {
        let shutdown = Shutdown::new();
        let waiter = shutdown.signalled();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signalled future did not resolve");
    }
}
