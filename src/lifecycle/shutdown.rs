//! Shutdown coordination.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
/// Subscribe before triggering; a receiver created after the trigger will
/// not see it.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait up to `grace` for `handle` to finish, aborting it afterwards.
///
/// Returns `true` if the task exited on its own.
pub async fn drain<T>(name: &str, mut handle: JoinHandle<T>, grace: Duration) -> bool {
    match tokio::time::timeout(grace, &mut handle).await {
        Ok(Ok(_)) => {
            tracing::info!(task = name, "Task stopped");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(task = name, error = %e, "Task failed during shutdown");
            true
        }
        Err(_) => {
            tracing::warn!(task = name, grace = ?grace, "Task did not stop within grace period, aborting");
            handle.abort();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 1);

        shutdown.trigger();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_drain_cooperative_task() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        let handle = tokio::spawn(async move {
            let _ = rx.recv().await;
        });

        shutdown.trigger();
        assert!(drain("worker", handle, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_drain_aborts_stuck_task() {
        let handle = tokio::spawn(std::future::pending::<()>());
        assert!(!drain("stuck", handle, Duration::from_millis(20)).await);
    }
}
