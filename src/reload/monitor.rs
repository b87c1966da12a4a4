//! Watch monitor: the background reload loop.
//!
//! # States
//! - Subscribing: retrying `watch` on the config path with a fixed back-off
//! - Watching: waiting on events, the debounce deadline, or shutdown
//! - Stopped: shutdown observed or the event channel closed
//!
//! # State Transitions
//! ```text
//! Subscribing → Watching: watch succeeded
//! Watching → Subscribing: Vanished (file removed or renamed away)
//! Subscribing/Watching → Stopped: shutdown signal
//! ```
//!
//! Shutdown is part of every wait, so the loop exits promptly even when the
//! filesystem stays quiet forever.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{broadcast, mpsc};
use tokio::task;
use tokio::time::{self, Instant};

use crate::observability::metrics;
use crate::reload::backend::WatchBackend;
use crate::reload::debounce::Debouncer;
use crate::reload::event::{ReloadTrigger, WatchEvent};
use crate::reload::reloader::ReloadAction;

/// Timing knobs for the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSettings {
    /// Window opened by the first trigger of a burst; one reload fires when it elapses.
    pub debounce: Duration,
    /// Fixed delay between failed subscription attempts.
    pub resubscribe_delay: Duration,
}

impl Default for ReloadSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            resubscribe_delay: Duration::from_secs(5),
        }
    }
}

/// Why the monitor loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    Shutdown,
    ChannelClosed,
}

/// Owns the watch subscription and drives reloads.
pub struct WatchMonitor<B, A> {
    path: PathBuf,
    backend: B,
    events: mpsc::UnboundedReceiver<WatchEvent>,
    action: A,
    debouncer: Debouncer,
    settings: ReloadSettings,
}

impl<B, A> WatchMonitor<B, A>
where
    B: WatchBackend,
    A: ReloadAction,
{
    pub fn new(
        path: &Path,
        backend: B,
        events: mpsc::UnboundedReceiver<WatchEvent>,
        action: A,
        settings: ReloadSettings,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            backend,
            events,
            action,
            debouncer: Debouncer::new(settings.debounce),
            settings,
        }
    }

    /// Run until `shutdown` fires (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> MonitorExit {
        if !self.subscribe(&mut shutdown).await {
            tracing::info!("Config watcher stopped before subscribing");
            return MonitorExit::Shutdown;
        }

        let exit = loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                biased;

                _ = shutdown.recv() => break MonitorExit::Shutdown,

                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire_due();
                }

                event = self.events.recv() => match event {
                    Some(event) => {
                        if !self.handle_event(event, &mut shutdown).await {
                            break MonitorExit::Shutdown;
                        }
                    }
                    None => break MonitorExit::ChannelClosed,
                },
            }
        };

        match exit {
            MonitorExit::Shutdown => tracing::info!("Config watcher received shutdown signal, exiting loop"),
            MonitorExit::ChannelClosed => tracing::warn!("Config watcher event channel closed, exiting loop"),
        }
        self.backend.unwatch(&self.path);
        exit
    }

    /// Returns false if shutdown was observed while handling the event.
    async fn handle_event(
        &mut self,
        event: WatchEvent,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        match event {
            WatchEvent::Changed => {
                tracing::debug!(path = %self.path.display(), "Config file changed");
                self.debouncer.push(ReloadTrigger::Modified, Instant::now());
            }
            WatchEvent::Created => {
                tracing::debug!(path = %self.path.display(), "Config file created");
                self.debouncer.push(ReloadTrigger::Recreated, Instant::now());
            }
            WatchEvent::Vanished => {
                tracing::info!(
                    path = %self.path.display(),
                    "Config file removed or renamed, re-adding watch"
                );
                self.backend.unwatch(&self.path);
                if !self.subscribe(shutdown).await {
                    return false;
                }
                // Content may differ after a replace.
                self.debouncer.push(ReloadTrigger::Recreated, Instant::now());
            }
            WatchEvent::Error(message) => {
                tracing::warn!(path = %self.path.display(), error = %message, "Error watching config file");
            }
        }
        true
    }

    fn fire_due(&mut self) {
        if let Some((trigger, coalesced)) = self.debouncer.take_due(Instant::now()) {
            tracing::debug!(trigger = %trigger, coalesced, "Debounce window elapsed");
            let action = &mut self.action;
            // Loading and compiling block on disk I/O.
            match Handle::current().runtime_flavor() {
                RuntimeFlavor::MultiThread => task::block_in_place(|| action.reload(trigger)),
                _ => action.reload(trigger),
            }
        }
    }

    /// Retry `watch` until it succeeds. Returns false on shutdown.
    async fn subscribe(&mut self, shutdown: &mut broadcast::Receiver<()>) -> bool {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            metrics::record_subscribe_attempt();

            match self.backend.watch(&self.path) {
                Ok(()) => {
                    tracing::info!(path = %self.path.display(), attempt, "Watching config file for changes");
                    return true;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        retry_in = ?self.settings.resubscribe_delay,
                        "Failed to watch config file, retrying"
                    );
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.recv() => return false,
                _ = time::sleep(self.settings.resubscribe_delay) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::reload::backend::WatchError;

    struct NullBackend;

    impl WatchBackend for NullBackend {
        fn watch(&mut self, _: &Path) -> Result<(), WatchError> {
            Ok(())
        }
        fn unwatch(&mut self, _: &Path) {}
    }

    #[derive(Clone, Default)]
    struct Counter(Arc<AtomicUsize>);

    impl ReloadAction for Counter {
        fn reload(&mut self, _: ReloadTrigger) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn settings() -> ReloadSettings {
        ReloadSettings {
            debounce: Duration::from_millis(50),
            resubscribe_delay: Duration::from_millis(20),
        }
    }

    #[tokio::test]
    async fn test_channel_close_stops_loop() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let counter = Counter::default();
        let monitor = WatchMonitor::new(Path::new("c.yaml"), NullBackend, rx, counter, settings());

        drop(tx);
        assert_eq!(monitor.run(shutdown_rx).await, MonitorExit::ChannelClosed);
    }

    #[tokio::test]
    async fn test_single_change_reloads_once() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let counter = Counter::default();
        let monitor =
            WatchMonitor::new(Path::new("c.yaml"), NullBackend, rx, counter.clone(), settings());
        let handle = tokio::spawn(monitor.run(shutdown_rx));

        tx.send(WatchEvent::Changed).unwrap();
        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);

        shutdown_tx.send(()).unwrap();
        assert_eq!(handle.await.unwrap(), MonitorExit::Shutdown);
    }
}
