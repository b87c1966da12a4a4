//! Filesystem subscription backends.
//!
//! [`WatchBackend`] is the seam between the monitor state machine and the
//! operating system. Events flow out of a backend through the channel handed
//! back by its constructor, so the monitor never touches notify directly.

use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::reload::event::WatchEvent;

/// Error type for watch subscriptions.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The platform watcher could not be created.
    #[error("failed to start filesystem watcher: {0}")]
    Backend(#[source] notify::Error),

    /// A subscription on `path` could not be established.
    #[error("failed to watch {}: {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Subscribes to change notifications for a single path.
pub trait WatchBackend: Send {
    /// Establish (or re-establish) a subscription on `path`.
    fn watch(&mut self, path: &Path) -> Result<(), WatchError>;

    /// Drop the subscription on `path`. Missing subscriptions are ignored.
    fn unwatch(&mut self, path: &Path);
}

/// [`WatchBackend`] backed by the platform's recommended notify watcher.
pub struct NotifyBackend {
    watcher: RecommendedWatcher,
}

impl NotifyBackend {
    /// Create the watcher. Returns the backend and the receiver its
    /// normalized events are delivered on.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<WatchEvent>), WatchError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            if let Some(event) = WatchEvent::from_notify(res) {
                let _ = tx.send(event);
            }
        })
        .map_err(WatchError::Backend)?;

        Ok((Self { watcher }, rx))
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(&mut self, path: &Path) -> Result<(), WatchError> {
        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Subscribe {
                path: path.to_path_buf(),
                source,
            })
    }

    fn unwatch(&mut self, path: &Path) {
        if let Err(e) = self.watcher.unwatch(path) {
            tracing::debug!(path = %path.display(), error = %e, "Unwatch ignored");
        }
    }
}
