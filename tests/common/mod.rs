//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashboard::reload::{ReloadAction, ReloadSettings, ReloadTrigger, WatchBackend, WatchError};

pub const DEV_TOOLS: &str = r#"
app_categories:
  - name: Dev Tools
    apps:
      - name: Git
        url: http://git.local
search:
  - name: DuckDuckGo
    url: "https://duckduckgo.com/?q="
    prefix: d
"#;

pub const MEDIA: &str = r#"
app_categories:
  - name: Media
    apps:
      - name: Jellyfin
        url: http://jellyfin.local
"#;

pub const NO_CATEGORIES: &str = "app_categories: []\n";

pub const MALFORMED: &str = "app_categories:\n  - name: [unterminated\n";

/// Timing used by monitor tests: short enough to keep tests fast.
pub fn fast_settings() -> ReloadSettings {
    ReloadSettings {
        debounce: Duration::from_millis(50),
        resubscribe_delay: Duration::from_millis(30),
    }
}

pub fn write_file(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    write_file(&path, contents);
    path
}

/// Poll `check` until it returns true or `timeout` elapses.
pub async fn wait_until<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Observable state of a [`FakeBackend`].
#[derive(Default)]
pub struct FakeBackendState {
    pub watch_calls: AtomicUsize,
    pub unwatch_calls: AtomicUsize,
    /// Number of upcoming `watch` calls that fail. `usize::MAX` fails forever.
    pub failures_remaining: AtomicUsize,
}

/// In-memory [`WatchBackend`]. Events are injected by the test through the
/// sender side of the channel given to the monitor.
///
/// With `require_existing_path`, `watch` also fails while the path is
/// missing on disk, like a real backend would.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<FakeBackendState>,
    pub require_existing_path: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requiring_existing_path() -> Self {
        Self {
            require_existing_path: true,
            ..Self::default()
        }
    }

    pub fn fail_next(&self, n: usize) {
        self.state.failures_remaining.store(n, Ordering::SeqCst);
    }

    pub fn watch_calls(&self) -> usize {
        self.state.watch_calls.load(Ordering::SeqCst)
    }

    pub fn unwatch_calls(&self) -> usize {
        self.state.unwatch_calls.load(Ordering::SeqCst)
    }
}

impl WatchBackend for FakeBackend {
    fn watch(&mut self, path: &Path) -> Result<(), WatchError> {
        self.state.watch_calls.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .state
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match n {
                0 => None,
                usize::MAX => Some(usize::MAX),
                n => Some(n - 1),
            })
            .is_ok();

        if failing || (self.require_existing_path && !path.exists()) {
            return Err(WatchError::Subscribe {
                path: path.to_path_buf(),
                source: notify::Error::path_not_found(),
            });
        }
        Ok(())
    }

    fn unwatch(&mut self, _path: &Path) {
        self.state.unwatch_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// [`ReloadAction`] that records every trigger it receives.
#[derive(Clone, Default)]
pub struct RecordingAction {
    pub triggers: Arc<Mutex<Vec<ReloadTrigger>>>,
}

impl RecordingAction {
    pub fn count(&self) -> usize {
        self.triggers.lock().unwrap().len()
    }

    pub fn triggers(&self) -> Vec<ReloadTrigger> {
        self.triggers.lock().unwrap().clone()
    }
}

impl ReloadAction for RecordingAction {
    fn reload(&mut self, trigger: ReloadTrigger) {
        self.triggers.lock().unwrap().push(trigger);
    }
}
