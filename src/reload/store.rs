//! Published configuration state.
//!
//! Holds the current (configuration, template) pair as a single immutable
//! [`Snapshot`] behind an [`ArcSwap`]. Readers take a reference-counted handle
//! to the whole snapshot, so a pair is always observed together and a handle
//! already given out never changes underneath its holder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;

use crate::config::DashboardConfig;
use crate::template::PageTemplate;

/// One published version of the dashboard state.
#[derive(Debug)]
pub struct Snapshot {
    pub config: DashboardConfig,
    pub template: PageTemplate,
    /// Monotonic publish counter, starting at 1 for the startup load.
    pub version: u64,
    pub published_at: SystemTime,
}

/// Thread-safe holder of the current [`Snapshot`].
///
/// `read` is wait-free. `swap` is expected to be called from a single
/// task; concurrent swaps are still safe but their order is unspecified.
pub struct ConfigStore {
    current: ArcSwap<Snapshot>,
    version: AtomicU64,
}

impl ConfigStore {
    /// Create a store publishing the startup pair as version 1.
    pub fn new(config: DashboardConfig, template: PageTemplate) -> Self {
        let snapshot = Snapshot {
            config,
            template,
            version: 1,
            published_at: SystemTime::now(),
        };
        Self {
            current: ArcSwap::from_pointee(snapshot),
            version: AtomicU64::new(1),
        }
    }

    /// Current snapshot. Stable for as long as the caller holds it.
    pub fn read(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Publish a new pair, returning its version.
    pub fn swap(&self, config: DashboardConfig, template: PageTemplate) -> u64 {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Snapshot {
            config,
            template,
            version,
            published_at: SystemTime::now(),
        };
        self.current.store(Arc::new(snapshot));
        version
    }

    /// Version of the currently published snapshot.
    pub fn version(&self) -> u64 {
        self.current.load().version
    }
}
