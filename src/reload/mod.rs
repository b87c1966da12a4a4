//! Live configuration reloading subsystem.
//!
//! # Data Flow
//! ```text
//! notify callback
//!     → event.rs (normalize to WatchEvent)
//!     → monitor.rs (single select point: events / debounce deadline / shutdown)
//!     → debounce.rs (burst → one ReloadTrigger)
//!     → reloader.rs (load config + compile template)
//!     → store.rs (atomic publish of the pair)
//!     → http handlers read a Snapshot per request
//! ```
//!
//! # Design Decisions
//! - One background task owns the subscription and runs every reload, so
//!   reloads are totally ordered and never overlap
//! - Losing the subscription (remove, rename) is normal; the monitor
//!   re-subscribes in a loop with a fixed back-off
//! - A failed reload publishes nothing; the last good snapshot stays live

pub mod backend;
pub mod debounce;
pub mod event;
pub mod monitor;
pub mod reloader;
pub mod store;

pub use backend::{NotifyBackend, WatchBackend, WatchError};
pub use event::{ReloadTrigger, WatchEvent};
pub use monitor::{MonitorExit, ReloadSettings, WatchMonitor};
pub use reloader::{ReloadAction, ReloadError, StoreReloader};
pub use store::{ConfigStore, Snapshot};
