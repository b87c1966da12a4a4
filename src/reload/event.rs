//! Watch events and reload triggers.
//!
//! Raw notify events come in many shapes depending on platform and on how an
//! editor saves. They are folded into [`WatchEvent`] before reaching the
//! monitor, which then only has to handle four cases.

use notify::event::ModifyKind;
use notify::EventKind;

/// A normalized filesystem event for the watched configuration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Content of the watched file changed in place.
    Changed,
    /// A file appeared at the watched path.
    Created,
    /// The watched file was removed or renamed away; the subscription is gone.
    Vanished,
    /// The watch backend reported an error.
    Error(String),
}

impl WatchEvent {
    /// Map a raw notify event. Returns `None` for events that never
    /// require a reload (access, metadata-only changes).
    pub fn classify(event: &notify::Event) -> Option<Self> {
        match event.kind {
            EventKind::Create(_) => Some(WatchEvent::Created),
            EventKind::Modify(ModifyKind::Name(_)) => Some(WatchEvent::Vanished),
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(WatchEvent::Changed),
            EventKind::Remove(_) => Some(WatchEvent::Vanished),
            _ => None,
        }
    }

    /// Map a raw notify callback result.
    pub fn from_notify(result: notify::Result<notify::Event>) -> Option<Self> {
        match result {
            Ok(event) => Self::classify(&event),
            Err(e) => Some(WatchEvent::Error(e.to_string())),
        }
    }
}

/// Why a reload is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    /// The file was written in place.
    Modified,
    /// The file was replaced, or the watch was re-established after loss.
    Recreated,
}

impl ReloadTrigger {
    /// Combine two triggers seen in the same debounce window.
    pub fn merge(self, other: ReloadTrigger) -> ReloadTrigger {
        match (self, other) {
            (ReloadTrigger::Modified, ReloadTrigger::Modified) => ReloadTrigger::Modified,
            _ => ReloadTrigger::Recreated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadTrigger::Modified => "modified",
            ReloadTrigger::Recreated => "recreated",
        }
    }
}

impl std::fmt::Display for ReloadTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
