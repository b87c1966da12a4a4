//! Trigger debouncing.
//!
//! A single save usually produces several raw events (truncate, write,
//! close). The [`Debouncer`] opens a fixed window on the first trigger of a
//! cluster and releases one merged trigger when that window elapses. Later
//! triggers in the same cluster never move the deadline, so a file that is
//! written continuously still reloads once per window.

use std::time::Duration;

use tokio::time::Instant;

use crate::reload::event::ReloadTrigger;

#[derive(Debug)]
struct Pending {
    trigger: ReloadTrigger,
    deadline: Instant,
    coalesced: usize,
}

/// Fixed-window debouncer for reload triggers.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a trigger observed at `now`. Opens a window if none is pending.
    pub fn push(&mut self, trigger: ReloadTrigger, now: Instant) {
        self.pending = Some(match self.pending.take() {
            Some(p) => Pending {
                trigger: p.trigger.merge(trigger),
                deadline: p.deadline,
                coalesced: p.coalesced + 1,
            },
            None => Pending {
                trigger,
                deadline: now + self.window,
                coalesced: 1,
            },
        });
    }

    /// When the pending trigger becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending trigger if its deadline has passed at `now`.
    /// Returns the merged trigger and how many raw triggers it covers.
    pub fn take_due(&mut self, now: Instant) -> Option<(ReloadTrigger, usize)> {
        match &self.pending {
            Some(p) if p.deadline <= now => {
                self.pending.take().map(|p| (p.trigger, p.coalesced))
            }
            _ => None,
        }
    }
}
