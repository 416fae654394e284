//! Notifications
//!
//! A single visible message that clears itself after a fixed delay. Showing a new message
//! replaces the old one and restarts the delay; there is no queue.
//!
//! Clearing is modelled as a scheduled task: [`Notifications::show_at`] returns a
//! [`ScheduledClear`] handle for whatever timer drives the view. Firing a handle that has
//! been superseded by a newer notification does nothing.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_NOTIFICATION_DELAY;

/// Handle for the pending clear of one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledClear {
    generation: u64,
    due: Instant,
}

impl ScheduledClear {
    /// When the notification should disappear.
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Generation of the notification this clear belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    clear: ScheduledClear,
}

/// Notification slot
#[derive(Debug, Clone)]
pub struct Notifications {
    current: Option<Notice>,
    delay: Duration,
    generation: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DELAY)
    }
}

impl Notifications {
    /// Create an empty slot whose messages last `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            current: None,
            delay,
            generation: 0,
        }
    }

    /// How long each message stays visible.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Show `message` from `now`, replacing any visible message and cancelling its clear.
    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) -> ScheduledClear {
        self.generation += 1;

        let clear = ScheduledClear {
            generation: self.generation,
            due: now.checked_add(self.delay).unwrap_or(now),
        };

        self.current = Some(Notice {
            message: message.into(),
            clear,
        });

        clear
    }

    /// Show `message` starting now.
    pub fn show(&mut self, message: impl Into<String>) -> ScheduledClear {
        self.show_at(message, Instant::now())
    }

    /// The message visible at `now`, if any.
    pub fn current(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notice| now < notice.clear.due)
            .map(|notice| notice.message.as_str())
    }

    /// Pending clear for the visible message.
    pub fn scheduled(&self) -> Option<ScheduledClear> {
        self.current.as_ref().map(|notice| notice.clear)
    }

    /// Drop the visible message if its delay has elapsed by `now`.
    ///
    /// Returns `true` if a message was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.scheduled() {
            Some(clear) if now >= clear.due => self.fire(clear),
            _ => false,
        }
    }

    /// Apply a scheduled clear. Stale handles are ignored.
    ///
    /// Returns `true` if a message was cleared.
    pub fn fire(&mut self, clear: ScheduledClear) -> bool {
        if self.scheduled() == Some(clear) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Clear the visible message immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Number of notifications shown so far.
    pub fn shown(&self) -> u64 {
        self.generation
    }
}
