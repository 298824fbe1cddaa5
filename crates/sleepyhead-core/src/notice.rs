//! Timer-scoped transient notices.
//!
//! A `NoticeBoard` holds at most one notice together with its deadline. A new
//! notice replaces the previous one outright, and a notice whose deadline has
//! passed is never reported again. Time is passed in explicitly so callers
//! (and tests) control the clock.

use std::time::{Duration, Instant};

use sleepyhead_types::notice::Notice;

/// Default lifetime of a notice.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug)]
struct ActiveNotice {
    notice: Notice,
    expires_at: Instant,
}

/// Holder for the single visible notice.
#[derive(Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    active: Option<ActiveNotice>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, active: None }
    }

    /// Show `notice` until `now + ttl`, superseding whatever was visible.
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.active = Some(ActiveNotice {
            notice,
            expires_at: now + self.ttl,
        });
    }

    /// The visible notice at `now`, if any.
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.active
            .as_ref()
            .filter(|active| now < active.expires_at)
            .map(|active| &active.notice)
    }

}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}
