#![forbid(unsafe_code)]

//! Trailing-edge coalescing for resize bursts.
//!
//! Dragging a window edge can produce a resize notification per frame or
//! faster. Consumers that only ever look at the latest size can route those
//! notifications through a [`ResizeCoalescer`] and act once the burst has
//! gone quiet.
//!
//! # Design
//!
//! "Latest wins": each [`push`](ResizeCoalescer::push) overwrites the
//! pending size and restarts the quiet window. [`poll`](ResizeCoalescer::poll)
//! releases the pending size once `window` has passed since the last push.
//! A zero window releases every size from `push` directly.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use web_time::Instant;
//! use c3_core::geometry::Dimensions;
//! use c3_core::resize_coalescer::ResizeCoalescer;
//!
//! let mut coalescer = ResizeCoalescer::new(Duration::from_millis(50));
//! let t0 = Instant::now();
//! assert!(coalescer.push(Dimensions::new(800.0, 600.0), t0).is_none());
//! assert!(coalescer.push(Dimensions::new(820.0, 610.0), t0).is_none());
//! assert!(coalescer.poll(t0 + Duration::from_millis(10)).is_none());
//!
//! let settled = coalescer.poll(t0 + Duration::from_millis(60));
//! assert_eq!(settled, Some(Dimensions::new(820.0, 610.0)));
//! ```

use std::time::Duration;

use web_time::Instant;

use crate::geometry::Dimensions;

/// Coalesces bursts of resize notifications.
///
/// Not thread-safe; use from the UI event loop.
#[derive(Debug, Clone)]
pub struct ResizeCoalescer {
    window: Duration,
    pending: Option<Dimensions>,
    last_push: Option<Instant>,
    /// Number of pushes folded into the pending size.
    coalesced: u32,
}

impl ResizeCoalescer {
    /// Create a coalescer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_push: None,
            coalesced: 0,
        }
    }

    /// A coalescer that passes every size straight through.
    #[must_use]
    pub fn passthrough() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured quiet window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a new size.
    ///
    /// Returns `Some(size)` when the size should be acted on right away
    /// (zero window), `None` when it was held back.
    pub fn push(&mut self, size: Dimensions, now: Instant) -> Option<Dimensions> {
        if self.window.is_zero() {
            return Some(size);
        }
        if self.pending.is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
        }
        self.pending = Some(size);
        self.last_push = Some(now);
        None
    }

    /// Release the pending size if the burst has gone quiet.
    pub fn poll(&mut self, now: Instant) -> Option<Dimensions> {
        let last = self.last_push?;
        if now.saturating_duration_since(last) >= self.window {
            self.flush()
        } else {
            None
        }
    }

    /// Release the pending size unconditionally.
    pub fn flush(&mut self) -> Option<Dimensions> {
        self.last_push = None;
        self.coalesced = 0;
        self.pending.take()
    }

    /// Whether a size is waiting to be released.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// How many pushes have been folded into the pending size so far.
    #[must_use]
    pub fn coalesced_count(&self) -> u32 {
        self.coalesced
    }
}

impl Default for ResizeCoalescer {
    fn default() -> Self {
        Self::passthrough()
    }
}
