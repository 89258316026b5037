#![forbid(unsafe_code)]

//! A spring with at most one pending, delayed retarget.
//!
//! A [`Track`] is one animated property (a clip radius, a y offset, an
//! opacity). Orchestrators drive it with [`Track::retarget`], optionally
//! delayed. The track owns a single pending slot: a second retarget before
//! the first one fires replaces it instead of queueing behind it, so a
//! track never accumulates stale work no matter how fast it is redirected.
//!
//! While a retarget is pending, the spring keeps converging toward its
//! previous target. When the delay elapses the spring picks up the new
//! target and params from its current position and velocity.
//!
//! # Invariants
//!
//! 1. `pending_count()` is 0 or 1.
//! 2. Every retarget reports `started` exactly once, unless it is replaced
//!    first.
//! 3. `settled` is reported once per start, on the step the spring comes
//!    to rest with nothing pending.

use std::time::Duration;

use super::Animation;
use super::spring::{Spring, SpringParams};

/// Outcome of a single [`Track::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackStep {
    /// A pending retarget took effect during this step.
    pub started: bool,
    /// The track came to rest during this step.
    pub settled: bool,
}

#[derive(Debug, Clone, Copy)]
struct PendingRetarget {
    target: f64,
    params: SpringParams,
    remaining: Duration,
    kick: f64,
}

/// One animated property.
#[derive(Debug, Clone)]
pub struct Track {
    spring: Spring,
    pending: Option<PendingRetarget>,
}

impl Track {
    /// A track at rest on `value`.
    #[must_use]
    pub fn resting(value: f64, params: SpringParams) -> Self {
        Self {
            spring: Spring::resting(value).with_params(params),
            pending: None,
        }
    }

    /// Schedule a move to `target` after `delay`.
    ///
    /// `kick` is added to the spring's velocity when the move starts. Any
    /// retarget still waiting is discarded. Returns `true` if one was.
    pub fn retarget(
        &mut self,
        target: f64,
        params: SpringParams,
        delay: Duration,
        kick: f64,
    ) -> bool {
        self.pending
            .replace(PendingRetarget {
                target,
                params,
                remaining: delay,
                kick,
            })
            .is_some()
    }

    /// Move to `value` immediately without animating.
    pub fn jump_to(&mut self, value: f64) {
        self.pending = None;
        self.spring.jump_to(value);
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: Duration) -> TrackStep {
        let mut step = TrackStep::default();
        let mut dt = dt;

        if let Some(pending) = self.pending.as_mut() {
            if dt < pending.remaining {
                pending.remaining -= dt;
                self.spring.advance(dt);
                return step;
            }
            let fire = *pending;
            self.pending = None;
            self.spring.advance(fire.remaining);
            dt -= fire.remaining;

            self.spring.set_params(fire.params);
            self.spring.set_target(fire.target);
            self.spring.impulse(fire.kick);
            step.started = true;
        }

        let was_resting = self.spring.is_at_rest();
        self.spring.advance(dt);
        step.settled = (step.started || !was_resting) && self.spring.is_at_rest();
        step
    }

    /// Where this track is ultimately headed, including a pending retarget.
    #[must_use]
    pub fn destination(&self) -> f64 {
        self.pending.map_or(self.spring.target(), |p| p.target)
    }

    /// Number of retargets waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    /// Time left before the pending retarget fires.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(|p| p.remaining)
    }

    /// The underlying spring.
    #[must_use]
    pub fn spring(&self) -> &Spring {
        &self.spring
    }
}

impl Animation for Track {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.pending.is_none() && self.spring.is_at_rest()
    }

    fn value(&self) -> f64 {
        self.spring.position()
    }

    fn reset(&mut self) {
        self.pending = None;
        self.spring.reset();
    }
}
