#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Models the classical mass-spring-damper:
//!
//!   m·a = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag.
//!   - Underdamped (c < 2√(k·m)): overshoots the target before settling
//!   - Critically damped (c = 2√(k·m)): fastest convergence without overshoot
//!   - Overdamped (c > 2√(k·m)): slow convergence, no overshoot
//! - **mass** (m): Inertia. Defaults to 1.
//! - **rest_delta** / **rest_speed**: the spring is at rest once both the
//!   distance to target and the speed drop below these thresholds.
//!
//! # Retargeting
//!
//! [`Spring::set_target`] and [`Spring::set_params`] never touch position or
//! velocity. An in-flight spring that receives a new target bends toward it
//! from wherever it currently is, carrying its momentum, instead of
//! restarting from the initial value.
//!
//! # Invariants
//!
//! 1. Stiffness and mass are always positive; damping is never negative.
//! 2. A spring at rest does not move until its target, params, or velocity
//!    change.
//! 3. On coming to rest, position snaps exactly to target and velocity to 0.
//!
//! # Failure Modes
//!
//! - Very large dt: integration is subdivided into steps of at most 4ms.
//! - Zero damping: oscillates forever; `is_complete()` may never be true.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Minimum stiffness and mass to prevent degenerate springs.
const MIN_POSITIVE: f64 = 0.1;

/// Physical configuration of a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
    /// Inertia.
    pub mass: f64,
    /// Distance to target below which the spring may settle.
    pub rest_delta: f64,
    /// Speed below which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringParams {
    /// Stiffness 100, damping 10, mass 1, rest thresholds sized for pixel
    /// values (0.5 px, 2 px/s).
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_delta: 0.5,
            rest_speed: 2.0,
        }
    }
}

impl SpringParams {
    /// Params with the given stiffness and damping, other fields default.
    #[must_use]
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
        .sanitized()
    }

    /// Critically damped params for stiffness `k` and unit mass.
    #[must_use]
    pub fn critical(k: f64) -> Self {
        let k = k.max(MIN_POSITIVE);
        Self::new(k, 2.0 * k.sqrt())
    }

    /// Set the rest thresholds (builder pattern). Negative inputs take abs.
    #[must_use]
    pub fn with_rest(mut self, rest_delta: f64, rest_speed: f64) -> Self {
        self.rest_delta = rest_delta.abs();
        self.rest_speed = rest_speed.abs();
        self
    }

    /// Damping coefficient at which this spring stops overshooting.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Whether these params allow overshooting the target.
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    fn sanitized(mut self) -> Self {
        self.stiffness = self.stiffness.max(MIN_POSITIVE);
        self.mass = self.mass.max(MIN_POSITIVE);
        self.damping = self.damping.max(0.0);
        self.rest_delta = self.rest_delta.abs();
        self.rest_speed = self.rest_speed.abs();
        self
    }
}

/// A damped harmonic oscillator producing physically-based motion.
///
/// ```
/// use std::time::Duration;
/// use c3_core::animation::{Animation, Spring, SpringParams};
///
/// let mut spring = Spring::new(30.0, 1200.0).with_params(SpringParams::critical(400.0));
/// for _ in 0..120 {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert!(spring.is_at_rest());
/// assert_eq!(spring.value(), 1200.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    params: SpringParams,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            params: SpringParams::default(),
            at_rest: false,
        }
    }

    /// Create a spring resting at `value`.
    #[must_use]
    pub fn resting(value: f64) -> Self {
        Self {
            at_rest: true,
            ..Self::new(value, value)
        }
    }

    /// Replace the physical params (builder pattern).
    #[must_use]
    pub fn with_params(mut self, params: SpringParams) -> Self {
        self.params = params.sanitized();
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity, in units per second.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Active physical params.
    #[inline]
    #[must_use]
    pub fn params(&self) -> SpringParams {
        self.params
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target, keeping position and velocity.
    pub fn set_target(&mut self, target: f64) {
        if self.target != target {
            self.target = target;
            self.wake();
        }
    }

    /// Swap physical params mid-flight, keeping position and velocity.
    pub fn set_params(&mut self, params: SpringParams) {
        self.params = params.sanitized();
        self.wake();
    }

    /// Add to the current velocity. Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        if velocity_delta != 0.0 {
            self.velocity += velocity_delta;
            self.at_rest = false;
        }
    }

    /// Teleport to `value` and rest there.
    pub fn jump_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn wake(&mut self) {
        if (self.position - self.target).abs() > self.params.rest_delta
            || self.velocity.abs() > self.params.rest_speed
        {
            self.at_rest = false;
        } else if self.at_rest {
            // Already within thresholds of the new target.
            self.position = self.target;
            self.velocity = 0.0;
        }
    }

    /// Perform a single semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let spring_force = -self.params.stiffness * displacement;
        let damping_force = -self.params.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / self.params.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        if remaining <= 0.0 {
            return;
        }

        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.params.rest_delta && self.velocity.abs() < self.params.rest_speed {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
