#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Everything here advances only when the host calls
//! [`Animation::tick`] with the elapsed frame time; there is no clock or
//! background thread. Identical tick sequences produce identical values.
//!
//! - [`spring`]: damped harmonic oscillator with retargeting.
//! - [`track`]: a spring plus a single pending, delayed retarget.
//! - [`stagger`]: start offsets for orchestrated groups.

pub mod spring;
pub mod stagger;
pub mod track;

use std::time::Duration;

pub use spring::{Spring, SpringParams};
pub use stagger::{StaggerDirection, stagger_offsets, start_order};
pub use track::{Track, TrackStep};

/// A value that evolves as frame time is fed into it.
pub trait Animation {
    /// Advance by `dt` of wall-clock time.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has come to rest.
    fn is_complete(&self) -> bool;

    /// Current animated value.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}
