#![forbid(unsafe_code)]

//! Shared animation context handed from the shell to its descendants.
//!
//! The shell is the only component that turns the phase into motion. It
//! builds one [`AnimationContext`] per phase change and passes it down by
//! reference; the navigation list, each entry, and the toggle control
//! derive their own targets from it and never write back.

use crate::state::MenuPhase;

/// Read-only inputs every menu variant is a function of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationContext {
    /// Logical phase being animated toward.
    pub phase: MenuPhase,
    /// Container height used for geometry, already defaulted if unmeasured.
    pub height: f64,
}

impl AnimationContext {
    /// Build a context.
    #[must_use]
    pub const fn new(phase: MenuPhase, height: f64) -> Self {
        Self { phase, height }
    }

    /// The entry variant for this phase.
    #[must_use]
    pub const fn visual(&self) -> VisualState {
        VisualState::for_phase(self.phase)
    }
}

/// The two named visual states of a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// Offset downward and transparent.
    #[default]
    Hidden,
    /// Natural position, fully opaque.
    Revealed,
}

impl VisualState {
    /// `Open` reveals, `Closed` hides.
    #[must_use]
    pub const fn for_phase(phase: MenuPhase) -> Self {
        match phase {
            MenuPhase::Open => Self::Revealed,
            MenuPhase::Closed => Self::Hidden,
        }
    }
}
