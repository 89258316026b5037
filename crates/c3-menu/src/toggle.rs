#![forbid(unsafe_code)]

//! The hamburger/close button.
//!
//! The control never changes the menu phase itself. Activating it only
//! invokes the callback the layout handed down; the new phase comes back
//! through [`MenuToggle::apply`] like it does for every other part of the
//! menu.
//!
//! The icon is three bars. A single morph value drives all of them:
//! 0 is the hamburger, 1 is the close cross.

use std::time::Duration;

use c3_core::animation::{Animation, Track, TrackStep};

use crate::config::ToggleConfig;
use crate::event::{Channel, EventLog, MenuEvent};
use crate::state::MenuPhase;

/// Which icon the control shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToggleIcon {
    /// Three horizontal bars.
    #[default]
    Hamburger,
    /// A cross.
    Close,
}

impl ToggleIcon {
    /// Icon for a phase.
    #[must_use]
    pub const fn for_phase(phase: MenuPhase) -> Self {
        match phase {
            MenuPhase::Closed => Self::Hamburger,
            MenuPhase::Open => Self::Close,
        }
    }

    /// Accessible label for the button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hamburger => "Open menu",
            Self::Close => "Close menu",
        }
    }
}

/// Bar transforms for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleBars {
    /// Top bar rotation in degrees.
    pub top_rotation: f64,
    /// Middle bar opacity.
    pub middle_opacity: f64,
    /// Bottom bar rotation in degrees.
    pub bottom_rotation: f64,
}

/// The menu's toggle control.
#[derive(Debug, Clone)]
pub struct MenuToggle {
    phase: MenuPhase,
    morph: Track,
}

impl MenuToggle {
    /// A hamburger at rest.
    #[must_use]
    pub fn new(config: &ToggleConfig) -> Self {
        Self {
            phase: MenuPhase::Closed,
            morph: Track::resting(0.0, config.spring.params()),
        }
    }

    /// Follow `phase`. The morph starts on the next advance.
    pub fn apply(&mut self, phase: MenuPhase, config: &ToggleConfig, events: &mut EventLog) {
        self.phase = phase;
        let target = if phase.is_open() { 1.0 } else { 0.0 };
        self.morph
            .retarget(target, config.spring.params(), Duration::ZERO, 0.0);
        events.push(MenuEvent::Scheduled {
            channel: Channel::Toggle,
            phase,
            delay: Duration::ZERO,
        });
    }

    /// Report a press to the owner.
    pub fn activate(&self, on_toggle: &mut dyn FnMut()) {
        on_toggle();
    }

    /// Advance the morph by `dt`.
    pub fn advance(&mut self, dt: Duration) -> TrackStep {
        self.morph.advance(dt)
    }

    /// Icon for the current phase.
    #[must_use]
    pub fn icon(&self) -> ToggleIcon {
        ToggleIcon::for_phase(self.phase)
    }

    /// Morph progress from hamburger (0) to cross (1).
    #[must_use]
    pub fn morph(&self) -> f64 {
        self.morph.value()
    }

    /// Bar transforms at the current morph.
    #[must_use]
    pub fn bars(&self) -> ToggleBars {
        let t = self.morph();
        ToggleBars {
            top_rotation: 45.0 * t,
            middle_opacity: (1.0 - t).clamp(0.0, 1.0),
            bottom_rotation: -45.0 * t,
        }
    }

    /// Whether the morph is at rest with nothing pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.morph.is_complete()
    }

    /// Retargets waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.morph.pending_count()
    }
}
