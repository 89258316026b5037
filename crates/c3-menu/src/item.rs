#![forbid(unsafe_code)]

//! A single navigation entry.
//!
//! An entry has no state of its own beyond the animated values. Its
//! [`VisualState`] comes from the navigation list, its start delay comes
//! from the list's stagger, and activating it reports back through a
//! callback supplied by whoever owns the menu flag.
//!
//! Three tracks drive the entry:
//!
//! | Track   | Hidden | Revealed | Notes                          |
//! |---------|--------|----------|--------------------------------|
//! | y       | 50     | 0        | reveal starts with a kick of -100 |
//! | opacity | 0      | 1        |                                |
//! | scale   | 1      | 1        | 1.1 hovered, 0.95 pressed      |
//!
//! Scale is cosmetic and follows pointer interaction only.

use std::time::Duration;

use c3_core::animation::{Animation, Track};
use tracing::trace;

use crate::config::ItemConfig;
use crate::context::VisualState;
use crate::palette::Rgb;

/// Immutable description of one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemDescriptor {
    /// Position in the list. Drives stagger timing and accent color.
    pub index: usize,
    /// Display text.
    pub label: String,
    /// Target path or URL.
    pub href: String,
}

impl MenuItemDescriptor {
    /// Build a descriptor.
    #[must_use]
    pub fn new(index: usize, label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// No pointer over the entry.
    #[default]
    Idle,
    /// Pointer over the entry.
    Hovered,
    /// Pointer pressed on the entry.
    Pressed,
}

/// How the entry was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkActivation {
    /// Plain primary click or Enter.
    #[default]
    Primary,
    /// Primary click with a modifier key held (ctrl, meta, shift).
    Modified,
    /// Middle (auxiliary) click.
    Middle,
}

/// Where a navigation lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Replace the current page.
    SameTab,
    /// Open in a new tab; the current page stays.
    NewTab,
}

/// Result of activating an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNavigation {
    /// Destination.
    pub href: String,
    /// Where it opens.
    pub disposition: LinkDisposition,
}

/// Resolved presentation values for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// Vertical offset from the natural position.
    pub y: f64,
    /// 0 (transparent) to 1 (opaque).
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Border and label color.
    pub accent: Rgb,
}

/// Outcome of a single [`MenuItem::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStep {
    /// The scheduled reveal or hide began moving.
    pub started: bool,
    /// The entry reached its visual target.
    pub settled: bool,
}

/// One animated navigation entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    descriptor: MenuItemDescriptor,
    accent: Rgb,
    visual: VisualState,
    interaction: Interaction,
    y: Track,
    opacity: Track,
    scale: Track,
}

impl MenuItem {
    /// A hidden entry at rest.
    #[must_use]
    pub fn new(descriptor: MenuItemDescriptor, accent: Rgb, config: &ItemConfig) -> Self {
        Self {
            descriptor,
            accent,
            visual: VisualState::Hidden,
            interaction: Interaction::Idle,
            y: Track::resting(config.hidden_offset_y, config.hide_spring.params()),
            opacity: Track::resting(0.0, config.opacity_spring.params()),
            scale: Track::resting(1.0, config.scale_spring.params()),
        }
    }

    /// Head toward `visual`, starting after `delay`.
    ///
    /// Any move still waiting for its delay is replaced. Hiding drops
    /// pointer interaction.
    pub fn set_visual(&mut self, visual: VisualState, delay: Duration, config: &ItemConfig) {
        self.visual = visual;
        match visual {
            VisualState::Revealed => {
                self.y.retarget(
                    0.0,
                    config.reveal_spring.params(),
                    delay,
                    config.reveal_velocity,
                );
                self.opacity
                    .retarget(1.0, config.opacity_spring.params(), delay, 0.0);
            }
            VisualState::Hidden => {
                self.y.retarget(
                    config.hidden_offset_y,
                    config.hide_spring.params(),
                    delay,
                    0.0,
                );
                self.opacity
                    .retarget(0.0, config.opacity_spring.params(), delay, 0.0);
                self.set_interaction(Interaction::Idle, config);
            }
        }
    }

    /// Update pointer interaction. Ignored while hidden.
    ///
    /// Returns whether the interaction changed.
    pub fn set_interaction(&mut self, interaction: Interaction, config: &ItemConfig) -> bool {
        let interaction = if self.is_interactive() {
            interaction
        } else {
            Interaction::Idle
        };
        if interaction == self.interaction {
            return false;
        }
        self.interaction = interaction;
        let scale = match interaction {
            Interaction::Idle => 1.0,
            Interaction::Hovered => config.hover_scale,
            Interaction::Pressed => config.press_scale,
        };
        self.scale
            .retarget(scale, config.scale_spring.params(), Duration::ZERO, 0.0);
        true
    }

    /// Activate the entry.
    ///
    /// `on_activate` runs before this returns, so the menu owner can close
    /// the menu in the same gesture. Middle clicks open a new tab without
    /// running it. Hidden entries ignore activation and return `None`.
    pub fn activate(
        &mut self,
        activation: LinkActivation,
        on_activate: &mut dyn FnMut(),
    ) -> Option<LinkNavigation> {
        if !self.is_interactive() {
            trace!(index = self.descriptor.index, "activation ignored while hidden");
            return None;
        }
        let disposition = match activation {
            LinkActivation::Primary => {
                on_activate();
                LinkDisposition::SameTab
            }
            LinkActivation::Modified => {
                on_activate();
                LinkDisposition::NewTab
            }
            LinkActivation::Middle => LinkDisposition::NewTab,
        };
        Some(LinkNavigation {
            href: self.descriptor.href.clone(),
            disposition,
        })
    }

    /// Advance all tracks by `dt`.
    pub fn advance(&mut self, dt: Duration) -> ItemStep {
        let y = self.y.advance(dt);
        let opacity = self.opacity.advance(dt);
        self.scale.advance(dt);
        ItemStep {
            started: y.started || opacity.started,
            settled: (y.settled || opacity.settled)
                && self.y.is_complete()
                && self.opacity.is_complete(),
        }
    }

    /// Current presentation values.
    #[must_use]
    pub fn style(&self) -> ItemStyle {
        ItemStyle {
            y: self.y.value(),
            opacity: self.opacity.value().clamp(0.0, 1.0),
            scale: self.scale.value(),
            accent: self.accent,
        }
    }

    /// Whether the entry responds to pointer input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.visual == VisualState::Revealed
    }

    /// Whether every track is at rest with nothing pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.y.is_complete() && self.opacity.is_complete() && self.scale.is_complete()
    }

    /// Retargets waiting for their delay, across all tracks.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.y.pending_count() + self.opacity.pending_count() + self.scale.pending_count()
    }

    /// Time until the scheduled reveal or hide starts.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.y.pending_delay()
    }

    /// Visual target.
    #[must_use]
    pub fn visual(&self) -> VisualState {
        self.visual
    }

    /// Pointer interaction.
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &MenuItemDescriptor {
        &self.descriptor
    }

    /// Accent color.
    #[must_use]
    pub fn accent(&self) -> Rgb {
        self.accent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn item() -> MenuItem {
        MenuItem::new(
            MenuItemDescriptor::new(0, "Inicio", "/"),
            Rgb::BLACK,
            &ItemConfig::default(),
        )
    }

    fn settle(item: &mut MenuItem) {
        for _ in 0..2000 {
            item.advance(FRAME);
            if item.is_settled() {
                return;
            }
        }
        panic!("item did not settle");
    }

    fn revealed() -> MenuItem {
        let cfg = ItemConfig::default();
        let mut item = item();
        item.set_visual(VisualState::Revealed, Duration::ZERO, &cfg);
        settle(&mut item);
        item
    }

    #[test]
    fn starts_hidden_at_rest() {
        let item = item();
        let style = item.style();
        assert_eq!(style.y, 50.0);
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.scale, 1.0);
        assert!(item.is_settled());
        assert!(!item.is_interactive());
    }

    #[test]
    fn reveal_reaches_target() {
        let item = revealed();
        let style = item.style();
        assert_eq!(style.y, 0.0);
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn reveal_kick_moves_upward_first() {
        let cfg = ItemConfig::default();
        let mut item = item();
        item.set_visual(VisualState::Revealed, Duration::ZERO, &cfg);
        item.advance(Duration::from_millis(1));
        assert!(item.style().y < 50.0);
    }

    #[test]
    fn delay_holds_until_elapsed() {
        let cfg = ItemConfig::default();
        let mut item = item();
        item.set_visual(VisualState::Revealed, Duration::from_millis(100), &cfg);
        let step = item.advance(Duration::from_millis(50));
        assert!(!step.started);
        assert_eq!(item.style().y, 50.0);
        let step = item.advance(Duration::from_millis(60));
        assert!(step.started);
    }

    #[test]
    fn settled_reported_once() {
        let cfg = ItemConfig::default();
        let mut item = item();
        item.set_visual(VisualState::Revealed, Duration::ZERO, &cfg);
        let mut settled = 0;
        for _ in 0..2000 {
            if item.advance(FRAME).settled {
                settled += 1;
            }
        }
        assert_eq!(settled, 1);
    }

    #[test]
    fn hidden_item_is_inert() {
        let mut item = item();
        let mut calls = 0;
        assert_eq!(item.activate(LinkActivation::Primary, &mut || calls += 1), None);
        assert_eq!(calls, 0);
        assert!(!item.set_interaction(Interaction::Hovered, &ItemConfig::default()));
    }

    #[test]
    fn primary_activation_runs_callback_first() {
        let mut item = revealed();
        let mut calls = 0;
        let nav = item.activate(LinkActivation::Primary, &mut || calls += 1);
        assert_eq!(calls, 1);
        assert_eq!(
            nav,
            Some(LinkNavigation {
                href: "/".into(),
                disposition: LinkDisposition::SameTab,
            })
        );
    }

    #[test]
    fn modified_and_middle_open_new_tab() {
        let mut item = revealed();
        let mut calls = 0;
        let nav = item.activate(LinkActivation::Modified, &mut || calls += 1);
        assert_eq!(nav.map(|n| n.disposition), Some(LinkDisposition::NewTab));
        assert_eq!(calls, 1);

        let nav = item.activate(LinkActivation::Middle, &mut || calls += 1);
        assert_eq!(nav.map(|n| n.disposition), Some(LinkDisposition::NewTab));
        assert_eq!(calls, 1);
    }

    #[test]
    fn hover_and_press_scale() {
        let cfg = ItemConfig::default();
        let mut item = revealed();
        assert!(item.set_interaction(Interaction::Hovered, &cfg));
        settle(&mut item);
        assert!((item.style().scale - 1.1).abs() < 1e-9);
        item.set_interaction(Interaction::Pressed, &cfg);
        settle(&mut item);
        assert!((item.style().scale - 0.95).abs() < 1e-9);
    }

    #[test]
    fn hiding_drops_interaction() {
        let cfg = ItemConfig::default();
        let mut item = revealed();
        item.set_interaction(Interaction::Hovered, &cfg);
        item.set_visual(VisualState::Hidden, Duration::ZERO, &cfg);
        assert_eq!(item.interaction(), Interaction::Idle);
        settle(&mut item);
        let style = item.style();
        assert_eq!(style.scale, 1.0);
        assert_eq!(style.y, 50.0);
        assert_eq!(style.opacity, 0.0);
    }

    #[test]
    fn redirect_replaces_pending_move() {
        let cfg = ItemConfig::default();
        let mut item = item();
        item.set_visual(VisualState::Revealed, Duration::from_millis(300), &cfg);
        item.set_visual(VisualState::Hidden, Duration::from_millis(100), &cfg);
        assert_eq!(item.pending_count(), 2);
        assert_eq!(item.pending_delay(), Some(Duration::from_millis(100)));
        settle(&mut item);
        assert_eq!(item.style().y, 50.0);
    }
}
