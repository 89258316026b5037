#![forbid(unsafe_code)]

//! The menu shell: composition root for the slide-out menu.
//!
//! The shell turns the layout's [`MenuPhase`] into one coordinated
//! transition. It owns every animated part of the menu and is the only
//! place that builds an [`AnimationContext`]:
//!
//! ```text
//!              Layout (owns MenuPhase)
//!                 │ sync(phase)
//!                 ▼
//!   ┌────────── MenuShell ──────────┐
//!   │ DimensionProbe ─► height      │
//!   │ background Track (clip radius)│
//!   │ NavigationList ─► MenuItem×N  │
//!   │ MenuToggle                    │
//!   └───────────────────────────────┘
//! ```
//!
//! # Transition
//!
//! - **Open**: the clip circle grows from radius 30 to `2h + 200`
//!   immediately on a soft spring, and the entries cascade in after 0.2s.
//! - **Closed**: the entries leave last-first right away, and the clip
//!   circle shrinks back to 30 on a stiff spring after 0.5s, once the
//!   entries are mostly gone.
//!
//! `h` is the probed container height, or the configured fallback (1000)
//! while nothing nonzero has been measured. If the height changes while
//! the menu is open, the clip radius follows it.
//!
//! Re-toggling mid-transition redirects every part from where it is; each
//! animated value has at most one pending retarget.

use std::rc::Rc;
use std::time::Duration;

use c3_core::animation::{Animation, Track};
use c3_core::geometry::{ClipCircle, Dimensions};
use c3_core::reactive::Observable;
use tracing::{debug, trace, warn};

use crate::config::{MenuConfig, ShellConfig};
use crate::context::AnimationContext;
use crate::event::{Channel, EventLog, MenuEvent};
use crate::item::{Interaction, ItemStyle, LinkActivation, LinkNavigation, MenuItemDescriptor};
use crate::navigation::NavigationList;
use crate::palette::AccentPalette;
use crate::probe::{DimensionProbe, NodeHandle};
use crate::state::MenuPhase;
use crate::toggle::{MenuToggle, ToggleBars, ToggleIcon};

/// Radius changes smaller than this while open are not worth a retarget.
const RADIUS_EPSILON: f64 = 0.5;

/// Open clip radius for a container of height `height`, with the shipped
/// geometry: `2 * height + 200`.
#[must_use]
pub fn reveal_radius(height: f64) -> f64 {
    ShellConfig::default().reveal_radius(height)
}

/// The slide-out menu.
#[derive(Debug)]
pub struct MenuShell {
    config: MenuConfig,
    phase: MenuPhase,
    probe: DimensionProbe,
    navigation: NavigationList,
    toggle: MenuToggle,
    background: Track,
    events: EventLog,
}

impl MenuShell {
    /// A closed menu at rest over `destinations`.
    ///
    /// A palette that fails to parse falls back to the brand palette.
    #[must_use]
    pub fn new(
        config: MenuConfig,
        destinations: impl IntoIterator<Item = MenuItemDescriptor>,
    ) -> Self {
        let palette = config.palette.build().unwrap_or_else(|bad| {
            warn!(color = %bad, "invalid accent color, using brand palette");
            AccentPalette::brand(config.palette.policy)
        });
        let navigation = NavigationList::new(destinations, &palette, &config.item);
        let toggle = MenuToggle::new(&config.toggle);
        let background = Track::resting(
            config.shell.closed_radius,
            config.shell.close_spring.params(),
        );
        let probe = DimensionProbe::new(config.probe.resize_debounce());
        Self {
            config,
            phase: MenuPhase::Closed,
            probe,
            navigation,
            toggle,
            background,
            events: EventLog::default(),
        }
    }

    /// Attach the container node and listen for viewport resizes.
    pub fn mount(&mut self, node: Rc<dyn NodeHandle>, viewport: &Observable<Dimensions>) {
        self.probe.attach(node, viewport);
    }

    /// The first frame has been painted: take the first measurement.
    pub fn after_paint(&mut self) -> Dimensions {
        let dims = self.probe.after_paint();
        self.refresh_geometry();
        dims
    }

    /// Stop listening for resizes. Safe mid-animation.
    pub fn unmount(&mut self) {
        self.probe.detach();
        debug!(phase = %self.phase, settled = self.is_settled(), "menu unmounted");
    }

    /// Animate toward `phase`. Returns `false` if it was already current.
    pub fn sync(&mut self, phase: MenuPhase) -> bool {
        if phase == self.phase {
            return false;
        }
        self.phase = phase;
        let ctx = AnimationContext::new(phase, self.effective_height());
        self.events.push(MenuEvent::PhaseChanged { phase });

        let shell = &self.config.shell;
        let (radius, params, delay) = match phase {
            MenuPhase::Open => (
                shell.reveal_radius(ctx.height),
                shell.open_spring.params(),
                Duration::ZERO,
            ),
            MenuPhase::Closed => (
                shell.closed_radius,
                shell.close_spring.params(),
                shell.close_delay(),
            ),
        };
        let replaced = self.background.retarget(radius, params, delay, 0.0);
        self.events.push(MenuEvent::Scheduled {
            channel: Channel::Background,
            phase,
            delay,
        });
        debug!(
            %phase,
            height = ctx.height,
            radius,
            delay_ms = delay.as_millis() as u64,
            replaced,
            "menu phase changed"
        );

        self.navigation.apply(
            &ctx,
            &self.config.navigation,
            &self.config.item,
            &mut self.events,
        );
        self.toggle
            .apply(phase, &self.config.toggle, &mut self.events);
        true
    }

    /// Advance every animation by `dt` and record what started or settled.
    ///
    /// A debounced resize whose quiet window has passed is measured first,
    /// so the clip follows it in the same tick. Parts that start in the
    /// same tick are recorded in the order their delays would have expired.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(dims) = self.probe.advance(dt) {
            trace!(height = dims.height, "debounced resize measured");
        }
        self.refresh_geometry();

        let background_delay = self.background.pending_delay();
        let item_delays: Vec<Option<Duration>> = self
            .navigation
            .items()
            .iter()
            .map(|item| item.pending_delay())
            .collect();

        let background = self.background.advance(dt);
        let navigation = self.navigation.advance(dt);
        let toggle = self.toggle.advance(dt);

        let mut started: Vec<(Duration, Channel)> = Vec::new();
        if background.started {
            started.push((background_delay.unwrap_or_default(), Channel::Background));
        }
        for &index in &navigation.started {
            let delay = item_delays.get(index).copied().flatten();
            started.push((delay.unwrap_or_default(), Channel::Item(index)));
        }
        if toggle.started {
            started.push((Duration::ZERO, Channel::Toggle));
        }
        started.sort_by_key(|(delay, _)| *delay);
        for (_, channel) in started {
            self.events.push(MenuEvent::Started { channel });
        }

        if background.settled {
            self.events.push(MenuEvent::Settled {
                channel: Channel::Background,
            });
            trace!(radius = self.background.value(), "clip settled");
        }
        for index in navigation.settled {
            self.events.push(MenuEvent::Settled {
                channel: Channel::Item(index),
            });
        }
        if toggle.settled {
            self.events.push(MenuEvent::Settled {
                channel: Channel::Toggle,
            });
        }
    }

    /// Follow the probed height while open.
    fn refresh_geometry(&mut self) {
        if !self.phase.is_open() {
            return;
        }
        let shell = &self.config.shell;
        let target = shell.reveal_radius(self.effective_height());
        if (self.background.destination() - target).abs() > RADIUS_EPSILON {
            trace!(from = self.background.destination(), to = target, "clip radius retargeted");
            self.background
                .retarget(target, shell.open_spring.params(), Duration::ZERO, 0.0);
        }
    }

    /// Height used for geometry: the probed height, or the fallback while
    /// nothing nonzero has been measured.
    #[must_use]
    pub fn effective_height(&self) -> f64 {
        let dims = self.probe.dimensions();
        if dims.has_height() {
            dims.height
        } else {
            self.config.shell.fallback_height
        }
    }

    /// Current clip region of the background panel.
    #[must_use]
    pub fn clip(&self) -> ClipCircle {
        ClipCircle::new(self.background.value(), self.config.shell.center())
    }

    /// Current clip region as a CSS `clip-path` value.
    #[must_use]
    pub fn clip_path(&self) -> String {
        self.clip().to_string()
    }

    /// Presentation values of entry `index`.
    #[must_use]
    pub fn item_style(&self, index: usize) -> Option<ItemStyle> {
        self.navigation.item(index).map(|item| item.style())
    }

    /// Icon the toggle control shows.
    #[must_use]
    pub fn toggle_icon(&self) -> ToggleIcon {
        self.toggle.icon()
    }

    /// Toggle bar transforms.
    #[must_use]
    pub fn toggle_bars(&self) -> ToggleBars {
        self.toggle.bars()
    }

    /// Activate entry `index`; `on_toggle` is the owner's toggle callback.
    ///
    /// Returns `None` for unknown or hidden entries.
    pub fn activate_item(
        &mut self,
        index: usize,
        activation: LinkActivation,
        on_toggle: &mut dyn FnMut(),
    ) -> Option<LinkNavigation> {
        let navigation = self
            .navigation
            .item_mut(index)?
            .activate(activation, on_toggle);
        if let Some(nav) = &navigation {
            debug!(index, href = %nav.href, disposition = ?nav.disposition, "menu entry activated");
        }
        navigation
    }

    /// Press the toggle control.
    pub fn activate_toggle(&mut self, on_toggle: &mut dyn FnMut()) {
        self.toggle.activate(on_toggle);
    }

    /// Update pointer interaction on entry `index`.
    pub fn hover_item(&mut self, index: usize, interaction: Interaction) -> bool {
        let config = &self.config.item;
        self.navigation
            .item_mut(index)
            .is_some_and(|item| item.set_interaction(interaction, config))
    }

    /// Whether every part is at rest with nothing pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.background.is_complete() && self.navigation.is_settled() && self.toggle.is_settled()
    }

    /// Retargets waiting for their delay, across every part.
    #[must_use]
    pub fn pending_tracks(&self) -> usize {
        self.background.pending_count()
            + self.navigation.pending_count()
            + self.toggle.pending_count()
    }

    /// Take the recorded events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MenuEvent> {
        self.events.drain()
    }

    /// Recorded events not yet drained.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Phase being animated toward.
    #[must_use]
    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    /// Latest probed dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.probe.dimensions()
    }

    /// The dimension probe.
    #[must_use]
    pub fn probe(&self) -> &DimensionProbe {
        &self.probe
    }

    /// The entry list.
    #[must_use]
    pub fn navigation(&self) -> &NavigationList {
        &self.navigation
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }
}
