#![forbid(unsafe_code)]

//! The page layout: sole owner of the menu flag.
//!
//! Every page on the site renders inside one [`Layout`]. The layout holds
//! the [`MenuPhase`] and is the only thing that ever writes it. The shell,
//! the entries, and the toggle control receive it read-only and report
//! presses through a callback that flips it here.
//!
//! Hosts can either call the methods directly or feed [`LayoutMsg`]s
//! through [`Layout::update`]:
//!
//! ```
//! use std::time::Duration;
//! use c3_menu::layout::{Layout, LayoutMsg};
//! use c3_menu::state::MenuPhase;
//!
//! let mut layout = Layout::default();
//! layout.update(LayoutMsg::ToggleMenu);
//! assert_eq!(layout.phase(), MenuPhase::Open);
//! layout.update(LayoutMsg::Tick(Duration::from_millis(16)));
//! ```

use std::rc::Rc;
use std::time::Duration;

use c3_core::geometry::Dimensions;
use c3_core::reactive::Observable;
use tracing::debug;

use crate::config::MenuConfig;
use crate::content::{SITE_TITLE, default_destinations};
use crate::item::{Interaction, LinkActivation, LinkNavigation, MenuItemDescriptor};
use crate::probe::NodeHandle;
use crate::shell::MenuShell;
use crate::state::MenuPhase;

/// Input to the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// The toggle control was pressed.
    ToggleMenu,
    /// A menu entry was activated.
    ActivateItem {
        /// Entry index.
        index: usize,
        /// Kind of activation.
        activation: LinkActivation,
    },
    /// Pointer interaction on an entry changed.
    HoverItem {
        /// Entry index.
        index: usize,
        /// New interaction.
        interaction: Interaction,
    },
    /// A frame was painted.
    Paint,
    /// The viewport changed size.
    Resize(Dimensions),
    /// Frame time elapsed.
    Tick(Duration),
}

/// Effect requested by an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LayoutCmd {
    /// Nothing to do.
    #[default]
    None,
    /// Navigate to a destination.
    Navigate(LinkNavigation),
}

impl LayoutCmd {
    /// A no-op command.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }
}

/// Shared page layout.
#[derive(Debug)]
pub struct Layout {
    phase: MenuPhase,
    shell: MenuShell,
    viewport: Observable<Dimensions>,
    painted: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(MenuConfig::default(), default_destinations())
    }
}

impl Layout {
    /// A layout with the menu closed.
    #[must_use]
    pub fn new(
        config: MenuConfig,
        destinations: impl IntoIterator<Item = MenuItemDescriptor>,
    ) -> Self {
        Self {
            phase: MenuPhase::Closed,
            shell: MenuShell::new(config, destinations),
            viewport: Observable::new(Dimensions::ZERO),
            painted: false,
        }
    }

    /// Handle one message.
    pub fn update(&mut self, msg: LayoutMsg) -> LayoutCmd {
        match msg {
            LayoutMsg::ToggleMenu => {
                self.press_toggle();
                LayoutCmd::none()
            }
            LayoutMsg::ActivateItem { index, activation } => self
                .activate_item(index, activation)
                .map_or(LayoutCmd::None, LayoutCmd::Navigate),
            LayoutMsg::HoverItem { index, interaction } => {
                self.shell.hover_item(index, interaction);
                LayoutCmd::none()
            }
            LayoutMsg::Paint => {
                self.paint();
                LayoutCmd::none()
            }
            LayoutMsg::Resize(size) => {
                self.resize(size);
                LayoutCmd::none()
            }
            LayoutMsg::Tick(dt) => {
                self.tick(dt);
                LayoutCmd::none()
            }
        }
    }

    /// Flip the menu flag. This is the callback handed to the menu.
    pub fn toggle_menu(&mut self) -> MenuPhase {
        self.phase = self.phase.toggled();
        debug!(phase = %self.phase, "menu toggled");
        self.shell.sync(self.phase);
        self.phase
    }

    /// Press the toggle control; the control reports back through the
    /// layout's toggle callback.
    pub fn press_toggle(&mut self) -> MenuPhase {
        let phase = &mut self.phase;
        self.shell.activate_toggle(&mut || *phase = phase.toggled());
        debug!(phase = %self.phase, "menu toggled");
        self.shell.sync(self.phase);
        self.phase
    }

    /// Activate entry `index`.
    ///
    /// The entry calls the layout's toggle callback before the navigation
    /// is returned, so an open menu is closed by the time the caller
    /// navigates.
    pub fn activate_item(
        &mut self,
        index: usize,
        activation: LinkActivation,
    ) -> Option<LinkNavigation> {
        let phase = &mut self.phase;
        let navigation = self
            .shell
            .activate_item(index, activation, &mut || *phase = phase.toggled());
        self.shell.sync(self.phase);
        navigation
    }

    /// Update pointer interaction on entry `index`.
    pub fn hover_item(&mut self, index: usize, interaction: Interaction) -> bool {
        self.shell.hover_item(index, interaction)
    }

    /// Attach the menu container node.
    pub fn mount(&mut self, node: Rc<dyn NodeHandle>) {
        self.shell.mount(node, &self.viewport);
    }

    /// Report a painted frame. The first one triggers measurement.
    pub fn paint(&mut self) {
        if !self.painted {
            self.painted = true;
            let dims = self.shell.after_paint();
            debug!(width = dims.width, height = dims.height, "first paint");
        }
    }

    /// Report a viewport size.
    pub fn resize(&mut self, size: Dimensions) {
        self.viewport.set(size);
    }

    /// Advance the menu's animations and any debounced resize.
    pub fn tick(&mut self, dt: Duration) {
        self.shell.tick(dt);
    }

    /// Tear down the menu. Safe mid-animation.
    pub fn unmount(&mut self) {
        self.shell.unmount();
        self.painted = false;
    }

    /// Whether the menu flag is set.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.phase.is_open()
    }

    /// The menu flag.
    #[must_use]
    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    /// The viewport size source the menu listens to.
    #[must_use]
    pub fn viewport(&self) -> &Observable<Dimensions> {
        &self.viewport
    }

    /// Brand title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        SITE_TITLE
    }

    /// The menu.
    #[must_use]
    pub fn shell(&self) -> &MenuShell {
        &self.shell
    }

    /// The menu, for draining events.
    pub fn shell_mut(&mut self) -> &mut MenuShell {
        &mut self.shell
    }
}
