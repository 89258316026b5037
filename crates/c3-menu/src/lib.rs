#![forbid(unsafe_code)]

//! Slide-out navigation menu for the Cuentohasta3 podcast site.
//!
//! # Role in Cuentohasta3
//! Every page shares one layout, and that layout owns a slide-out menu: a
//! white panel revealed by a circle growing out of the toggle button,
//! followed by a staggered cascade of navigation entries. This crate is
//! that menu as a headless, frame-driven core. The host feeds it paints,
//! resizes, pointer input, and frame ticks, and reads back styles.
//!
//! # Structure
//! - [`layout::Layout`]: owns the open/closed flag; the only writer.
//! - [`shell::MenuShell`]: turns the flag into one coordinated transition.
//! - [`probe::DimensionProbe`]: measures the container after layout.
//! - [`navigation::NavigationList`] and [`item::MenuItem`]: the staggered
//!   entries.
//! - [`toggle::MenuToggle`]: the hamburger/close button.
//! - [`config::MenuConfig`]: every tunable constant, loadable from TOML or
//!   JSON with the `config` feature.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use c3_core::geometry::Dimensions;
//! use c3_menu::{Layout, LinkActivation, SimulatedNode};
//!
//! let mut layout = Layout::default();
//! layout.mount(Rc::new(SimulatedNode::new(Dimensions::new(320.0, 500.0))));
//! layout.paint();
//!
//! layout.toggle_menu();
//! for _ in 0..400 {
//!     layout.tick(Duration::from_millis(16));
//! }
//! assert_eq!(layout.shell().clip_path(), "circle(1200px at 40px 40px)");
//!
//! let nav = layout.activate_item(2, LinkActivation::Primary);
//! assert_eq!(nav.map(|n| n.href), Some("/about".to_string()));
//! assert!(!layout.is_menu_open());
//! ```

pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod event;
pub mod item;
pub mod layout;
pub mod navigation;
pub mod palette;
pub mod probe;
pub mod shell;
pub mod state;
pub mod toggle;

pub use config::MenuConfig;
pub use context::{AnimationContext, VisualState};
pub use error::ConfigError;
pub use event::{Channel, EventLog, MenuEvent};
pub use item::{
    Interaction, ItemStyle, LinkActivation, LinkDisposition, LinkNavigation, MenuItem,
    MenuItemDescriptor,
};
pub use layout::{Layout, LayoutCmd, LayoutMsg};
pub use navigation::NavigationList;
pub use palette::{AccentPalette, PalettePolicy, Rgb};
pub use probe::{DimensionProbe, NodeHandle, SimulatedNode};
pub use shell::{MenuShell, reveal_radius};
pub use state::MenuPhase;
pub use toggle::{MenuToggle, ToggleIcon};
