#![forbid(unsafe_code)]

//! Tunable parameters for the slide-out menu.
//!
//! Every constant the menu uses lives in [`MenuConfig`]: spring physics,
//! delays, stagger timing, clip geometry, the fallback height, the palette,
//! and resize debouncing. `MenuConfig::default()` is the site's shipped
//! look and feel.
//!
//! # Loading
//!
//! ```toml
//! # menu.toml
//! [shell]
//! close_delay_secs = 0.3
//!
//! [navigation]
//! open_stagger_secs = 0.05
//! ```
//!
//! ```rust,ignore
//! let config = MenuConfig::from_toml_file("menu.toml")?;
//! ```
//!
//! Missing sections and fields keep their defaults. Loaded configs are
//! validated before they are returned.

use std::time::Duration;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use c3_core::animation::SpringParams;
use c3_core::geometry::Point;

use crate::error::ConfigError;
use crate::palette::{AccentPalette, DEFAULT_ACCENTS, PalettePolicy};

/// Convert a seconds value from config into a `Duration`.
///
/// Negative and non-finite values become zero.
#[must_use]
pub fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::ZERO)
}

// ---------------------------------------------------------------------------
// Spring
// ---------------------------------------------------------------------------

/// Serializable mirror of [`SpringParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SpringConfig {
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

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from(SpringParams::default())
    }
}

impl From<SpringParams> for SpringConfig {
    fn from(p: SpringParams) -> Self {
        Self {
            stiffness: p.stiffness,
            damping: p.damping,
            mass: p.mass,
            rest_delta: p.rest_delta,
            rest_speed: p.rest_speed,
        }
    }
}

impl SpringConfig {
    /// Convert to the physics params used by tracks.
    #[must_use]
    pub fn params(&self) -> SpringParams {
        SpringParams {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            rest_delta: self.rest_delta,
            rest_speed: self.rest_speed,
        }
    }

    fn validate(&self, name: &str, errors: &mut Vec<String>) {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            errors.push(format!("{name}.stiffness must be > 0, got {}", self.stiffness));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            errors.push(format!("{name}.damping must be >= 0, got {}", self.damping));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            errors.push(format!("{name}.mass must be > 0, got {}", self.mass));
        }
        if !(self.rest_delta > 0.0 && self.rest_speed > 0.0) {
            errors.push(format!("{name} rest thresholds must be > 0"));
        }
    }
}

fn check_secs(name: &str, value: f64, errors: &mut Vec<String>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("{name} must be a finite number >= 0, got {value}"));
    }
}

// ---------------------------------------------------------------------------
// Top-level MenuConfig
// ---------------------------------------------------------------------------

/// Top-level menu configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MenuConfig {
    /// Background panel and clip reveal.
    pub shell: ShellConfig,
    /// Stagger orchestration for the entry list.
    pub navigation: NavigationConfig,
    /// Per-entry motion.
    pub item: ItemConfig,
    /// Hamburger/close control.
    pub toggle: ToggleConfig,
    /// Accent colors.
    pub palette: PaletteConfig,
    /// Container measurement.
    pub probe: ProbeConfig,
}

impl MenuConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check every field; returns one message per problem.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        self.shell.validate(&mut errors);
        self.navigation.validate(&mut errors);
        self.item.validate(&mut errors);
        self.toggle.spring.validate("toggle.spring", &mut errors);
        if let Err(bad) = self.palette.build() {
            errors.push(format!("palette.accents: invalid color {bad:?}"));
        }
        if self.palette.accents.is_empty() {
            errors.push("palette.accents must not be empty".into());
        }
        errors
    }

    /// Return `self` if valid, otherwise the collected messages.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Background panel and clip reveal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ShellConfig {
    /// Clip centre x (the toggle control's centre).
    pub center_x: f64,
    /// Clip centre y.
    pub center_y: f64,
    /// Radius of the closed clip, hugging the toggle control.
    pub closed_radius: f64,
    /// Open radius is `radius_factor * height + radius_base`.
    pub radius_factor: f64,
    /// See `radius_factor`.
    pub radius_base: f64,
    /// Height used until the probe reports a nonzero measurement.
    pub fallback_height: f64,
    /// Spring for opening (soft, may overshoot).
    pub open_spring: SpringConfig,
    /// Spring for closing (stiff, no overshoot).
    pub close_spring: SpringConfig,
    /// Wait before the clip starts closing, letting entries clear first.
    pub close_delay_secs: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            center_x: 40.0,
            center_y: 40.0,
            closed_radius: 30.0,
            radius_factor: 2.0,
            radius_base: 200.0,
            fallback_height: 1000.0,
            open_spring: SpringConfig {
                stiffness: 20.0,
                damping: 10.0,
                rest_delta: 2.0,
                ..SpringConfig::default()
            },
            close_spring: SpringConfig {
                stiffness: 400.0,
                damping: 40.0,
                ..SpringConfig::default()
            },
            close_delay_secs: 0.5,
        }
    }
}

impl ShellConfig {
    /// Clip centre.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Open clip radius for a container of the given height.
    #[must_use]
    pub fn reveal_radius(&self, height: f64) -> f64 {
        self.radius_factor * height + self.radius_base
    }

    /// Delay before closing.
    #[must_use]
    pub fn close_delay(&self) -> Duration {
        secs(self.close_delay_secs)
    }

    fn validate(&self, errors: &mut Vec<String>) {
        if !(self.fallback_height.is_finite() && self.fallback_height > 0.0) {
            errors.push(format!(
                "shell.fallback_height must be > 0, got {}",
                self.fallback_height
            ));
        }
        if !(self.closed_radius.is_finite() && self.closed_radius >= 0.0) {
            errors.push(format!(
                "shell.closed_radius must be >= 0, got {}",
                self.closed_radius
            ));
        }
        if !(self.radius_factor.is_finite() && self.radius_factor >= 0.0) {
            errors.push(format!(
                "shell.radius_factor must be >= 0, got {}",
                self.radius_factor
            ));
        }
        if !self.radius_base.is_finite() {
            errors.push("shell.radius_base must be finite".into());
        }
        check_secs("shell.close_delay_secs", self.close_delay_secs, errors);
        self.open_spring.validate("shell.open_spring", errors);
        self.close_spring.validate("shell.close_spring", errors);
    }
}

/// Stagger orchestration for the entry list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavigationConfig {
    /// Gap between successive entries when opening.
    pub open_stagger_secs: f64,
    /// Wait before the first entry appears.
    pub open_delay_children_secs: f64,
    /// Gap between successive entries when closing (last entry first).
    pub close_stagger_secs: f64,
    /// Wait before the first entry starts hiding.
    pub close_delay_children_secs: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            open_stagger_secs: 0.07,
            open_delay_children_secs: 0.2,
            close_stagger_secs: 0.05,
            close_delay_children_secs: 0.0,
        }
    }
}

impl NavigationConfig {
    fn validate(&self, errors: &mut Vec<String>) {
        check_secs("navigation.open_stagger_secs", self.open_stagger_secs, errors);
        check_secs(
            "navigation.open_delay_children_secs",
            self.open_delay_children_secs,
            errors,
        );
        check_secs("navigation.close_stagger_secs", self.close_stagger_secs, errors);
        check_secs(
            "navigation.close_delay_children_secs",
            self.close_delay_children_secs,
            errors,
        );
    }
}

/// Per-entry motion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ItemConfig {
    /// Downward offset of a hidden entry.
    pub hidden_offset_y: f64,
    /// Velocity kick applied to `y` when an entry starts revealing.
    pub reveal_velocity: f64,
    /// Spring for `y` when revealing.
    pub reveal_spring: SpringConfig,
    /// Spring for `y` when hiding.
    pub hide_spring: SpringConfig,
    /// Spring for opacity.
    pub opacity_spring: SpringConfig,
    /// Scale while hovered.
    pub hover_scale: f64,
    /// Scale while pressed.
    pub press_scale: f64,
    /// Spring for the hover/press scale.
    pub scale_spring: SpringConfig,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            hidden_offset_y: 50.0,
            reveal_velocity: -100.0,
            reveal_spring: SpringConfig {
                stiffness: 1000.0,
                ..SpringConfig::default()
            },
            hide_spring: SpringConfig {
                stiffness: 1000.0,
                ..SpringConfig::default()
            },
            opacity_spring: SpringParams::critical(300.0).with_rest(0.005, 0.01).into(),
            hover_scale: 1.1,
            press_scale: 0.95,
            scale_spring: SpringParams::critical(400.0).with_rest(0.001, 0.01).into(),
        }
    }
}

impl ItemConfig {
    fn validate(&self, errors: &mut Vec<String>) {
        if !self.hidden_offset_y.is_finite() {
            errors.push("item.hidden_offset_y must be finite".into());
        }
        if !self.reveal_velocity.is_finite() {
            errors.push("item.reveal_velocity must be finite".into());
        }
        for (name, scale) in [
            ("item.hover_scale", self.hover_scale),
            ("item.press_scale", self.press_scale),
        ] {
            if !(scale.is_finite() && scale > 0.0) {
                errors.push(format!("{name} must be > 0, got {scale}"));
            }
        }
        self.reveal_spring.validate("item.reveal_spring", errors);
        self.hide_spring.validate("item.hide_spring", errors);
        self.opacity_spring.validate("item.opacity_spring", errors);
        self.scale_spring.validate("item.scale_spring", errors);
    }
}

/// Hamburger/close control.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ToggleConfig {
    /// Spring for the icon morph (0 = hamburger, 1 = close).
    pub spring: SpringConfig,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            spring: SpringParams::critical(400.0).with_rest(0.001, 0.01).into(),
        }
    }
}

/// Accent colors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PaletteConfig {
    /// Hex colors in menu order.
    pub accents: Vec<String>,
    /// Rule for entries past the end of `accents`.
    pub policy: PalettePolicy,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            accents: DEFAULT_ACCENTS.iter().map(|s| (*s).to_string()).collect(),
            policy: PalettePolicy::default(),
        }
    }
}

impl PaletteConfig {
    /// Build the palette; the error is the first color that failed to parse.
    pub fn build(&self) -> Result<AccentPalette, String> {
        AccentPalette::from_hex(&self.accents, self.policy)
    }
}

/// Container measurement.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ProbeConfig {
    /// Quiet window for coalescing resize bursts. Zero re-measures on
    /// every resize.
    pub resize_debounce_ms: u64,
}

impl ProbeConfig {
    /// Quiet window as a `Duration`.
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_constants() {
        let c = MenuConfig::default();
        assert_eq!(c.shell.reveal_radius(0.0), 200.0);
        assert_eq!(c.shell.reveal_radius(500.0), 1200.0);
        assert_eq!(c.shell.closed_radius, 30.0);
        assert_eq!(c.shell.center(), Point::new(40.0, 40.0));
        assert_eq!(c.shell.close_delay(), Duration::from_millis(500));
        assert_eq!(c.shell.open_spring.stiffness, 20.0);
        assert_eq!(c.shell.open_spring.rest_delta, 2.0);
        assert_eq!(
            (c.shell.close_spring.stiffness, c.shell.close_spring.damping),
            (400.0, 40.0)
        );
        assert_eq!(c.navigation.open_stagger_secs, 0.07);
        assert_eq!(c.navigation.open_delay_children_secs, 0.2);
        assert_eq!(c.navigation.close_stagger_secs, 0.05);
        assert_eq!(c.item.hidden_offset_y, 50.0);
        assert_eq!(c.item.reveal_velocity, -100.0);
        assert_eq!(c.item.reveal_spring.stiffness, 1000.0);
        assert_eq!(c.palette.accents.len(), 5);
        assert_eq!(c.probe.resize_debounce(), Duration::ZERO);
    }

    #[test]
    fn default_validates() {
        assert!(MenuConfig::default().validate().is_empty());
        assert!(MenuConfig::default().validated().is_ok());
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut c = MenuConfig::default();
        c.shell.fallback_height = 0.0;
        c.shell.close_delay_secs = -1.0;
        c.navigation.open_stagger_secs = f64::NAN;
        c.item.press_scale = 0.0;
        c.toggle.spring.stiffness = -3.0;
        c.palette.accents = vec!["#12".into()];

        let errors = c.validate();
        assert_eq!(errors.len(), 6, "{errors:#?}");
        assert!(errors.iter().any(|e| e.contains("fallback_height")));
        assert!(errors.iter().any(|e| e.contains("\"#12\"")));
        assert!(matches!(
            c.validated(),
            Err(ConfigError::Validation(v)) if v.len() == 6
        ));
    }

    #[test]
    fn empty_palette_rejected() {
        let mut c = MenuConfig::default();
        c.palette.accents.clear();
        assert_eq!(c.validate(), vec!["palette.accents must not be empty".to_string()]);
    }

    #[test]
    fn secs_clamps() {
        assert_eq!(secs(-1.0), Duration::ZERO);
        assert_eq!(secs(f64::NAN), Duration::ZERO);
        assert_eq!(secs(f64::INFINITY), Duration::ZERO);
        assert_eq!(secs(0.07), Duration::from_secs_f64(0.07));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override() {
        let c = MenuConfig::from_toml_str(
            r#"
            [shell]
            close_delay_secs = 0.25

            [palette]
            policy = "clamp"
            "#,
        )
        .unwrap();
        assert_eq!(c.shell.close_delay(), Duration::from_millis(250));
        assert_eq!(c.shell.closed_radius, 30.0);
        assert_eq!(c.palette.policy, PalettePolicy::Clamp);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trip_preserves_defaults() {
        let text = MenuConfig::default().to_toml_string().unwrap();
        assert_eq!(MenuConfig::from_toml_str(&text).unwrap(), MenuConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_invalid_values_rejected() {
        let err = MenuConfig::from_json_str(r#"{"item": {"hover_scale": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let err = MenuConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
