#![forbid(unsafe_code)]

//! Accent colors for menu entries.
//!
//! Each entry's border and label take a color picked by its position in the
//! list. The palette is shorter than a typical menu can grow, so the lookup
//! has an explicit out-of-range rule ([`PalettePolicy`]) instead of relying
//! on whatever an out-of-bounds index happens to produce.

use std::fmt;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// The brand accents, in menu order.
pub const DEFAULT_ACCENTS: [&str; 5] = ["#F96303", "#0bafe1", "#FB640B", "#D4Df00", "#000"];

/// Rule for indices past the end of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum PalettePolicy {
    /// Index modulo palette length.
    #[default]
    Wrap,
    /// Indices past the end reuse the last color.
    Clamp,
}

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black, used when a palette is empty.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, `#` optional).
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize, width: usize| u8::from_str_radix(&hex[i..i + width], 16).ok();
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(i, 1).map(|v| v * 17);
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Ordered accent colors plus an out-of-range rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentPalette {
    colors: Vec<Rgb>,
    policy: PalettePolicy,
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::brand(PalettePolicy::default())
    }
}

impl AccentPalette {
    /// The brand palette with the given policy.
    #[must_use]
    pub fn brand(policy: PalettePolicy) -> Self {
        let colors = DEFAULT_ACCENTS.iter().filter_map(|h| Rgb::from_hex(h)).collect();
        Self { colors, policy }
    }

    /// Build a palette from hex strings.
    ///
    /// Returns the first string that failed to parse as the error.
    pub fn from_hex<S: AsRef<str>>(hexes: &[S], policy: PalettePolicy) -> Result<Self, String> {
        let colors = hexes
            .iter()
            .map(|h| Rgb::from_hex(h.as_ref()).ok_or_else(|| h.as_ref().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors, policy })
    }

    /// Color for the entry at `index`.
    #[must_use]
    pub fn color_for(&self, index: usize) -> Rgb {
        let len = self.colors.len();
        if len == 0 {
            return Rgb::BLACK;
        }
        let slot = match self.policy {
            PalettePolicy::Wrap => index % len,
            PalettePolicy::Clamp => index.min(len - 1),
        };
        self.colors[slot]
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Active out-of-range rule.
    #[must_use]
    pub fn policy(&self) -> PalettePolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brand_accents() {
        let p = AccentPalette::default();
        assert_eq!(p.len(), 5);
        assert_eq!(p.color_for(0).to_string(), "#f96303");
        assert_eq!(p.color_for(3), Rgb::new(0xd4, 0xdf, 0x00));
        assert_eq!(p.color_for(4), Rgb::BLACK);
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("0bafe1"), Some(Rgb::new(0x0b, 0xaf, 0xe1)));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Rgb::from_hex("#12").is_none());
        assert!(Rgb::from_hex("#zzzzzz").is_none());
        assert!(Rgb::from_hex("#ééé").is_none());
    }

    #[test]
    fn wrap_policy() {
        let p = AccentPalette::brand(PalettePolicy::Wrap);
        assert_eq!(p.color_for(5), p.color_for(0));
        assert_eq!(p.color_for(12), p.color_for(2));
    }

    #[test]
    fn clamp_policy() {
        let p = AccentPalette::brand(PalettePolicy::Clamp);
        assert_eq!(p.color_for(5), p.color_for(4));
        assert_eq!(p.color_for(usize::MAX), p.color_for(4));
    }

    #[test]
    fn empty_palette_is_black() {
        let p = AccentPalette::from_hex::<&str>(&[], PalettePolicy::Wrap).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.color_for(3), Rgb::BLACK);
    }

    #[test]
    fn from_hex_reports_offender() {
        let err = AccentPalette::from_hex(&["#000", "nope"], PalettePolicy::Clamp).unwrap_err();
        assert_eq!(err, "nope");
    }
}
