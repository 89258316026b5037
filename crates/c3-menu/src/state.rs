#![forbid(unsafe_code)]

//! The menu's logical open/closed flag.

use std::fmt;

/// Whether the menu is open.
///
/// There is no "opening" or "closing" value: the flag changes instantly and
/// only the visuals take time to catch up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuPhase {
    /// Menu hidden behind the toggle control.
    #[default]
    Closed,
    /// Menu panel revealed.
    Open,
}

impl MenuPhase {
    /// The other phase.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// Whether this is [`MenuPhase::Open`].
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<bool> for MenuPhase {
    fn from(is_open: bool) -> Self {
        if is_open { Self::Open } else { Self::Closed }
    }
}

impl fmt::Display for MenuPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Open => "open",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert_eq!(MenuPhase::default(), MenuPhase::Closed);
        assert!(!MenuPhase::default().is_open());
    }

    #[test]
    fn toggled_is_involution() {
        for p in [MenuPhase::Closed, MenuPhase::Open] {
            assert_ne!(p.toggled(), p);
            assert_eq!(p.toggled().toggled(), p);
        }
    }

    #[test]
    fn from_bool_and_display() {
        assert_eq!(MenuPhase::from(true), MenuPhase::Open);
        assert_eq!(MenuPhase::from(false).to_string(), "closed");
    }
}
