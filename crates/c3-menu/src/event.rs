#![forbid(unsafe_code)]

//! Recorded animation lifecycle events.
//!
//! The shell appends to an [`EventLog`] whenever it schedules, starts, or
//! settles an animation. Hosts use the log to sequence side effects (focus,
//! analytics); tests use it to check ordering, not just end state.

use std::collections::VecDeque;
use std::time::Duration;

use crate::state::MenuPhase;

/// Default number of events retained before the oldest are dropped.
pub const DEFAULT_EVENT_CAPACITY: usize = 512;

/// Which animated part of the menu an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// The clip-revealed background panel.
    Background,
    /// The entry at this list index.
    Item(usize),
    /// The hamburger/close icon.
    Toggle,
}

/// One lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The shell received a new phase.
    PhaseChanged {
        /// The phase now being animated toward.
        phase: MenuPhase,
    },
    /// An animation toward `phase` will start after `delay`.
    Scheduled {
        /// Animated part.
        channel: Channel,
        /// Phase the animation leads to.
        phase: MenuPhase,
        /// Time until it starts.
        delay: Duration,
    },
    /// A scheduled animation began moving.
    Started {
        /// Animated part.
        channel: Channel,
    },
    /// An animation came to rest.
    Settled {
        /// Animated part.
        channel: Channel,
    },
}

impl MenuEvent {
    /// The channel this event refers to, if any.
    #[must_use]
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::PhaseChanged { .. } => None,
            Self::Scheduled { channel, .. }
            | Self::Started { channel }
            | Self::Settled { channel } => Some(*channel),
        }
    }
}

/// Bounded, drainable event buffer.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<MenuEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventLog {
    /// A log retaining at most `capacity` events (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            dropped: 0,
        }
    }

    /// Append an event, evicting the oldest if full.
    pub fn push(&mut self, event: MenuEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&mut self) -> Vec<MenuEvent> {
        self.events.drain(..).collect()
    }

    /// Iterate buffered events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MenuEvent> {
        self.events.iter()
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events evicted because the log was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
