#![forbid(unsafe_code)]

//! The staggered list of navigation entries.
//!
//! The list owns its entries but not the menu phase. On every
//! [`apply`](NavigationList::apply) it reads the phase from the shell's
//! [`AnimationContext`], computes one start offset per entry, and hands each
//! entry its visual target and delay:
//!
//! ```text
//! open:  delay_children 0.20s, stagger 0.07s, first entry first
//!        0: 0.20  1: 0.27  2: 0.34  3: 0.41  4: 0.48
//! close: delay_children 0.00s, stagger 0.05s, last entry first
//!        4: 0.00  3: 0.05  2: 0.10  1: 0.15  0: 0.20
//! ```
//!
//! An empty list schedules nothing.

use std::time::Duration;

use c3_core::animation::{StaggerDirection, stagger_offsets, start_order};
use tracing::debug;

use crate::config::{ItemConfig, NavigationConfig, secs};
use crate::context::AnimationContext;
use crate::event::{Channel, EventLog, MenuEvent};
use crate::item::{MenuItem, MenuItemDescriptor};
use crate::palette::AccentPalette;
use crate::state::MenuPhase;

/// Entries whose animations started or settled during one advance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStep {
    /// Entries that began moving, in start order.
    pub started: Vec<usize>,
    /// Entries that came to rest, in index order.
    pub settled: Vec<usize>,
}

/// Ordered, staggered navigation entries.
#[derive(Debug, Clone, Default)]
pub struct NavigationList {
    items: Vec<MenuItem>,
    direction: StaggerDirection,
}

impl NavigationList {
    /// Build hidden entries from `descriptors`.
    ///
    /// Each entry's index is its position in `descriptors`; accents are
    /// picked from `palette` by that index.
    #[must_use]
    pub fn new(
        descriptors: impl IntoIterator<Item = MenuItemDescriptor>,
        palette: &AccentPalette,
        config: &ItemConfig,
    ) -> Self {
        let items = descriptors
            .into_iter()
            .enumerate()
            .map(|(index, mut descriptor)| {
                descriptor.index = index;
                MenuItem::new(descriptor, palette.color_for(index), config)
            })
            .collect();
        Self {
            items,
            direction: StaggerDirection::Forward,
        }
    }

    /// Schedule every entry toward the context's phase.
    pub fn apply(
        &mut self,
        ctx: &AnimationContext,
        navigation: &NavigationConfig,
        item: &ItemConfig,
        events: &mut EventLog,
    ) {
        let (direction, delay_children, stagger) = match ctx.phase {
            MenuPhase::Open => (
                StaggerDirection::Forward,
                secs(navigation.open_delay_children_secs),
                secs(navigation.open_stagger_secs),
            ),
            MenuPhase::Closed => (
                StaggerDirection::Reverse,
                secs(navigation.close_delay_children_secs),
                secs(navigation.close_stagger_secs),
            ),
        };
        self.direction = direction;

        let count = self.items.len();
        let offsets = stagger_offsets(count, delay_children, stagger, direction);
        let visual = ctx.visual();
        for index in start_order(count, direction) {
            let delay = offsets[index];
            self.items[index].set_visual(visual, delay, item);
            events.push(MenuEvent::Scheduled {
                channel: Channel::Item(index),
                phase: ctx.phase,
                delay,
            });
        }
        debug!(phase = %ctx.phase, count, ?direction, "navigation scheduled");
    }

    /// Advance every entry by `dt`.
    pub fn advance(&mut self, dt: Duration) -> NavigationStep {
        let rank = start_order(self.items.len(), self.direction);
        let mut started: Vec<(Duration, usize, usize)> = Vec::new();
        let mut settled = Vec::new();

        for (order, &index) in rank.iter().enumerate() {
            let item = &mut self.items[index];
            let delay = item.pending_delay().unwrap_or(Duration::ZERO);
            let step = item.advance(dt);
            if step.started {
                started.push((delay, order, index));
            }
            if step.settled {
                settled.push(index);
            }
        }

        started.sort_unstable();
        settled.sort_unstable();
        NavigationStep {
            started: started.into_iter().map(|(_, _, index)| index).collect(),
            settled,
        }
    }

    /// All entries in index order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Entry at `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    /// Mutable entry at `index`.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut MenuItem> {
        self.items.get_mut(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every entry is at rest with nothing pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.items.iter().all(MenuItem::is_settled)
    }

    /// Retargets waiting for their delay, across all entries.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.items.iter().map(MenuItem::pending_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::VisualState;

    const FRAME: Duration = Duration::from_millis(10);

    fn list(n: usize) -> NavigationList {
        let descriptors = (0..n).map(|i| MenuItemDescriptor::new(99, format!("item {i}"), "/"));
        NavigationList::new(descriptors, &AccentPalette::default(), &ItemConfig::default())
    }

    fn apply(list: &mut NavigationList, phase: MenuPhase, events: &mut EventLog) {
        list.apply(
            &AnimationContext::new(phase, 800.0),
            &NavigationConfig::default(),
            &ItemConfig::default(),
            events,
        );
    }

    fn start_sequence(list: &mut NavigationList) -> Vec<usize> {
        let mut order = Vec::new();
        for _ in 0..100 {
            order.extend(list.advance(FRAME).started);
        }
        order
    }

    #[test]
    fn indices_follow_position() {
        let list = list(3);
        let indices: Vec<_> = list.items().iter().map(|i| i.descriptor().index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn accents_follow_palette() {
        let list = list(7);
        let palette = AccentPalette::default();
        assert_eq!(list.items()[5].accent(), palette.color_for(0));
        assert_eq!(list.items()[6].accent(), palette.color_for(1));
    }

    #[test]
    fn open_schedules_forward() {
        let mut list = list(5);
        let mut events = EventLog::default();
        apply(&mut list, MenuPhase::Open, &mut events);

        let scheduled: Vec<_> = events
            .drain()
            .into_iter()
            .map(|e| match e {
                MenuEvent::Scheduled {
                    channel: Channel::Item(i),
                    delay,
                    ..
                } => (i, delay.as_millis()),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            scheduled,
            vec![(0, 200), (1, 270), (2, 340), (3, 410), (4, 480)]
        );
        assert_eq!(start_sequence(&mut list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn close_starts_reverse() {
        let mut list = list(5);
        let mut events = EventLog::default();
        apply(&mut list, MenuPhase::Open, &mut events);
        start_sequence(&mut list);
        apply(&mut list, MenuPhase::Closed, &mut events);
        assert_eq!(start_sequence(&mut list), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn large_frame_orders_by_delay() {
        let mut list = list(5);
        let mut events = EventLog::default();
        apply(&mut list, MenuPhase::Closed, &mut events);
        let step = list.advance(Duration::from_secs(1));
        assert_eq!(step.started, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn empty_list_schedules_nothing() {
        let mut list = list(0);
        let mut events = EventLog::default();
        apply(&mut list, MenuPhase::Open, &mut events);
        assert!(events.is_empty());
        assert!(list.is_settled());
        assert_eq!(list.advance(FRAME), NavigationStep::default());
    }

    #[test]
    fn retoggle_leaves_one_pending_per_track() {
        let mut list = list(5);
        let mut events = EventLog::default();
        apply(&mut list, MenuPhase::Open, &mut events);
        apply(&mut list, MenuPhase::Closed, &mut events);
        apply(&mut list, MenuPhase::Open, &mut events);
        // y and opacity per entry
        assert_eq!(list.pending_count(), 10);
        for _ in 0..1000 {
            list.advance(FRAME);
        }
        assert!(list.is_settled());
        assert!(
            list.items()
                .iter()
                .all(|i| i.visual() == VisualState::Revealed && i.style().opacity == 1.0)
        );
    }
}
