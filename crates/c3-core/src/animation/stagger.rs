#![forbid(unsafe_code)]

//! Start offsets for orchestrated groups of animations.
//!
//! A parent that reveals its children one after another computes a start
//! delay per child index with [`stagger_offsets`] and hands each child its
//! own delay. The children never coordinate with each other.
//!
//! # Invariants
//!
//! 1. The result has exactly `count` entries, indexed by child position.
//! 2. `Forward` offsets increase with the index; `Reverse` offsets decrease,
//!    so the last child starts first.
//! 3. The smallest offset is always `delay_children`.

use std::time::Duration;

/// Order in which children start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaggerDirection {
    /// First child starts first.
    #[default]
    Forward,
    /// Last child starts first.
    Reverse,
}

/// Compute per-child start offsets.
///
/// Child `i` starts at `delay_children + k * stagger`, where `k = i` for
/// [`StaggerDirection::Forward`] and `k = count - 1 - i` for
/// [`StaggerDirection::Reverse`].
#[must_use]
pub fn stagger_offsets(
    count: usize,
    delay_children: Duration,
    stagger: Duration,
    direction: StaggerDirection,
) -> Vec<Duration> {
    (0..count)
        .map(|i| {
            let k = match direction {
                StaggerDirection::Forward => i,
                StaggerDirection::Reverse => count - 1 - i,
            };
            delay_children.saturating_add(stagger.saturating_mul(k as u32))
        })
        .collect()
}

/// Child indices sorted by the order they start in.
#[must_use]
pub fn start_order(count: usize, direction: StaggerDirection) -> Vec<usize> {
    match direction {
        StaggerDirection::Forward => (0..count).collect(),
        StaggerDirection::Reverse => (0..count).rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_70: Duration = Duration::from_millis(70);
    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn empty_group() {
        assert!(stagger_offsets(0, MS_200, MS_70, StaggerDirection::Reverse).is_empty());
        assert!(start_order(0, StaggerDirection::Reverse).is_empty());
    }

    #[test]
    fn forward_offsets() {
        let offsets = stagger_offsets(5, MS_200, MS_70, StaggerDirection::Forward);
        let ms: Vec<u128> = offsets.iter().map(Duration::as_millis).collect();
        assert_eq!(ms, vec![200, 270, 340, 410, 480]);
    }

    #[test]
    fn reverse_offsets() {
        let offsets = stagger_offsets(5, Duration::ZERO, MS_50, StaggerDirection::Reverse);
        let ms: Vec<u128> = offsets.iter().map(Duration::as_millis).collect();
        assert_eq!(ms, vec![200, 150, 100, 50, 0]);
    }

    #[test]
    fn single_child_gets_base_delay() {
        let offsets = stagger_offsets(1, MS_200, MS_70, StaggerDirection::Reverse);
        assert_eq!(offsets, vec![MS_200]);
    }

    #[test]
    fn start_order_matches_offsets() {
        for direction in [StaggerDirection::Forward, StaggerDirection::Reverse] {
            let offsets = stagger_offsets(6, MS_200, MS_50, direction);
            let mut by_offset: Vec<usize> = (0..6).collect();
            by_offset.sort_by_key(|&i| offsets[i]);
            assert_eq!(by_offset, start_order(6, direction));
        }
    }
}
