//! Property tests for the menu flag and clip geometry.

use std::time::Duration;

use c3_menu::{Layout, LinkActivation, MenuConfig, MenuPhase, content, reveal_radius};
use c3_menu::config::ShellConfig;
use proptest::prelude::*;

proptest! {
    #[test]
    fn toggle_parity(n in 0usize..64) {
        let mut layout = Layout::default();
        for _ in 0..n {
            layout.toggle_menu();
        }
        let expected = if n % 2 == 0 { MenuPhase::Closed } else { MenuPhase::Open };
        prop_assert_eq!(layout.phase(), expected);
        prop_assert_eq!(layout.shell().phase(), expected);
    }

    #[test]
    fn toggles_with_ticks_keep_flag_and_shell_in_step(
        gaps in prop::collection::vec(0u64..300, 0..20),
    ) {
        let mut layout = Layout::default();
        for gap in &gaps {
            layout.toggle_menu();
            layout.tick(Duration::from_millis(*gap));
            prop_assert_eq!(layout.phase(), layout.shell().phase());
            prop_assert!(layout.shell().pending_tracks() <= 2 + 2 * 5);
        }
    }

    #[test]
    fn radius_formula(h in 0u32..100_000) {
        let h = f64::from(h);
        prop_assert_eq!(reveal_radius(h), 2.0 * h + 200.0);
        prop_assert_eq!(ShellConfig::default().reveal_radius(h), 2.0 * h + 200.0);
    }

    #[test]
    fn activating_any_item_closes(index in 0usize..5, wait_ms in 0u64..1500) {
        let mut layout = Layout::default();
        layout.toggle_menu();
        layout.tick(Duration::from_millis(wait_ms));
        let nav = layout.activate_item(index, LinkActivation::Primary);
        prop_assert_eq!(
            nav.map(|n| n.href),
            Some(content::DESTINATIONS[index].1.to_string())
        );
        prop_assert_eq!(layout.phase(), MenuPhase::Closed);
    }
}

#[test]
fn radius_boundaries() {
    assert_eq!(reveal_radius(0.0), 200.0);
    assert_eq!(reveal_radius(500.0), 1200.0);
    assert_eq!(reveal_radius(1000.0), 2200.0);
    assert_eq!(MenuConfig::default().shell.fallback_height, 1000.0);
}
