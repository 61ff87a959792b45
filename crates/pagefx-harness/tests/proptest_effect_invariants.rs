//! Property tests for threshold, counter, particle and menu invariants.

use pagefx_core::Document;
use pagefx_core::animation::{CountFrame, CountUp};
use pagefx_harness::FakePage;
use pagefx_harness::fixtures::landing_page;
use proptest::prelude::*;
use std::time::Duration;

fn unit_value(value: Option<&str>, unit: &str) -> f64 {
    value
        .and_then(|v| v.strip_suffix(unit))
        .and_then(|v| v.parse().ok())
        .unwrap_or(f64::NAN)
}

proptest! {
    #[test]
    fn scroll_classes_track_last_offset(offsets in proptest::collection::vec(0.0f64..5000.0, 1..20)) {
        let (doc, nodes) = landing_page(1);
        let mut page = FakePage::ready(doc).unwrap();
        for &offset in &offsets {
            page.scroll_to(offset).unwrap();
        }
        let last = *offsets.last().unwrap();
        prop_assert_eq!(page.has_class(nodes.navbar, "scrolled"), last > 50.0);
        prop_assert_eq!(page.has_class(nodes.scroll_top, "show"), last > 300.0);
    }

    #[test]
    fn count_up_never_overshoots(target in 0u32..100_000, duration_ms in 1u64..5000, frame_ms in 1u64..100) {
        let target = f64::from(target);
        let mut tween = CountUp::new(
            target,
            Duration::from_millis(duration_ms),
            Duration::from_millis(frame_ms),
        );
        let mut steps = 0u64;
        loop {
            match tween.step() {
                CountFrame::Running(v) => {
                    prop_assert!((v as f64) < target);
                    prop_assert!(v >= 0);
                }
                CountFrame::Done => break,
            }
            steps += 1;
            prop_assert!(steps <= duration_ms / frame_ms + 2, "too many steps: {}", steps);
        }
    }

    #[test]
    fn particles_stay_in_range_for_any_seed(seed in any::<u64>()) {
        let (doc, nodes) = landing_page(seed);
        let page = FakePage::ready(doc).unwrap();
        let particles = page.doc.children(nodes.particles);
        prop_assert_eq!(particles.len(), 30);
        for &p in particles {
            let left = unit_value(page.doc.style(p, "left"), "%");
            let top = unit_value(page.doc.style(p, "top"), "%");
            let size = unit_value(page.doc.style(p, "width"), "px");
            let duration = unit_value(page.doc.style(p, "animation-duration"), "s");
            let delay = unit_value(page.doc.style(p, "animation-delay"), "s");
            prop_assert!((0.0..=100.0).contains(&left));
            prop_assert!((0.0..=100.0).contains(&top));
            prop_assert!((2.0..=6.0).contains(&size));
            prop_assert!((2.0..=5.0).contains(&duration));
            prop_assert!((0.0..=2.0).contains(&delay));
        }
    }

    #[test]
    fn any_menu_link_closes_the_menu(toggles in 0usize..5, link in 0usize..3) {
        let (doc, nodes) = landing_page(0);
        let mut page = FakePage::ready(doc).unwrap();
        let toggle = *page.doc.children(nodes.nav_container).last().unwrap();
        for _ in 0..toggles {
            page.click(toggle).unwrap();
        }
        prop_assert_eq!(page.has_class(nodes.nav_menu, "active"), toggles % 2 == 1);
        prop_assert_eq!(page.has_class(toggle, "active"), toggles % 2 == 1);

        page.click(nodes.nav_links[link]).unwrap();
        prop_assert!(!page.doc.has_class(nodes.nav_menu, "active"));
        prop_assert!(!page.doc.has_class(toggle, "active"));
    }
}
