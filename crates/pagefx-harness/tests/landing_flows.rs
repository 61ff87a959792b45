//! End-to-end flows over the stock landing page.

use std::time::Duration;

use pagefx_core::effects::DownloadGuard;
use pagefx_core::{
    Document, Effect, EffectRegistry, EventKind, EventOutcome, EventTarget, PageConfig,
    PageController, PageEvent, PageFxError, Result, ScrollMetrics,
};
use pagefx_harness::fixtures::landing_page;
use pagefx_harness::{El, FakeDocument, FakePage};
use pretty_assertions::assert_eq;

fn ready_landing() -> (FakePage, pagefx_harness::fixtures::LandingNodes) {
    let (doc, nodes) = landing_page(42);
    let page = FakePage::ready(doc).expect("bind landing page");
    (page, nodes)
}

fn strip_unit(value: &str, unit: &str) -> f64 {
    value
        .strip_suffix(unit)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("bad {unit} value: {value}"))
}

// ── Smooth anchors ────────────────────────────────────────────────────

#[test]
fn fragment_link_scrolls_target_and_prevents_jump() {
    let (mut page, nodes) = ready_landing();
    let outcome = page.click(nodes.nav_links[0]).unwrap();
    assert_eq!(outcome, EventOutcome::PREVENT);
    assert_eq!(page.doc.scrolled_into_view(), &[nodes.features_section]);
}

#[test]
fn unresolvable_fragment_prevents_but_does_not_scroll() {
    let (mut doc, _) = landing_page(0);
    let body = doc.body_id();
    let dangling = doc.append(body, El::new("a").attr("href", "#nowhere"));
    let mut page = FakePage::ready(doc).unwrap();

    assert_eq!(page.click(dangling).unwrap(), EventOutcome::PREVENT);
    assert!(page.doc.scrolled_into_view().is_empty());
}

// ── Navbar ────────────────────────────────────────────────────────────

#[test]
fn navbar_shadow_follows_threshold() {
    let (mut page, nodes) = ready_landing();
    for (offset, expected) in [(0.0, false), (50.0, false), (51.0, true), (400.0, true), (10.0, false)]
    {
        page.scroll_to(offset).unwrap();
        assert_eq!(page.has_class(nodes.navbar, "scrolled"), expected, "offset {offset}");
    }
}

#[test]
fn controller_keeps_latest_scroll_sample() {
    let (mut page, _) = ready_landing();
    assert_eq!(page.controller.last_scroll(), None);
    page.scroll_to(120.0).unwrap();
    page.scroll_to(80.0).unwrap();
    assert_eq!(
        page.controller.last_scroll(),
        Some(ScrollMetrics::new(80.0, 800.0))
    );
}

// ── Reveal on scroll ──────────────────────────────────────────────────

#[test]
fn reveal_targets_start_hidden_with_staggered_delays() {
    let (page, nodes) = ready_landing();
    let doc = &page.doc;
    for node in nodes.feature_boxes.iter().chain(&nodes.protocol_steps) {
        assert_eq!(doc.style(*node, "opacity"), Some("0"));
        assert_eq!(doc.style(*node, "transform"), Some("translateY(30px)"));
    }
    assert_eq!(doc.style(nodes.feature_boxes[0], "transition"), Some("all 0.6s ease 0s"));
    assert_eq!(doc.style(nodes.feature_boxes[1], "transition"), Some("all 0.6s ease 0.1s"));
    assert_eq!(doc.style(nodes.protocol_steps[2], "transition"), Some("all 0.6s ease 0.3s"));

    let watcher = &doc.observers()[0];
    assert_eq!(watcher.options.threshold, 0.1);
    assert_eq!(watcher.options.root_margin, "0px 0px -50px 0px");
    assert_eq!(watcher.watched.len(), 7);
}

#[test]
fn reveal_is_one_shot() {
    let (mut page, nodes) = ready_landing();
    let target = nodes.protocol_steps[1];
    page.reveal(target).unwrap();

    assert_eq!(page.doc.style(target, "opacity"), Some("1"));
    assert_eq!(page.doc.style(target, "transform"), Some("translateY(0)"));
    assert!(page.doc.observers_of(target).is_empty());
    assert_eq!(page.doc.style(nodes.protocol_steps[0], "opacity"), Some("0"));
}

#[test]
fn leaving_the_viewport_does_not_reveal() {
    let (mut page, nodes) = ready_landing();
    let target = nodes.feature_boxes[2];
    page.set_visibility(target, false).unwrap();

    assert_eq!(page.doc.style(target, "opacity"), Some("0"));
    assert_eq!(page.doc.style(target, "transform"), Some("translateY(30px)"));
    assert_eq!(page.doc.observers_of(target).len(), 1);

    page.reveal(target).unwrap();
    assert_eq!(page.doc.style(target, "opacity"), Some("1"));
}

// ── Particles ─────────────────────────────────────────────────────────

#[test]
fn particle_field_creates_thirty_particles_in_range() {
    let (page, nodes) = ready_landing();
    let particles = page.doc.children(nodes.particles);
    assert_eq!(particles.len(), 30);

    for &p in particles {
        assert!(page.doc.has_class(p, "particle"));
        let style = |prop| page.doc.style(p, prop).unwrap_or_default();
        let left = strip_unit(style("left"), "%");
        let top = strip_unit(style("top"), "%");
        let width = strip_unit(style("width"), "px");
        let duration = strip_unit(style("animation-duration"), "s");
        let delay = strip_unit(style("animation-delay"), "s");
        assert!((0.0..=100.0).contains(&left), "left {left}");
        assert!((0.0..=100.0).contains(&top), "top {top}");
        assert!((2.0..=6.0).contains(&width), "size {width}");
        assert_eq!(style("width"), style("height"));
        assert!((2.0..=5.0).contains(&duration), "duration {duration}");
        assert!((0.0..=2.0).contains(&delay), "delay {delay}");
    }
    assert!(
        page.doc.stylesheets().iter().any(|css| css.contains("float-particle")),
        "particle keyframes injected"
    );
}

#[test]
fn no_container_means_no_particles_and_no_stylesheet() {
    let mut page = FakePage::ready(FakeDocument::new()).unwrap();
    page.scroll_to(10.0).unwrap();
    assert!(page.doc.stylesheets().is_empty());
}

// ── Counters ──────────────────────────────────────────────────────────

#[test]
fn counter_animates_to_exact_target() {
    let (mut page, nodes) = ready_landing();
    let stat = nodes.stats[0];
    assert_eq!(page.text(stat), "1200");

    page.reveal(stat).unwrap();
    let first: i64 = page.text(stat).parse().unwrap();
    assert!(first < 1200, "first tick shows {first}");

    let mut last = first;
    let mut ticks = 0;
    while page.doc.pending_frames() > 0 {
        page.run_frame().unwrap();
        ticks += 1;
        let shown = page.text(stat);
        let value: i64 = shown.parse().unwrap();
        assert!(value <= 1200, "overshot: {value}");
        assert!(value >= last, "went backwards: {last} -> {value}");
        last = value;
        assert!(ticks < 200, "counter did not finish");
    }
    assert_eq!(page.text(stat), "1200");
    // ~2s at 16ms frames.
    assert!((123..=126).contains(&ticks), "ticks {ticks}");
}

#[test]
fn counter_waits_for_visibility_and_never_restarts() {
    let (mut page, nodes) = ready_landing();
    let stat = nodes.stats[1];
    page.run_frame().unwrap();
    assert_eq!(page.text(stat), "98");

    page.reveal(stat).unwrap();
    assert_eq!(page.text(stat), "0");
    page.run_until_idle(500).unwrap();
    assert_eq!(page.text(stat), "98");

    assert!(page.doc.observers_of(stat).is_empty());
    page.reveal(stat).unwrap();
    assert_eq!(page.doc.pending_frames(), 0);
    assert_eq!(page.text(stat), "98");
}

#[test]
fn off_screen_stat_keeps_waiting() {
    let (mut page, nodes) = ready_landing();
    let stat = nodes.stats[0];
    page.set_visibility(stat, false).unwrap();

    assert_eq!(page.text(stat), "1200");
    assert_eq!(page.doc.pending_frames(), 0);
    assert_eq!(page.doc.observers_of(stat).len(), 1);

    page.reveal(stat).unwrap();
    assert_ne!(page.text(stat), "1200");
    assert!(page.doc.pending_frames() > 0);
}

#[test]
fn exponent_stat_counts_from_its_leading_digits() {
    let (mut doc, nodes) = landing_page(0);
    doc.set_text(nodes.stats[0], "1e3");
    let mut page = FakePage::ready(doc).unwrap();
    let stat = nodes.stats[0];

    page.reveal(stat).unwrap();
    while page.doc.pending_frames() > 0 {
        let shown = page.text(stat);
        assert!(shown == "0" || shown == "1e3", "shown {shown}");
        page.run_frame().unwrap();
    }
    assert_eq!(page.text(stat), "1e3");
}

#[test]
fn non_numeric_stat_is_untouched() {
    let (mut page, nodes) = ready_landing();
    let stat = nodes.stats[2];
    assert!(page.doc.observers_of(stat).is_empty());
    page.reveal(stat).unwrap();
    page.run_until_idle(500).unwrap();
    assert_eq!(page.text(stat), "N/A");
}

// ── Download guard ────────────────────────────────────────────────────

#[test]
fn placeholder_download_is_blocked_with_notice() {
    let (mut page, nodes) = ready_landing();
    let outcome = page.click(nodes.download).unwrap();
    assert_eq!(outcome, EventOutcome::PREVENT);
    assert_eq!(page.doc.alerts().len(), 1);
    assert!(page.doc.alerts()[0].contains("update the download link"));
}

#[test]
fn configured_download_proceeds() {
    let (mut doc, nodes) = landing_page(0);
    doc.set_attribute(nodes.download, "href", "downloads/jishin-alert.apk");
    let mut page = FakePage::ready(doc).unwrap();

    let outcome = page.click(nodes.download).unwrap();
    assert_eq!(outcome, EventOutcome::PROCEED);
    assert!(page.doc.alerts().is_empty());
}

// ── Mobile menu ───────────────────────────────────────────────────────

fn hamburger(page: &FakePage, nodes: &pagefx_harness::fixtures::LandingNodes) -> pagefx_core::NodeId {
    *page
        .doc
        .children(nodes.nav_container)
        .last()
        .expect("hamburger appended to nav container")
}

#[test]
fn hamburger_is_built_with_three_bars() {
    let (page, nodes) = ready_landing();
    let toggle = hamburger(&page, &nodes);
    assert!(page.doc.has_class(toggle, "hamburger"));
    assert_eq!(page.doc.children(toggle).len(), 3);
    assert!(
        page.doc
            .stylesheets()
            .iter()
            .any(|css| css.contains("@media (max-width: 768px)"))
    );
}

#[test]
fn toggle_opens_and_link_closes_menu() {
    let (mut page, nodes) = ready_landing();
    let toggle = hamburger(&page, &nodes);

    page.click(toggle).unwrap();
    assert!(page.has_class(toggle, "active"));
    assert!(page.has_class(nodes.nav_menu, "active"));

    page.click(nodes.nav_links[2]).unwrap();
    assert!(!page.has_class(toggle, "active"));
    assert!(!page.has_class(nodes.nav_menu, "active"));

    page.click(nodes.nav_links[1]).unwrap();
    assert!(!page.has_class(nodes.nav_menu, "active"));

    page.click(toggle).unwrap();
    page.click(toggle).unwrap();
    assert!(!page.has_class(toggle, "active"));
    assert!(!page.has_class(nodes.nav_menu, "active"));
}

// ── Glitch ────────────────────────────────────────────────────────────

#[test]
fn glitch_restarts_after_short_delay() {
    let (mut page, nodes) = ready_landing();
    page.hover(nodes.glitch).unwrap();
    assert_eq!(page.doc.style(nodes.glitch, "animation"), Some("none"));

    page.advance(Duration::from_millis(9)).unwrap();
    assert_eq!(page.doc.style(nodes.glitch, "animation"), Some("none"));

    page.advance(Duration::from_millis(1)).unwrap();
    assert_eq!(
        page.doc.style(nodes.glitch, "animation"),
        Some("glitch-text 0.3s")
    );
}

#[test]
fn repeated_hover_waits_for_the_latest_delay() {
    let (mut page, nodes) = ready_landing();
    page.hover(nodes.glitch).unwrap();
    page.advance(Duration::from_millis(5)).unwrap();
    page.hover(nodes.glitch).unwrap();

    // The first delay elapses here but no longer applies.
    page.advance(Duration::from_millis(5)).unwrap();
    assert_eq!(page.doc.style(nodes.glitch, "animation"), Some("none"));
    page.advance(Duration::from_millis(4)).unwrap();
    assert_eq!(page.doc.style(nodes.glitch, "animation"), Some("none"));

    page.advance(Duration::from_millis(1)).unwrap();
    assert_eq!(
        page.doc.style(nodes.glitch, "animation"),
        Some("glitch-text 0.3s")
    );
}

// ── Parallax ──────────────────────────────────────────────────────────

#[test]
fn parallax_moves_and_fades_within_first_viewport() {
    let (mut page, nodes) = ready_landing();
    page.scroll_to(400.0).unwrap();
    assert_eq!(
        page.doc.style(nodes.hero_content, "transform"),
        Some("translateY(200px)")
    );
    assert_eq!(page.doc.style(nodes.hero_content, "opacity"), Some("0.5"));

    page.scroll_to(1600.0).unwrap();
    assert_eq!(
        page.doc.style(nodes.hero_content, "transform"),
        Some("translateY(200px)")
    );

    page.scroll_to(0.0).unwrap();
    assert_eq!(page.doc.style(nodes.hero_content, "opacity"), Some("1"));
}

// ── Page fade ─────────────────────────────────────────────────────────

#[test]
fn body_fades_in_after_load() {
    let (mut page, _) = ready_landing();
    let body = page.doc.body_id();
    assert_eq!(page.doc.style(body, "opacity"), None);

    page.load().unwrap();
    assert_eq!(page.doc.style(body, "opacity"), Some("0"));

    page.advance(Duration::from_millis(100)).unwrap();
    assert_eq!(page.doc.style(body, "opacity"), Some("1"));
    assert_eq!(page.doc.style(body, "transition"), Some("opacity 0.5s ease"));
}

// ── Scroll to top ─────────────────────────────────────────────────────

#[test]
fn scroll_top_visibility_threshold() {
    let (mut page, nodes) = ready_landing();
    for (offset, shown) in [(0.0, false), (299.0, false), (300.0, false), (301.0, true), (2000.0, true)]
    {
        page.scroll_to(offset).unwrap();
        assert_eq!(page.has_class(nodes.scroll_top, "show"), shown, "offset {offset}");
    }
}

#[test]
fn scroll_top_click_returns_home() {
    let (mut page, nodes) = ready_landing();
    page.scroll_to(1500.0).unwrap();
    assert!(page.has_class(nodes.scroll_top, "show"));

    let outcome = page.click(nodes.scroll_top).unwrap();
    assert_eq!(outcome, EventOutcome::PROCEED);
    assert_eq!(page.doc.scroll_offset(), 0.0);
    assert!(!page.has_class(nodes.scroll_top, "show"));
    assert!(!page.has_class(nodes.navbar, "scrolled"));
}

// ── Startup ───────────────────────────────────────────────────────────

#[test]
fn banner_is_written_once_at_startup() {
    let (page, _) = ready_landing();
    let console = page.doc.console();
    assert_eq!(console.len(), 4);
    assert!(console[0].0.contains("JISHIN ALERT"));
    assert!(console[3].0.contains("DROP, COVER, and HOLD ON!"));
}

#[test]
fn empty_page_binds_quietly() {
    let page = FakePage::ready(FakeDocument::new()).unwrap();
    assert!(page.controller.is_bound());
    assert_eq!(
        page.doc.listeners(),
        &[(EventTarget::Window, EventKind::Load)]
    );
    assert!(page.doc.observers().is_empty());
}

#[test]
fn scroll_listener_is_shared_between_effects() {
    let (page, _) = ready_landing();
    let scroll_listeners = page
        .doc
        .listeners()
        .iter()
        .filter(|(t, k)| *t == EventTarget::Window && *k == EventKind::Scroll)
        .count();
    assert_eq!(scroll_listeners, 1);
}

#[test]
fn failing_effect_does_not_block_the_rest() {
    let (mut doc, nodes) = landing_page(0);
    doc.fail_element_creation();
    let mut page = FakePage::new(doc, &PageConfig::default());

    let err = page.controller.bind(&mut page.doc).unwrap_err();
    assert!(matches!(err, PageFxError::Host(_)));

    page.scroll_to(100.0).unwrap();
    assert!(page.has_class(nodes.navbar, "scrolled"));
}

/// Fails on every event it sees.
struct Broken;

impl Effect for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn bind(&mut self, _doc: &mut dyn Document) -> Result<()> {
        Ok(())
    }

    fn handle(&mut self, _event: &PageEvent, _doc: &mut dyn Document) -> Result<EventOutcome> {
        Err(PageFxError::Host("broken effect".into()))
    }
}

#[test]
fn failing_handler_keeps_the_merged_outcome() {
    let (mut doc, nodes) = landing_page(0);
    let config = PageConfig::default();
    let mut registry = EffectRegistry::new();
    registry.push(Broken);
    registry.push(DownloadGuard::new(
        &config.selectors.download_button,
        config.download.clone(),
    ));
    let mut controller = PageController::with_registry(registry);
    controller.bind(&mut doc).unwrap();

    let dispatched = controller.dispatch(&PageEvent::Click { node: nodes.download }, &mut doc);
    assert_eq!(dispatched.outcome, EventOutcome::PREVENT);
    assert_eq!(
        dispatched.error,
        Some(PageFxError::Host("broken effect".into()))
    );
    assert_eq!(doc.alerts().len(), 1);
}

#[test]
fn rebinding_is_a_no_op() {
    let (mut page, _) = ready_landing();
    page.controller.bind(&mut page.doc).unwrap();
    assert_eq!(page.doc.console().len(), 4);
}

#[test]
fn events_before_bind_are_ignored() {
    let (doc, nodes) = landing_page(0);
    let mut page = FakePage::new(doc, &PageConfig::default());
    let dispatched = page
        .controller
        .dispatch(&PageEvent::Click { node: nodes.download }, &mut page.doc);
    assert_eq!(dispatched.outcome, EventOutcome::PROCEED);
    assert_eq!(dispatched.error, None);
    assert!(page.doc.alerts().is_empty());
    assert_eq!(page.controller.events_dispatched(), 0);
}

#[test]
fn config_overrides_reach_effects() {
    let config = PageConfig::from_json_str(
        r#"{"navbar": {"scrolledThreshold": 200}, "particles": {"count": 5}}"#,
    )
    .unwrap();
    let (doc, nodes) = landing_page(0);
    let mut page = FakePage::ready_with(doc, &config).unwrap();

    assert_eq!(page.doc.children(nodes.particles).len(), 5);
    page.scroll_to(150.0).unwrap();
    assert!(!page.has_class(nodes.navbar, "scrolled"));
    page.scroll_to(201.0).unwrap();
    assert!(page.has_class(nodes.navbar, "scrolled"));
}

#[test]
fn document_trait_is_usable_through_the_page() {
    let (mut page, nodes) = ready_landing();
    assert_eq!(page.doc.query(".navbar"), Some(nodes.navbar));
    assert_eq!(page.doc.element_by_id("scrollTopBtn"), Some(nodes.scroll_top));
}
