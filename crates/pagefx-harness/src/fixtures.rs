#![forbid(unsafe_code)]

//! The stock landing page as a [`FakeDocument`].

use pagefx_core::NodeId;

use crate::document::{El, FakeDocument};

/// Handles to the interesting elements of [`landing_page`].
#[derive(Debug, Clone)]
pub struct LandingNodes {
    pub navbar: NodeId,
    pub nav_container: NodeId,
    pub nav_menu: NodeId,
    pub nav_links: Vec<NodeId>,
    pub hero_content: NodeId,
    pub particles: NodeId,
    pub glitch: NodeId,
    pub download: NodeId,
    pub features_section: NodeId,
    pub feature_boxes: Vec<NodeId>,
    pub protocol_steps: Vec<NodeId>,
    /// `1200`, `98`, `N/A` in that order.
    pub stats: Vec<NodeId>,
    pub scroll_top: NodeId,
}

/// Build the landing page: navbar with menu, hero, features, protocol,
/// stats, download button and a scroll-to-top control.
#[must_use]
pub fn landing_page(seed: u64) -> (FakeDocument, LandingNodes) {
    let mut doc = FakeDocument::with_seed(seed);
    let body = doc.body_id();

    let navbar = doc.append(body, El::new("nav").class("navbar"));
    let nav_container = doc.append(navbar, El::new("div").class("nav-container"));
    doc.append(nav_container, El::new("a").class("logo").attr("href", "#home"));
    let nav_menu = doc.append(nav_container, El::new("ul").class("nav-menu"));
    let nav_links = ["#features", "#protocol", "#download"]
        .into_iter()
        .map(|href| {
            let li = doc.append(nav_menu, El::new("li"));
            doc.append(li, El::new("a").attr("href", href))
        })
        .collect();

    let hero = doc.append(body, El::new("section").class("hero").id("home"));
    let particles = doc.append(hero, El::new("div").class("hero-particles"));
    let hero_content = doc.append(hero, El::new("div").class("hero-content"));
    let glitch = doc.append(
        hero_content,
        El::new("h1").class("glitch").attr("data-text", "JISHIN ALERT"),
    );
    let download = doc.append(
        hero_content,
        El::new("a").class("btn btn-download").attr("href", "#"),
    );

    let features_section = doc.append(body, El::new("section").id("features"));
    let feature_boxes = (0..4)
        .map(|_| doc.append(features_section, El::new("div").class("feature-box")))
        .collect();

    let protocol = doc.append(body, El::new("section").id("protocol"));
    let protocol_steps = (0..3)
        .map(|_| doc.append(protocol, El::new("div").class("protocol-step")))
        .collect();

    let stats_section = doc.append(body, El::new("section").class("stats"));
    let stats = ["1200", "98", "N/A"]
        .into_iter()
        .map(|text| doc.append(stats_section, El::new("span").class("stat-number").text(text)))
        .collect();

    doc.append(body, El::new("section").id("download"));
    let scroll_top = doc.append(body, El::new("button").id("scrollTopBtn"));

    let nodes = LandingNodes {
        navbar,
        nav_container,
        nav_menu,
        nav_links,
        hero_content,
        particles,
        glitch,
        download,
        features_section,
        feature_boxes,
        protocol_steps,
        stats,
        scroll_top,
    };
    (doc, nodes)
}
