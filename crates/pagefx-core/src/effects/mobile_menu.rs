#![forbid(unsafe_code)]

//! Hamburger toggle for the navigation menu on narrow viewports.

use crate::config::MenuConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId};
use crate::styles::hamburger_stylesheet;
use crate::{Effect, Result};

const HAMBURGER_BARS: usize = 3;

/// Selectors the menu effect needs.
#[derive(Debug, Clone)]
pub struct MenuSelectors {
    pub container: String,
    pub menu: String,
    pub links: String,
}

/// Synthesizes a hamburger button and keeps it in lockstep with the menu.
///
/// Clicking the button toggles the active class on both. Clicking any menu
/// link clears it from both, whatever the current state.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    selectors: MenuSelectors,
    config: MenuConfig,
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    links: Vec<NodeId>,
}

impl MobileMenu {
    #[must_use]
    pub fn new(selectors: MenuSelectors, config: MenuConfig) -> Self {
        Self {
            selectors,
            config,
            toggle: None,
            menu: None,
            links: Vec::new(),
        }
    }

    fn build_toggle(doc: &mut dyn Document) -> Result<NodeId> {
        let button = doc.create_element("button")?;
        doc.set_class_name(button, "hamburger");
        for _ in 0..HAMBURGER_BARS {
            let bar = doc.create_element("span")?;
            doc.append_child(button, bar)?;
        }
        Ok(button)
    }
}

impl Effect for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile_menu"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        let (Some(menu), Some(container)) = (
            doc.query(&self.selectors.menu),
            doc.query(&self.selectors.container),
        ) else {
            crate::debug!("nav menu or container missing; hamburger disabled");
            return Ok(());
        };

        let toggle = Self::build_toggle(doc)?;
        doc.inject_stylesheet(&hamburger_stylesheet(self.config.breakpoint_px))?;
        doc.append_child(container, toggle)?;
        doc.listen(EventTarget::Node(toggle), EventKind::Click)?;

        self.links = doc.query_all(&self.selectors.links);
        for &link in &self.links {
            doc.listen(EventTarget::Node(link), EventKind::Click)?;
        }
        self.toggle = Some(toggle);
        self.menu = Some(menu);
        Ok(())
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let (PageEvent::Click { node }, Some(toggle), Some(menu)) = (event, self.toggle, self.menu)
        else {
            return Ok(EventOutcome::PROCEED);
        };
        let active = self.config.active_class.as_str();
        if *node == toggle {
            doc.toggle_class(toggle, active);
            doc.toggle_class(menu, active);
        } else if self.links.contains(node) {
            doc.remove_class(toggle, active);
            doc.remove_class(menu, active);
        }
        Ok(EventOutcome::PROCEED)
    }
}
