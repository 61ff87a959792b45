#![forbid(unsafe_code)]

//! Navbar shadow once the page is scrolled.

use crate::config::NavbarConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId};
use crate::{Effect, Result};

/// Adds the scrolled class above the threshold and removes it at or below.
#[derive(Debug, Clone)]
pub struct NavbarShadow {
    selector: String,
    config: NavbarConfig,
    navbar: Option<NodeId>,
}

impl NavbarShadow {
    #[must_use]
    pub fn new(selector: impl Into<String>, config: NavbarConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
            navbar: None,
        }
    }

    /// Whether an offset puts the navbar in the scrolled state.
    #[must_use]
    pub fn is_scrolled(&self, offset: f64) -> bool {
        offset > self.config.scrolled_threshold
    }
}

impl Effect for NavbarShadow {
    fn name(&self) -> &'static str {
        "navbar_shadow"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        self.navbar = doc.query(&self.selector);
        if self.navbar.is_none() {
            crate::debug!(selector = %self.selector, "navbar not found; shadow disabled");
            return Ok(());
        }
        doc.listen(EventTarget::Window, EventKind::Scroll)
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        if let (PageEvent::Scroll(metrics), Some(navbar)) = (event, self.navbar) {
            if self.is_scrolled(metrics.offset) {
                doc.add_class(navbar, &self.config.scrolled_class);
            } else {
                doc.remove_class(navbar, &self.config.scrolled_class);
            }
        }
        Ok(EventOutcome::PROCEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let navbar = NavbarShadow::new(".navbar", NavbarConfig::default());
        assert!(!navbar.is_scrolled(0.0));
        assert!(!navbar.is_scrolled(50.0));
        assert!(navbar.is_scrolled(50.5));
    }
}
