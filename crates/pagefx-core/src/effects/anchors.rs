#![forbid(unsafe_code)]

//! Smooth scrolling for in-page fragment links.

use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId};
use crate::{Effect, Result};

/// Intercepts clicks on `href="#..."` links and smooth-scrolls to the target.
///
/// The native jump is always suppressed. If the fragment does not resolve to
/// an element (or is not a valid selector, like a bare `#`), nothing scrolls.
#[derive(Debug, Clone)]
pub struct SmoothAnchors {
    selector: String,
    links: Vec<NodeId>,
}

impl SmoothAnchors {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            links: Vec::new(),
        }
    }
}

impl Effect for SmoothAnchors {
    fn name(&self) -> &'static str {
        "smooth_anchors"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        self.links = doc.query_all(&self.selector);
        for &link in &self.links {
            doc.listen(EventTarget::Node(link), EventKind::Click)?;
        }
        crate::debug!(links = self.links.len(), "smooth anchors bound");
        Ok(())
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let PageEvent::Click { node } = *event else {
            return Ok(EventOutcome::PROCEED);
        };
        if !self.links.contains(&node) {
            return Ok(EventOutcome::PROCEED);
        }
        if let Some(target) = doc
            .attribute(node, "href")
            .and_then(|href| doc.query(&href))
        {
            doc.scroll_into_view(target);
        }
        Ok(EventOutcome::PREVENT)
    }
}
