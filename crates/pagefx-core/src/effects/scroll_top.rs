#![forbid(unsafe_code)]

//! Back-to-top button.

use crate::config::ScrollTopConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId};
use crate::{Effect, Result};

/// Shows the control past the threshold and scrolls home when clicked.
#[derive(Debug, Clone)]
pub struct ScrollTopButton {
    element_id: String,
    config: ScrollTopConfig,
    button: Option<NodeId>,
}

impl ScrollTopButton {
    #[must_use]
    pub fn new(element_id: impl Into<String>, config: ScrollTopConfig) -> Self {
        Self {
            element_id: element_id.into(),
            config,
            button: None,
        }
    }

    /// Whether an offset shows the control.
    #[must_use]
    pub fn is_visible_at(&self, offset: f64) -> bool {
        offset > self.config.threshold
    }
}

impl Effect for ScrollTopButton {
    fn name(&self) -> &'static str {
        "scroll_top_button"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        let Some(button) = doc.element_by_id(&self.element_id) else {
            crate::debug!(id = %self.element_id, "scroll-to-top control missing");
            return Ok(());
        };
        doc.listen(EventTarget::Window, EventKind::Scroll)?;
        doc.listen(EventTarget::Node(button), EventKind::Click)?;
        self.button = Some(button);
        Ok(())
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let Some(button) = self.button else {
            return Ok(EventOutcome::PROCEED);
        };
        match event {
            PageEvent::Scroll(metrics) => {
                if self.is_visible_at(metrics.offset) {
                    doc.add_class(button, &self.config.visible_class);
                } else {
                    doc.remove_class(button, &self.config.visible_class);
                }
            }
            PageEvent::Click { node } if *node == button => doc.scroll_to_top(),
            _ => {}
        }
        Ok(EventOutcome::PROCEED)
    }
}
