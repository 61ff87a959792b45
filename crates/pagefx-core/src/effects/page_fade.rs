#![forbid(unsafe_code)]

//! Fade the page in once everything has loaded.

use crate::config::FadeConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId, TimerId};
use crate::{Effect, Result};

/// On window load: hide the body, then after a short timer enable the opacity
/// transition and show it again.
#[derive(Debug, Clone)]
pub struct PageFadeIn {
    config: FadeConfig,
    body: Option<NodeId>,
    pending: Option<TimerId>,
}

impl PageFadeIn {
    #[must_use]
    pub fn new(config: FadeConfig) -> Self {
        Self {
            config,
            body: None,
            pending: None,
        }
    }
}

impl Effect for PageFadeIn {
    fn name(&self) -> &'static str {
        "page_fade_in"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        self.body = doc.body();
        match self.body {
            Some(_) => doc.listen(EventTarget::Window, EventKind::Load),
            None => Ok(()),
        }
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let Some(body) = self.body else {
            return Ok(EventOutcome::PROCEED);
        };
        match *event {
            PageEvent::Load => {
                doc.set_style(body, "opacity", "0");
                self.pending = Some(doc.set_timeout(self.config.delay())?);
            }
            PageEvent::Timer { id } if self.pending == Some(id) => {
                doc.set_style(body, "transition", &self.config.transition);
                doc.set_style(body, "opacity", "1");
                self.pending = None;
            }
            _ => {}
        }
        Ok(EventOutcome::PROCEED)
    }
}
