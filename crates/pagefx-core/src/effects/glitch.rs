#![forbid(unsafe_code)]

//! Glitch animation replay on hover.

use crate::config::GlitchConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId, TimerId};
use crate::{Effect, Result};

/// Restarts the glitch animation each time the pointer enters the element.
///
/// Setting `animation: none` and re-applying the animation after a short
/// timer forces the browser to start again from the first keyframe.
#[derive(Debug, Clone)]
pub struct GlitchHover {
    selector: String,
    config: GlitchConfig,
    target: Option<NodeId>,
    pending: Option<TimerId>,
}

impl GlitchHover {
    #[must_use]
    pub fn new(selector: impl Into<String>, config: GlitchConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
            target: None,
            pending: None,
        }
    }
}

impl Effect for GlitchHover {
    fn name(&self) -> &'static str {
        "glitch_hover"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        self.target = doc.query(&self.selector);
        match self.target {
            Some(target) => doc.listen(EventTarget::Node(target), EventKind::PointerEnter),
            None => Ok(()),
        }
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let Some(target) = self.target else {
            return Ok(EventOutcome::PROCEED);
        };
        match *event {
            PageEvent::PointerEnter { node } if node == target => {
                doc.set_style(target, "animation", "none");
                self.pending = Some(doc.set_timeout(self.config.restart_delay())?);
            }
            PageEvent::Timer { id } if self.pending == Some(id) => {
                doc.set_style(target, "animation", &self.config.animation);
                self.pending = None;
            }
            _ => {}
        }
        Ok(EventOutcome::PROCEED)
    }
}
