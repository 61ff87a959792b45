#![forbid(unsafe_code)]

//! Guard against shipping the page with an unconfigured download link.

use crate::config::DownloadConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, EventKind, EventTarget, NodeId};
use crate::{Effect, Result};

/// Blocks the download button and tells the page owner to configure it while
/// its href is still the placeholder. Any other href passes through.
#[derive(Debug, Clone)]
pub struct DownloadGuard {
    selector: String,
    config: DownloadConfig,
    button: Option<NodeId>,
}

impl DownloadGuard {
    #[must_use]
    pub fn new(selector: impl Into<String>, config: DownloadConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
            button: None,
        }
    }
}

impl Effect for DownloadGuard {
    fn name(&self) -> &'static str {
        "download_guard"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        self.button = doc.query(&self.selector);
        match self.button {
            Some(button) => doc.listen(EventTarget::Node(button), EventKind::Click),
            None => Ok(()),
        }
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let PageEvent::Click { node } = *event else {
            return Ok(EventOutcome::PROCEED);
        };
        if Some(node) != self.button {
            return Ok(EventOutcome::PROCEED);
        }
        if doc.attribute(node, "href").as_deref() == Some(self.config.placeholder_href.as_str()) {
            crate::warn!("download link still points at the placeholder");
            doc.alert(&self.config.notice);
            return Ok(EventOutcome::PREVENT);
        }
        Ok(EventOutcome::PROCEED)
    }
}
