#![forbid(unsafe_code)]

//! [`FakePage`]: a controller bound to a [`FakeDocument`], driven like a
//! browser would drive it.
//!
//! Events are only delivered when some effect subscribed to them, mirroring
//! DOM listener semantics. Scroll requests made by effects are followed by a
//! synthetic scroll event, as smooth scrolling would produce.

use std::time::Duration;

use pagefx_core::{
    Document, EventKind, EventOutcome, EventTarget, NodeId, PageConfig, PageController,
    PageEvent, Result, ScrollMetrics,
};

use crate::document::FakeDocument;

/// Nominal frame interval used by [`FakePage::run_frame`].
pub const FRAME: Duration = Duration::from_millis(16);

/// A bound controller plus its fake page.
#[derive(Debug)]
pub struct FakePage {
    pub controller: PageController,
    pub doc: FakeDocument,
}

impl FakePage {
    /// Controller with the standard effects over `doc`, not yet bound.
    #[must_use]
    pub fn new(doc: FakeDocument, config: &PageConfig) -> Self {
        Self {
            controller: PageController::new(config),
            doc,
        }
    }

    /// Bind with the default config.
    pub fn ready(doc: FakeDocument) -> Result<Self> {
        Self::ready_with(doc, &PageConfig::default())
    }

    /// Bind with `config`.
    pub fn ready_with(doc: FakeDocument, config: &PageConfig) -> Result<Self> {
        let mut page = Self::new(doc, config);
        page.controller.bind(&mut page.doc)?;
        Ok(page)
    }

    fn deliver(&mut self, event: PageEvent) -> Result<EventOutcome> {
        let outcome = self.controller.dispatch(&event, &mut self.doc).into_result()?;
        if self.doc.take_scroll_request() {
            self.emit_scroll()?;
        }
        Ok(outcome)
    }

    fn emit_scroll(&mut self) -> Result<()> {
        if self.doc.is_listening(EventTarget::Window, EventKind::Scroll) {
            let metrics = ScrollMetrics::new(self.doc.scroll_offset(), self.doc.viewport_height());
            self.controller
                .dispatch(&PageEvent::Scroll(metrics), &mut self.doc)
                .into_result()?;
        }
        Ok(())
    }

    /// Scroll the window to `offset`.
    pub fn scroll_to(&mut self, offset: f64) -> Result<()> {
        self.doc.set_scroll_offset(offset);
        self.emit_scroll()
    }

    /// Click an element. Returns the merged outcome, or `PROCEED` if nothing
    /// listens for clicks on it.
    pub fn click(&mut self, node: NodeId) -> Result<EventOutcome> {
        if !self.doc.is_listening(EventTarget::Node(node), EventKind::Click) {
            return Ok(EventOutcome::PROCEED);
        }
        self.deliver(PageEvent::Click { node })
    }

    /// Move the pointer onto an element.
    pub fn hover(&mut self, node: NodeId) -> Result<()> {
        if self.doc.is_listening(EventTarget::Node(node), EventKind::PointerEnter) {
            self.deliver(PageEvent::PointerEnter { node })?;
        }
        Ok(())
    }

    /// Report `node` as intersecting to every watcher observing it.
    pub fn reveal(&mut self, node: NodeId) -> Result<()> {
        self.set_visibility(node, true)
    }

    /// Report an intersection change for `node` to every watcher observing it.
    pub fn set_visibility(&mut self, node: NodeId, intersecting: bool) -> Result<()> {
        for observer in self.doc.observers_of(node) {
            self.deliver(PageEvent::Visibility {
                observer,
                node,
                intersecting,
            })?;
        }
        Ok(())
    }

    /// Fire the window `load` event.
    pub fn load(&mut self) -> Result<()> {
        if self.doc.is_listening(EventTarget::Window, EventKind::Load) {
            self.deliver(PageEvent::Load)?;
        }
        Ok(())
    }

    /// Advance time by `dt`, firing timers that become due.
    pub fn advance(&mut self, dt: Duration) -> Result<()> {
        for id in self.doc.advance_clock(dt) {
            self.deliver(PageEvent::Timer { id })?;
        }
        Ok(())
    }

    /// Deliver every pending frame request once and advance one frame.
    ///
    /// Returns how many frames were delivered.
    pub fn run_frame(&mut self) -> Result<usize> {
        let frames = self.doc.take_frames();
        for &id in &frames {
            self.deliver(PageEvent::Frame { id })?;
        }
        self.advance(FRAME)?;
        Ok(frames.len())
    }

    /// Run frames until none are requested or `max_frames` is reached.
    ///
    /// Returns the number of frame ticks run.
    pub fn run_until_idle(&mut self, max_frames: usize) -> Result<usize> {
        let mut ticks = 0;
        while self.doc.pending_frames() > 0 && ticks < max_frames {
            self.run_frame()?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Text content shortcut.
    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        self.doc.text(node).unwrap_or_default()
    }

    /// Class check shortcut.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.doc.has_class(node, class)
    }
}
