#![forbid(unsafe_code)]

//! Parallax drift and fade of the hero content.

use crate::config::ParallaxConfig;
use crate::event::{EventOutcome, PageEvent, ScrollMetrics};
use crate::host::{Document, EventKind, EventTarget, NodeId};
use crate::{Effect, Result};

/// Moves the hero content down at a fraction of the scroll speed and fades it
/// out linearly over the first viewport height.
///
/// Past one viewport height the element is left as last drawn.
#[derive(Debug, Clone)]
pub struct ParallaxHero {
    selector: String,
    config: ParallaxConfig,
    hero: Option<NodeId>,
}

impl ParallaxHero {
    #[must_use]
    pub fn new(selector: impl Into<String>, config: ParallaxConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
            hero: None,
        }
    }

    /// `(translate_y_px, opacity)` for a scroll sample, or `None` once the
    /// hero has scrolled out of the first viewport.
    #[must_use]
    pub fn frame_for(&self, metrics: ScrollMetrics) -> Option<(f64, f64)> {
        if metrics.offset < metrics.viewport_height {
            Some((
                metrics.offset * self.config.factor,
                1.0 - metrics.offset / metrics.viewport_height,
            ))
        } else {
            None
        }
    }
}

impl Effect for ParallaxHero {
    fn name(&self) -> &'static str {
        "parallax_hero"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        self.hero = doc.query(&self.selector);
        match self.hero {
            Some(_) => doc.listen(EventTarget::Window, EventKind::Scroll),
            None => Ok(()),
        }
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        if let (PageEvent::Scroll(metrics), Some(hero)) = (event, self.hero) {
            if let Some((translate, opacity)) = self.frame_for(*metrics) {
                doc.set_style(hero, "transform", &format!("translateY({translate}px)"));
                doc.set_style(hero, "opacity", &opacity.to_string());
            }
        }
        Ok(EventOutcome::PROCEED)
    }
}
