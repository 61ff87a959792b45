#![forbid(unsafe_code)]

//! One-shot reveal of feature boxes and protocol steps.

use std::collections::HashSet;
use std::time::Duration;

use crate::animation::{css_seconds, stagger_offsets};
use crate::config::RevealConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, NodeId, ObserverId, VisibilityOptions};
use crate::{Effect, Result};

/// Hides two element groups at startup and reveals each the first time it
/// scrolls into view.
///
/// Items get a transition delay of `index * stagger` within their group.
/// Revealed elements are unobserved and stay revealed.
#[derive(Debug, Clone)]
pub struct RevealOnScroll {
    feature_selector: String,
    protocol_selector: String,
    config: RevealConfig,
    observer: Option<ObserverId>,
    watched: Vec<NodeId>,
    revealed: HashSet<NodeId>,
}

impl RevealOnScroll {
    #[must_use]
    pub fn new(
        feature_selector: impl Into<String>,
        protocol_selector: impl Into<String>,
        config: RevealConfig,
    ) -> Self {
        Self {
            feature_selector: feature_selector.into(),
            protocol_selector: protocol_selector.into(),
            config,
            observer: None,
            watched: Vec::new(),
            revealed: HashSet::new(),
        }
    }

    fn hide_group(&mut self, doc: &mut dyn Document, nodes: &[NodeId], stagger: Duration) {
        let offsets = stagger_offsets(nodes.len(), stagger);
        for (&node, delay) in nodes.iter().zip(offsets) {
            doc.set_style(node, "opacity", "0");
            doc.set_style(node, "transform", &self.config.hidden_transform);
            doc.set_style(
                node,
                "transition",
                &format!("{} {}", self.config.transition, css_seconds(delay)),
            );
            self.watched.push(node);
        }
    }
}

impl Effect for RevealOnScroll {
    fn name(&self) -> &'static str {
        "reveal_on_scroll"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        let features = doc.query_all(&self.feature_selector);
        let steps = doc.query_all(&self.protocol_selector);
        self.hide_group(doc, &features, self.config.feature_stagger());
        self.hide_group(doc, &steps, self.config.protocol_stagger());
        if self.watched.is_empty() {
            crate::debug!("no reveal targets on page");
            return Ok(());
        }
        let options = VisibilityOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin.clone(),
        };
        self.observer = Some(doc.observe(&self.watched, options)?);
        crate::debug!(
            features = features.len(),
            steps = steps.len(),
            "reveal watcher attached"
        );
        Ok(())
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let PageEvent::Visibility {
            observer,
            node,
            intersecting: true,
        } = *event
        else {
            return Ok(EventOutcome::PROCEED);
        };
        if Some(observer) != self.observer || !self.watched.contains(&node) {
            return Ok(EventOutcome::PROCEED);
        }
        if self.revealed.insert(node) {
            doc.set_style(node, "opacity", "1");
            doc.set_style(node, "transform", &self.config.shown_transform);
            doc.unobserve(observer, node);
        }
        Ok(EventOutcome::PROCEED)
    }
}
