#![forbid(unsafe_code)]

//! Count-up animation for statistic numbers.

use crate::animation::{parse_count_target, CountFrame, CountUp};
use crate::config::CounterConfig;
use crate::event::{EventOutcome, PageEvent};
use crate::host::{Document, FrameId, NodeId, ObserverId, VisibilityOptions};
use crate::{Effect, Result};

/// Lifecycle of one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterPhase {
    /// Waiting for the element to scroll into view.
    Waiting,
    /// Counting; a frame is pending.
    Running,
    /// Showing the original text; no further work.
    Done,
}

#[derive(Debug, Clone)]
struct Counter {
    node: NodeId,
    original: String,
    tween: CountUp,
    observer: ObserverId,
    frame: Option<FrameId>,
    phase: CounterPhase,
}

/// Animates every numeric `.stat-number` from 0 to its written value the
/// first time it becomes visible.
///
/// Each counter has its own watcher, detached after it fires. While counting,
/// the element shows the floored accumulator; at the end it shows its exact
/// original text. Non-numeric elements are never touched.
#[derive(Debug, Clone)]
pub struct StatCounters {
    selector: String,
    config: CounterConfig,
    counters: Vec<Counter>,
}

impl StatCounters {
    #[must_use]
    pub fn new(selector: impl Into<String>, config: CounterConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
            counters: Vec::new(),
        }
    }

    fn advance(counter: &mut Counter, doc: &mut dyn Document) -> Result<()> {
        match counter.tween.step() {
            CountFrame::Running(value) => {
                doc.set_text(counter.node, &value.to_string());
                counter.frame = Some(doc.request_frame()?);
            }
            CountFrame::Done => {
                doc.set_text(counter.node, &counter.original);
                counter.frame = None;
                counter.phase = CounterPhase::Done;
                crate::trace!(node = counter.node.0, "counter finished");
            }
        }
        Ok(())
    }
}

impl Effect for StatCounters {
    fn name(&self) -> &'static str {
        "stat_counters"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        for node in doc.query_all(&self.selector) {
            let original = doc.text(node).unwrap_or_default();
            let Some(target) = parse_count_target(&original) else {
                crate::debug!(text = %original, "stat is not numeric; skipped");
                continue;
            };
            let observer = doc.observe(&[node], VisibilityOptions::default())?;
            self.counters.push(Counter {
                node,
                original,
                tween: CountUp::new(target, self.config.duration(), self.config.frame()),
                observer,
                frame: None,
                phase: CounterPhase::Waiting,
            });
        }
        Ok(())
    }

    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        match *event {
            PageEvent::Visibility {
                observer,
                node,
                intersecting: true,
            } => {
                if let Some(counter) = self.counters.iter_mut().find(|c| {
                    c.observer == observer && c.node == node && c.phase == CounterPhase::Waiting
                }) {
                    doc.unobserve(observer, node);
                    counter.phase = CounterPhase::Running;
                    Self::advance(counter, doc)?;
                }
            }
            PageEvent::Frame { id } => {
                if let Some(counter) = self
                    .counters
                    .iter_mut()
                    .find(|c| c.frame == Some(id) && c.phase == CounterPhase::Running)
                {
                    Self::advance(counter, doc)?;
                }
            }
            _ => {}
        }
        Ok(EventOutcome::PROCEED)
    }
}
