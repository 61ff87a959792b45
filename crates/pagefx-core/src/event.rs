#![forbid(unsafe_code)]

//! Canonical page events pushed by the host.

use crate::host::{FrameId, NodeId, ObserverId, TimerId};

/// Scroll sample taken by the host when a `scroll` event fires.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Vertical offset (`pageYOffset`), non-negative.
    pub offset: f64,
    /// Viewport height (`innerHeight`).
    pub viewport_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(offset: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            viewport_height,
        }
    }
}

/// One host event.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The window scrolled.
    Scroll(ScrollMetrics),
    /// A listened-to element was clicked.
    Click { node: NodeId },
    /// The pointer entered a listened-to element.
    PointerEnter { node: NodeId },
    /// A watched element changed intersection state.
    Visibility {
        observer: ObserverId,
        node: NodeId,
        intersecting: bool,
    },
    /// A requested animation frame arrived.
    Frame { id: FrameId },
    /// A requested timer fired.
    Timer { id: TimerId },
    /// The window finished loading all resources.
    Load,
}

impl PageEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scroll(_) => "scroll",
            Self::Click { .. } => "click",
            Self::PointerEnter { .. } => "pointer_enter",
            Self::Visibility { .. } => "visibility",
            Self::Frame { .. } => "frame",
            Self::Timer { .. } => "timer",
            Self::Load => "load",
        }
    }
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the native event.
    pub prevent_default: bool,
}

impl EventOutcome {
    /// Let the native default action proceed.
    pub const PROCEED: Self = Self {
        prevent_default: false,
    };

    /// Suppress the native default action.
    pub const PREVENT: Self = Self {
        prevent_default: true,
    };

    /// Combine outcomes from several effects; any prevention wins.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_prevention() {
        assert_eq!(EventOutcome::PROCEED.merge(EventOutcome::PROCEED), EventOutcome::PROCEED);
        assert_eq!(EventOutcome::PROCEED.merge(EventOutcome::PREVENT), EventOutcome::PREVENT);
        assert_eq!(EventOutcome::PREVENT.merge(EventOutcome::PROCEED), EventOutcome::PREVENT);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(PageEvent::Load.kind_name(), "load");
        assert_eq!(
            PageEvent::Scroll(ScrollMetrics::new(1.0, 2.0)).kind_name(),
            "scroll"
        );
    }
}
