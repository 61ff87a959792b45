#![forbid(unsafe_code)]

//! The document host seam.
//!
//! Effects never see `web_sys` types. They address elements through opaque
//! [`NodeId`] handles handed out by the host, and request deferred work
//! (animation frames, timers, visibility watchers) through ids that come back
//! inside [`PageEvent`](crate::PageEvent)s.

use core::time::Duration;

use crate::Result;

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Handle returned by [`Document::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// Handle returned by [`Document::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Handle returned by [`Document::request_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

/// DOM event kinds the controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `scroll` on the window.
    Scroll,
    /// `click` on an element.
    Click,
    /// `mouseenter` on an element.
    PointerEnter,
    /// `load` on the window (all resources fetched).
    Load,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::Load => "load",
        }
    }
}

/// Options for a visibility watcher (an `IntersectionObserver` in browsers).
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be visible, in [0, 1].
    pub threshold: f64,
    /// CSS margin applied to the root viewport (`"0px 0px -50px 0px"`).
    pub root_margin: String,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

/// Everything an effect may do to the page.
///
/// Lookups return `None`/empty when nothing matches or the selector is
/// invalid; effects treat that as "feature absent". Mutations on a stale or
/// unknown [`NodeId`] are ignored by hosts.
pub trait Document {
    /// First element matching a CSS selector.
    fn query(&mut self, selector: &str) -> Option<NodeId>;

    /// All elements matching a CSS selector, in document order.
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    /// Element with the given `id` attribute.
    fn element_by_id(&mut self, id: &str) -> Option<NodeId>;

    /// The `<body>` element.
    fn body(&mut self) -> Option<NodeId>;

    /// Attribute value as written in markup.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Text content of an element.
    fn text(&self, node: NodeId) -> Option<String>;

    /// Replace the text content of an element.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Add `class` to the element's class list.
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Remove `class` from the element's class list.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Toggle `class`, returning whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool;

    /// Set an inline style property (CSS property name, e.g. `animation-delay`).
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Result<NodeId>;

    /// Replace the element's `class` attribute.
    fn set_class_name(&mut self, node: NodeId, class_name: &str);

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Append a `<style>` element with the given text to `<head>`.
    fn inject_stylesheet(&mut self, css: &str) -> Result<()>;

    /// Subscribe to `kind` events on `target`.
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> Result<()>;

    /// Start watching `nodes` for viewport intersection.
    fn observe(&mut self, nodes: &[NodeId], options: VisibilityOptions) -> Result<ObserverId>;

    /// Stop watching one node.
    fn unobserve(&mut self, observer: ObserverId, node: NodeId);

    /// Smooth-scroll so `node` is aligned with the top of the viewport.
    fn scroll_into_view(&mut self, node: NodeId);

    /// Smooth-scroll the viewport back to the origin.
    fn scroll_to_top(&mut self);

    /// Ask for a callback on the next animation frame.
    fn request_frame(&mut self) -> Result<FrameId>;

    /// Ask for a callback after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> Result<TimerId>;

    /// Show a blocking notice to the user.
    fn alert(&mut self, message: &str);

    /// Write one styled line (`%c` + CSS) to the developer console.
    fn console_styled(&mut self, text: &str, css: &str);

    /// Uniform random number in `[0, 1)`.
    fn random(&mut self) -> f64;
}
