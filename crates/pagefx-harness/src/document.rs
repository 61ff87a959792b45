#![forbid(unsafe_code)]

//! In-memory [`Document`] for deterministic tests.
//!
//! The tree starts as `<html><head/><body/></html>`. Tests add elements with
//! [`FakeDocument::append`] and inspect every side effect the controller
//! produces: classes, inline styles, listeners, watchers, pending frames and
//! timers, alerts, console lines, stylesheets and scroll requests.

use std::collections::BTreeMap;
use std::time::Duration;

use pagefx_core::{
    Document, EventKind, EventTarget, FrameId, NodeId, ObserverId, PageFxError, Result, TimerId,
    VisibilityOptions,
};

use crate::selector::{Matchable, Selector};

/// Element description used to build fake pages.
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
}

impl El {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Add a class (space separated classes also work).
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(k, _)| k == "class") {
            Some((_, v)) => {
                v.push(' ');
                v.push_str(class);
            }
            None => self.attrs.push(("class".to_string(), class.to_string())),
        }
        self
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

/// One node of the fake tree.
#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub style: BTreeMap<String, String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Matchable for FakeNode {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A registered visibility watcher.
#[derive(Debug, Clone)]
pub struct FakeObserver {
    pub options: VisibilityOptions,
    pub watched: Vec<NodeId>,
}

/// Simple LCG PRNG for deterministic generation.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// In-memory page.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    nodes: Vec<FakeNode>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    listeners: Vec<(EventTarget, EventKind)>,
    observers: Vec<FakeObserver>,
    timers: Vec<(TimerId, Duration)>,
    next_timer: u32,
    frames: Vec<FrameId>,
    next_frame: u32,
    now: Duration,
    alerts: Vec<String>,
    console: Vec<(String, String)>,
    stylesheets: Vec<String>,
    scroll_offset: f64,
    viewport_height: f64,
    scrolled_into_view: Vec<NodeId>,
    scroll_pending: bool,
    rng: SeededRng,
    fail_create: bool,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDocument {
    /// Empty page with an 800px tall viewport and seed 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            listeners: Vec::new(),
            observers: Vec::new(),
            timers: Vec::new(),
            next_timer: 1,
            frames: Vec::new(),
            next_frame: 1,
            now: Duration::ZERO,
            alerts: Vec::new(),
            console: Vec::new(),
            stylesheets: Vec::new(),
            scroll_offset: 0.0,
            viewport_height: 800.0,
            scrolled_into_view: Vec::new(),
            scroll_pending: false,
            rng: SeededRng::new(seed),
            fail_create: false,
        };
        doc.root = doc.alloc(FakeNode {
            tag: "html".to_string(),
            ..FakeNode::default()
        });
        doc.head = doc.append(doc.root, El::new("head"));
        doc.body = doc.append(doc.root, El::new("body"));
        doc
    }

    fn alloc(&mut self, node: FakeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> Option<&FakeNode> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut FakeNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Append a new element under `parent` and return its id.
    pub fn append(&mut self, parent: NodeId, el: El) -> NodeId {
        let mut node = FakeNode {
            tag: el.tag,
            text: el.text,
            ..FakeNode::default()
        };
        for (name, value) in el.attrs {
            if name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            }
            node.attrs.insert(name, value);
        }
        let id = self.alloc(node);
        self.attach(parent, id);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.node(child).and_then(|n| n.parent) {
            if let Some(p) = self.node_mut(old) {
                p.children.retain(|&c| c != child);
            }
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn sync_class_attr(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            let joined = node.classes.join(" ");
            node.attrs.insert("class".to_string(), joined);
        }
    }

    /// Attached elements in document order.
    fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some((last, ancestors)) = selector.chain.split_last() else {
            return false;
        };
        let Some(node) = self.node(id) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut remaining = ancestors.iter().rev().peekable();
        let mut cursor = node.parent;
        while let Some(compound) = remaining.peek() {
            let Some(anc_id) = cursor else {
                return false;
            };
            let Some(anc) = self.node(anc_id) else {
                return false;
            };
            if compound.matches(anc) {
                remaining.next();
            }
            cursor = anc.parent;
        }
        true
    }

    fn select(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.preorder()
            .into_iter()
            .filter(|&id| self.matches(id, &selector))
            .collect()
    }

    // -- builder helpers ---------------------------------------------------

    #[must_use]
    pub fn body_id(&self) -> NodeId {
        self.body
    }

    #[must_use]
    pub fn head_id(&self) -> NodeId {
        self.head
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Make every later `create_element` fail.
    pub fn fail_element_creation(&mut self) {
        self.fail_create = true;
    }

    /// Overwrite an attribute (e.g. configure the download href).
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    // -- inspection --------------------------------------------------------

    #[must_use]
    pub fn fake_node(&self, id: NodeId) -> Option<&FakeNode> {
        self.node(id)
    }

    /// Inline style value.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)?.style.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn listeners(&self) -> &[(EventTarget, EventKind)] {
        &self.listeners
    }

    #[must_use]
    pub fn is_listening(&self, target: EventTarget, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    #[must_use]
    pub fn observers(&self) -> &[FakeObserver] {
        &self.observers
    }

    /// Watchers currently observing `node`.
    #[must_use]
    pub fn observers_of(&self, node: NodeId) -> Vec<ObserverId> {
        self.observers
            .iter()
            .enumerate()
            .filter(|(_, o)| o.watched.contains(&node))
            .map(|(i, _)| ObserverId(i as u32))
            .collect()
    }

    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    #[must_use]
    pub fn console(&self) -> &[(String, String)] {
        &self.console
    }

    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    #[must_use]
    pub fn scrolled_into_view(&self) -> &[NodeId] {
        &self.scrolled_into_view
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Take all pending frame requests.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.frames)
    }

    /// Advance the clock and take timers that became due, earliest first.
    pub fn advance_clock(&mut self, dt: Duration) -> Vec<TimerId> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;
        let mut due: Vec<(TimerId, Duration)> =
            self.timers.iter().copied().filter(|&(_, at)| at <= now).collect();
        self.timers.retain(|&(_, at)| at > now);
        due.sort_by_key(|&(id, at)| (at, id.0));
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Whether a scroll was requested since the last call.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    /// Whether the element's class list contains `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| Matchable::has_class(n, class))
    }
}

impl Document for FakeDocument {
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.select(selector).into_iter().next()
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        self.select(selector)
    }

    fn element_by_id(&mut self, id: &str) -> Option<NodeId> {
        self.preorder()
            .into_iter()
            .find(|&n| self.node(n).and_then(|n| n.attr("id")) == Some(id))
    }

    fn body(&mut self) -> Option<NodeId> {
        Some(self.body)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node)?.attrs.get(name).cloned()
    }

    fn text(&self, node: NodeId) -> Option<String> {
        let n = self.node(node)?;
        let mut text = n.text.clone();
        for &child in &n.children {
            if let Some(t) = self.text(child) {
                text.push_str(&t);
            }
        }
        Some(text)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = text.to_string();
            n.children.clear();
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
        self.sync_class_attr(node);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
        self.sync_class_attr(node);
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.style.insert(property.to_string(), value.to_string());
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        if self.fail_create {
            return Err(PageFxError::Host(format!("createElement({tag}) failed")));
        }
        Ok(self.alloc(FakeNode {
            tag: tag.to_ascii_lowercase(),
            ..FakeNode::default()
        }))
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
        self.sync_class_attr(node);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return Err(PageFxError::Host("appendChild on unknown node".to_string()));
        }
        self.attach(parent, child);
        Ok(())
    }

    fn inject_stylesheet(&mut self, css: &str) -> Result<()> {
        let head = self.head;
        self.append(head, El::new("style").text(css));
        self.stylesheets.push(css.to_string());
        Ok(())
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) -> Result<()> {
        if !self.listeners.contains(&(target, kind)) {
            self.listeners.push((target, kind));
        }
        Ok(())
    }

    fn observe(&mut self, nodes: &[NodeId], options: VisibilityOptions) -> Result<ObserverId> {
        let id = ObserverId(self.observers.len() as u32);
        self.observers.push(FakeObserver {
            options,
            watched: nodes.to_vec(),
        });
        Ok(id)
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(o) = self.observers.get_mut(observer.0 as usize) {
            o.watched.retain(|&n| n != node);
        }
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.scrolled_into_view.push(node);
    }

    fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
        self.scroll_pending = true;
    }

    fn request_frame(&mut self) -> Result<FrameId> {
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        self.frames.push(id);
        Ok(id)
    }

    fn set_timeout(&mut self, delay: Duration) -> Result<TimerId> {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push((id, self.now.saturating_add(delay)));
        Ok(id)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn console_styled(&mut self, text: &str, css: &str) {
        self.console.push((text.to_string(), css.to_string()));
    }

    fn random(&mut self) -> f64 {
        self.rng.next_f64()
    }
}
