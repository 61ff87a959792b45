#![forbid(unsafe_code)]

//! [`Document`] over the live DOM.
//!
//! Elements handed to the controller are interned into a table and
//! addressed by [`NodeId`]. Every browser callback (listeners, intersection
//! observers, animation frames, timeouts) is turned into a [`PageEvent`] and
//! pushed through the [`EventSink`]; the sink's result decides whether the
//! native event gets `preventDefault()`.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use js_sys::{Array, Math};
use pagefx_core::{
    Document, EventKind, EventOutcome, EventTarget, FrameId, NodeId, ObserverId, PageEvent,
    PageFxError, Result, ScrollMetrics, TimerId, VisibilityOptions,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions, Window,
};

/// Where browser callbacks deliver their events. Returns `None` when the
/// event could not be dispatched (runtime gone or busy).
pub(crate) type EventSink = Rc<dyn Fn(PageEvent) -> Option<EventOutcome>>;

/// Render a JS exception as a host error.
pub(crate) fn host_error(op: &str, err: &JsValue) -> PageFxError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    PageFxError::Host(format!("{op}: {detail}"))
}

fn scroll_metrics(window: &Window) -> ScrollMetrics {
    let offset = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    ScrollMetrics::new(offset, viewport)
}

struct Listener {
    target: web_sys::EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

struct Watcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// The browser page.
pub(crate) struct WebDocument {
    window: Window,
    document: web_sys::Document,
    sink: EventSink,
    nodes: Vec<Element>,
    subscribed: HashSet<(EventTarget, EventKind)>,
    listeners: Vec<Listener>,
    watchers: Vec<Watcher>,
    frames: Vec<(FrameId, i32)>,
    next_frame: u32,
    timers: Vec<(TimerId, i32)>,
    next_timer: u32,
}

impl WebDocument {
    pub(crate) fn new(window: Window, document: web_sys::Document, sink: EventSink) -> Self {
        Self {
            window,
            document,
            sink,
            nodes: Vec::new(),
            subscribed: HashSet::new(),
            listeners: Vec::new(),
            watchers: Vec::new(),
            frames: Vec::new(),
            next_frame: 1,
            timers: Vec::new(),
            next_timer: 1,
        }
    }

    fn intern(&mut self, element: Element) -> NodeId {
        if let Some(idx) = self.nodes.iter().position(|e| e.is_same_node(Some(&element))) {
            return NodeId(idx as u32);
        }
        self.nodes.push(element);
        NodeId((self.nodes.len() - 1) as u32)
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0 as usize)
    }

    fn html_element(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }

    fn require(&self, node: NodeId) -> Result<&Element> {
        self.element(node)
            .ok_or_else(|| PageFxError::Host(format!("unknown node {}", node.0)))
    }

    /// Drop bookkeeping for a frame or timer callback that has just run.
    pub(crate) fn settle(&mut self, event: &PageEvent) {
        match *event {
            PageEvent::Frame { id } => self.frames.retain(|&(f, _)| f != id),
            PageEvent::Timer { id } => self.timers.retain(|&(t, _)| t != id),
            _ => {}
        }
    }

    /// Detach listeners, disconnect watchers and cancel pending callbacks.
    pub(crate) fn teardown(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind.dom_name(),
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        for watcher in self.watchers.drain(..) {
            watcher.observer.disconnect();
        }
        for (_, handle) in self.frames.drain(..) {
            let _ = self.window.cancel_animation_frame(handle);
        }
        for (_, handle) in self.timers.drain(..) {
            self.window.clear_timeout_with_handle(handle);
        }
        self.subscribed.clear();
        debug!("page document torn down");
    }
}

impl Drop for WebDocument {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Document for WebDocument {
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|el| self.intern(el)),
            Err(err) => {
                debug!(selector, error = ?err, "selector rejected");
                None
            }
        }
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                debug!(selector, error = ?err, "selector rejected");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.intern(el))
            .collect()
    }

    fn element_by_id(&mut self, id: &str) -> Option<NodeId> {
        let el = self.document.get_element_by_id(id)?;
        Some(self.intern(el))
    }

    fn body(&mut self) -> Option<NodeId> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(body))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.element(node)?.text_content()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(err) = el.class_list().add_1(class) {
                warn!(class, error = ?err, "classList.add failed");
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(err) = el.class_list().remove_1(class) {
                warn!(class, error = ?err, "classList.remove failed");
            }
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(el) = self.element(node) else {
            return false;
        };
        el.class_list().toggle(class).unwrap_or_else(|err| {
            warn!(class, error = ?err, "classList.toggle failed");
            false
        })
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(el) = self.html_element(node) else {
            return;
        };
        if let Err(err) = el.style().set_property(property, value) {
            warn!(property, value, error = ?err, "style.setProperty failed");
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        let el = self
            .document
            .create_element(tag)
            .map_err(|err| host_error("createElement", &err))?;
        Ok(self.intern(el))
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(el) = self.element(node) {
            el.set_class_name(class_name);
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent = self.require(parent)?;
        let child = self.require(child)?;
        parent
            .append_child(child)
            .map_err(|err| host_error("appendChild", &err))?;
        Ok(())
    }

    fn inject_stylesheet(&mut self, css: &str) -> Result<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| PageFxError::Host("document has no <head>".to_string()))?;
        let style = self
            .document
            .create_element("style")
            .map_err(|err| host_error("createElement", &err))?;
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map_err(|err| host_error("appendChild", &err))?;
        Ok(())
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) -> Result<()> {
        if !self.subscribed.insert((target, kind)) {
            return Ok(());
        }
        let js_target: web_sys::EventTarget = match target {
            EventTarget::Window => self.window.clone().into(),
            EventTarget::Node(node) => self.require(node)?.clone().into(),
        };

        let sink = Rc::clone(&self.sink);
        let window = self.window.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let page_event = match (kind, target) {
                (EventKind::Scroll, _) => PageEvent::Scroll(scroll_metrics(&window)),
                (EventKind::Load, _) => PageEvent::Load,
                (EventKind::Click, EventTarget::Node(node)) => PageEvent::Click { node },
                (EventKind::PointerEnter, EventTarget::Node(node)) => {
                    PageEvent::PointerEnter { node }
                }
                _ => return,
            };
            if sink(page_event).is_some_and(|outcome| outcome.prevent_default) {
                event.prevent_default();
            }
        });
        js_target
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
            .map_err(|err| host_error("addEventListener", &err))?;
        self.listeners.push(Listener {
            target: js_target,
            kind,
            closure,
        });
        Ok(())
    }

    fn observe(&mut self, nodes: &[NodeId], options: VisibilityOptions) -> Result<ObserverId> {
        let id = ObserverId(self.watchers.len() as u32);
        let targets: Vec<(Element, NodeId)> = nodes
            .iter()
            .filter_map(|&n| self.element(n).map(|el| (el.clone(), n)))
            .collect();

        let sink = Rc::clone(&self.sink);
        let watched = targets.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let hit = watched.iter().find(|(el, _)| el.is_same_node(Some(&target)));
                    if let Some(&(_, node)) = hit {
                        sink(PageEvent::Visibility {
                            observer: id,
                            node,
                            intersecting: entry.is_intersecting(),
                        });
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| host_error("IntersectionObserver", &err))?;
        for (el, _) in &targets {
            observer.observe(el);
        }
        self.watchers.push(Watcher {
            observer,
            _callback: callback,
        });
        Ok(id)
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        if let (Some(watcher), Some(el)) =
            (self.watchers.get(observer.0 as usize), self.element(node))
        {
            watcher.observer.unobserve(el);
        }
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        if let Some(el) = self.element(node) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn request_frame(&mut self) -> Result<FrameId> {
        let id = FrameId(self.next_frame);
        self.next_frame = self.next_frame.wrapping_add(1);
        let sink = Rc::clone(&self.sink);
        let callback = Closure::once_into_js(move |_timestamp: f64| {
            sink(PageEvent::Frame { id });
        });
        let handle = self
            .window
            .request_animation_frame(callback.unchecked_ref())
            .map_err(|err| host_error("requestAnimationFrame", &err))?;
        self.frames.push((id, handle));
        Ok(id)
    }

    fn set_timeout(&mut self, delay: Duration) -> Result<TimerId> {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        let sink = Rc::clone(&self.sink);
        let callback = Closure::once_into_js(move || {
            sink(PageEvent::Timer { id });
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map_err(|err| host_error("setTimeout", &err))?;
        self.timers.push((id, handle));
        Ok(id)
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!(error = ?err, "alert failed");
        }
    }

    fn console_styled(&mut self, text: &str, css: &str) {
        web_sys::console::log_2(
            &JsValue::from_str(&format!("%c{text}")),
            &JsValue::from_str(css),
        );
    }

    fn random(&mut self) -> f64 {
        Math::random()
    }
}
