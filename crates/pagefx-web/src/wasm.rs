#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use pagefx_core::{EventOutcome, PageController, PageEvent, PageFxError};
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{EventSink, WebDocument, host_error};
use crate::options::parse_options;
use crate::ready::StartPlan;

/// Controller plus the page it drives, shared by every browser callback.
struct Runtime {
    controller: PageController,
    document: WebDocument,
}

fn to_js(err: PageFxError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn bind_runtime(runtime: &Rc<RefCell<Runtime>>) {
    let Ok(mut guard) = runtime.try_borrow_mut() else {
        warn!("page runtime busy; bind skipped");
        return;
    };
    let Runtime {
        controller,
        document,
    } = &mut *guard;
    match controller.bind(document) {
        Ok(()) => info!(effects = controller.effect_names().len(), "page effects started"),
        Err(err) => error!(error = %err, "some page effects failed to bind"),
    }
}

fn deliver(runtime: &Weak<RefCell<Runtime>>, event: PageEvent) -> Option<EventOutcome> {
    let runtime = runtime.upgrade()?;
    let Ok(mut guard) = runtime.try_borrow_mut() else {
        warn!(kind = event.kind_name(), "re-entrant event dropped");
        return None;
    };
    let Runtime {
        controller,
        document,
    } = &mut *guard;
    let dispatched = controller.dispatch(&event, document);
    document.settle(&event);
    if let Some(err) = &dispatched.error {
        error!(kind = event.kind_name(), error = %err, "event handling failed");
    }
    Some(dispatched.outcome)
}

struct ReadyHook {
    document: web_sys::Document,
    closure: Closure<dyn FnMut()>,
}

/// Handle returned by `startPageEffects`.
///
/// Dropping it (or calling `free()` from JS) tears the effects down just like
/// `destroy()`.
#[wasm_bindgen]
pub struct PageEffects {
    runtime: Option<Rc<RefCell<Runtime>>>,
    ready: Option<ReadyHook>,
}

#[wasm_bindgen]
impl PageEffects {
    /// Detach every listener and watcher and cancel pending frames and
    /// timers. The handle is inert afterwards.
    pub fn destroy(&mut self) {
        if self.ready.is_none() && self.runtime.is_none() {
            return;
        }
        if let Some(hook) = self.ready.take() {
            let _ = hook.document.remove_event_listener_with_callback(
                "DOMContentLoaded",
                hook.closure.as_ref().unchecked_ref(),
            );
        }
        if let Some(runtime) = self.runtime.take() {
            match runtime.try_borrow_mut() {
                Ok(mut rt) => rt.document.teardown(),
                Err(_) => warn!("destroy called during dispatch; teardown deferred to drop"),
            }
        }
        debug!("page effects destroyed");
    }

    /// Whether effects are bound and not destroyed.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.runtime
            .as_ref()
            .is_some_and(|rt| rt.try_borrow().is_ok_and(|rt| rt.controller.is_bound()))
    }

    /// Latest window scroll offset seen, or `undefined` before the first
    /// scroll event.
    #[wasm_bindgen(js_name = lastScrollOffset)]
    pub fn last_scroll_offset(&self) -> Option<f64> {
        let runtime = self.runtime.as_ref()?;
        let rt = runtime.try_borrow().ok()?;
        rt.controller.last_scroll().map(|m| m.offset)
    }
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Start the landing page effects.
///
/// `options` is an optional plain object with the same shape as
/// `PageConfig` (camelCase keys, every field optional). Binding happens on
/// `DOMContentLoaded`, or immediately if the document has already parsed.
/// A page that already finished loading also gets its `load` handlers run
/// right after binding.
#[wasm_bindgen(js_name = startPageEffects)]
pub fn start_page_effects(options: Option<JsValue>) -> Result<PageEffects, JsValue> {
    let json = match options.filter(|v| !v.is_undefined() && !v.is_null()) {
        Some(value) => Some(String::from(js_sys::JSON::stringify(&value)?)),
        None => None,
    };
    let config = parse_options(json.as_deref()).map_err(to_js)?;
    let window = web_sys::window()
        .ok_or(PageFxError::MissingWindow)
        .map_err(to_js)?;
    let document = window
        .document()
        .ok_or(PageFxError::MissingDocument)
        .map_err(to_js)?;

    let page = document.clone();
    let runtime = Rc::new_cyclic(|weak: &Weak<RefCell<Runtime>>| {
        let weak = weak.clone();
        let sink: EventSink = Rc::new(move |event| deliver(&weak, event));
        RefCell::new(Runtime {
            controller: PageController::new(&config),
            document: WebDocument::new(window, page, sink),
        })
    });

    let plan = StartPlan::from_ready_state(&document.ready_state());
    let ready = if plan == StartPlan::WaitForDom {
        let weak = Rc::downgrade(&runtime);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(runtime) = weak.upgrade() {
                bind_runtime(&runtime);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
            .map_err(|err| to_js(host_error("addEventListener", &err)))?;
        debug!("waiting for DOMContentLoaded");
        Some(ReadyHook { document, closure })
    } else {
        bind_runtime(&runtime);
        if plan.replays_load() {
            debug!("window already loaded; replaying load");
            let _ = deliver(&Rc::downgrade(&runtime), PageEvent::Load);
        }
        None
    };

    Ok(PageEffects {
        runtime: Some(runtime),
        ready,
    })
}
