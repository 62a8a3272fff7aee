//! Browser navigation history (wasm32)
//!
//! Wraps `window.history` and the `popstate` event. Payloads cross the JS
//! boundary as JSON, in the same `{ modalId, data }` / `{}` shape the
//! model serializes to.
//!
//! ```text
//! push_entry ──pushState──► window.history ──popstate──► Closure ──► BackListener
//! ```

use super::navigation::{BackListener, ListenerId, NavigationHistory};
use crate::model::HistoryPayload;
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const POPSTATE: &str = "popstate";

type PopStateClosure = Closure<dyn FnMut(web_sys::PopStateEvent)>;

/// `NavigationHistory` backed by the page's session history
pub struct BrowserHistory {
    window: Option<web_sys::Window>,
    listeners: RefCell<Vec<(ListenerId, PopStateClosure)>>,
    next_listener: Cell<u64>,
}

impl Default for BrowserHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserHistory {
    pub fn new() -> Self {
        Self {
            window: web_sys::window(),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    fn history(&self) -> Option<web_sys::History> {
        self.window.as_ref()?.history().ok()
    }
}

fn to_js(payload: &HistoryPayload) -> Option<JsValue> {
    let json = payload.to_json().ok()?;
    js_sys::JSON::parse(&json).ok()
}

/// Foreign or missing state decodes as the empty payload
fn from_js(state: &JsValue) -> HistoryPayload {
    if state.is_null() || state.is_undefined() {
        return HistoryPayload::empty();
    }
    js_sys::JSON::stringify(state)
        .ok()
        .map(String::from)
        .and_then(|json| HistoryPayload::from_json(&json).ok())
        .unwrap_or_default()
}

fn detach(window: &web_sys::Window, closure: &PopStateClosure) {
    if let Err(err) =
        window.remove_event_listener_with_callback(POPSTATE, closure.as_ref().unchecked_ref())
    {
        tracing::warn!(error = ?err, "failed to remove popstate listener");
    }
}

impl NavigationHistory for BrowserHistory {
    fn is_available(&self) -> bool {
        self.window.is_some()
    }

    fn push_entry(&self, payload: HistoryPayload) {
        let (Some(history), Some(state)) = (self.history(), to_js(&payload)) else {
            return;
        };
        if let Err(err) = history.push_state(&state, "") {
            tracing::warn!(error = ?err, "history.pushState failed");
        }
    }

    fn replace_current(&self, payload: HistoryPayload) {
        let (Some(history), Some(state)) = (self.history(), to_js(&payload)) else {
            return;
        };
        if let Err(err) = history.replace_state(&state, "") {
            tracing::warn!(error = ?err, "history.replaceState failed");
        }
    }

    fn listen_back(&self, listener: BackListener) -> Option<ListenerId> {
        let window = self.window.as_ref()?;

        let closure = Closure::wrap(Box::new(move |event: web_sys::PopStateEvent| {
            listener(&from_js(&event.state()));
        }) as Box<dyn FnMut(web_sys::PopStateEvent)>);

        if let Err(err) =
            window.add_event_listener_with_callback(POPSTATE, closure.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?err, "failed to install popstate listener");
            return None;
        }

        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, closure));
        Some(id)
    }

    fn unlisten_back(&self, id: ListenerId) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            let Some(index) = listeners.iter().position(|(lid, _)| *lid == id) else {
                return;
            };
            listeners.remove(index).1
        };

        if let Some(window) = self.window.as_ref() {
            detach(window, &removed);
        }
    }
}

impl Drop for BrowserHistory {
    fn drop(&mut self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        if let Some(window) = self.window.as_ref() {
            for (_, closure) in &listeners {
                detach(window, closure);
            }
        }
    }
}
