// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from the host page's socket client to the live updater.
//!
//! Events arrive two ways: as `CustomEvent`s dispatched on `window` under the
//! configured names (payload in `detail`), or through the exported
//! `dispatch_push_event` function. Both end up in [`PushBridge::deliver`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pollboard_core::{
    CountsView, DisplayDataSource, LiveUpdater, PushConfig, PushEvent, Reloader,
};
use pollboard_error::Result;
use tracing::{debug, error};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Event, Window};

use crate::dom::JsResultExt;

pub struct PushBridge<S, V, R> {
    updater: Rc<LiveUpdater<S, V>>,
    names: PushConfig,
    reloader: R,
}

impl<S, V, R> PushBridge<S, V, R>
where
    S: DisplayDataSource + 'static,
    V: CountsView + 'static,
    R: Reloader + 'static,
{
    pub fn new(updater: Rc<LiveUpdater<S, V>>, names: PushConfig, reloader: R) -> Self {
        Self {
            updater,
            names,
            reloader,
        }
    }

    pub fn event_names(&self) -> [&str; 3] {
        [
            self.names.connect_event.as_str(),
            self.names.vote_cast_event.as_str(),
            self.names.poll_activated_event.as_str(),
        ]
    }

    /// Handle a named event in the background. Returns `false` for names this
    /// bridge does not know.
    pub fn deliver(self: &Rc<Self>, name: &str, payload: Option<&str>) -> bool {
        let Some(event) = PushEvent::parse(name, payload, &self.names) else {
            debug!("Ignoring push event {}", name);
            return false;
        };

        let bridge = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = bridge.updater.handle_push(event, &bridge.reloader).await {
                error!("Error handling {}: {}", event, e);
            }
        });
        true
    }
}

/// Object-safe view of a bridge for the module-level registry
trait PushTarget {
    fn deliver_event(&self, name: &str, payload: Option<&str>) -> bool;
}

struct RegisteredBridge<S, V, R>(Rc<PushBridge<S, V, R>>);

impl<S, V, R> PushTarget for RegisteredBridge<S, V, R>
where
    S: DisplayDataSource + 'static,
    V: CountsView + 'static,
    R: Reloader + 'static,
{
    fn deliver_event(&self, name: &str, payload: Option<&str>) -> bool {
        self.0.deliver(name, payload)
    }
}

thread_local! {
    static BRIDGES: RefCell<Vec<(u32, Rc<dyn PushTarget>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_BRIDGE_ID: Cell<u32> = const { Cell::new(0) };
}

/// Make a bridge reachable from `dispatch_push_event`. Returns its registry id.
pub fn register<S, V, R>(bridge: Rc<PushBridge<S, V, R>>) -> u32
where
    S: DisplayDataSource + 'static,
    V: CountsView + 'static,
    R: Reloader + 'static,
{
    let id = NEXT_BRIDGE_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    let target: Rc<dyn PushTarget> = Rc::new(RegisteredBridge(bridge));
    BRIDGES.with(|bridges| bridges.borrow_mut().push((id, target)));
    id
}

pub fn unregister(id: u32) {
    BRIDGES.with(|bridges| bridges.borrow_mut().retain(|(bridge_id, _)| *bridge_id != id));
}

/// Deliver an event to every registered bridge; `true` if any accepted it.
pub fn dispatch(name: &str, payload: Option<&str>) -> bool {
    let targets: Vec<Rc<dyn PushTarget>> =
        BRIDGES.with(|bridges| bridges.borrow().iter().map(|(_, t)| Rc::clone(t)).collect());

    targets
        .iter()
        .fold(false, |accepted, target| target.deliver_event(name, payload) || accepted)
}

/// Convert a `CustomEvent.detail` into JSON text
fn detail_payload(event: &Event) -> Option<String> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    if detail.is_undefined() || detail.is_null() {
        return None;
    }
    if let Some(text) = detail.as_string() {
        return Some(text);
    }
    js_sys::JSON::stringify(&detail).ok().map(String::from)
}

/// `window` listeners for a bridge's event names, removed by [`detach`](Self::detach)
pub struct PushListeners {
    window: Window,
    listeners: Vec<(String, Closure<dyn FnMut(Event)>)>,
}

impl PushListeners {
    /// # Errors
    /// Returns a DOM error if `addEventListener` throws.
    pub fn attach<S, V, R>(window: &Window, bridge: &Rc<PushBridge<S, V, R>>) -> Result<Self>
    where
        S: DisplayDataSource + 'static,
        V: CountsView + 'static,
        R: Reloader + 'static,
    {
        let mut attached = Self {
            window: window.clone(),
            listeners: Vec::new(),
        };

        for name in bridge.event_names() {
            let target = Rc::clone(bridge);
            let event_name = name.to_string();
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let payload = detail_payload(&event);
                target.deliver(&event_name, payload.as_deref());
            }) as Box<dyn FnMut(Event)>);

            window
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .dom_context("addEventListener")?;
            attached.listeners.push((name.to_string(), closure));
        }

        Ok(attached)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn detach(&mut self) {
        for (name, closure) in self.listeners.drain(..) {
            let removed = self
                .window
                .remove_event_listener_with_callback(&name, closure.as_ref().unchecked_ref());
            if let Err(e) = removed.dom_context("removeEventListener") {
                error!("Could not remove {} listener: {}", name, e);
            }
        }
    }
}

impl Drop for PushListeners {
    fn drop(&mut self) {
        self.detach();
    }
}
