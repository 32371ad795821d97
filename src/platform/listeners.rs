//! Scoped browser subscriptions
//!
//! Both guards deregister themselves on drop, so tearing down the widget
//! cannot leave callbacks pointing at freed state.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

/// An event listener that is removed when dropped
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Subscribe `handler` to `kind` events on `target`.
    ///
    /// Events that are not of type `E` are ignored.
    pub fn new<E, F>(target: &EventTarget, kind: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        log::debug!("Removed {} listener", self.kind);
    }
}

/// A `setInterval` timer that is cleared when dropped
pub struct Interval {
    window: Window,
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new<F>(window: &Window, period_ms: u32, tick: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::new(tick);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms.min(i32::MAX as u32) as i32,
        )?;
        log::debug!("Started {period_ms} ms interval");
        Ok(Self {
            window: window.clone(),
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
        log::debug!("Cleared interval");
    }
}
