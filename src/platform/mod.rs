//! Browser platform layer
//!
//! Handles the DOM side of the widget:
//! - Measurement (bounding rectangles, viewport size)
//! - Scoped event listeners and interval timer
//! - Transform output and the toast/celebration collaborators

pub mod dom;
pub mod listeners;
pub mod widget;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::engine::Clock;
pub use widget::{MountConfig, WidgetHandle, mount};

/// Wall-clock milliseconds from `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<WidgetHandle>> = const { RefCell::new(None) };
}

/// Mount the widget using the default element ids
#[wasm_bindgen]
pub fn mount_widget() -> Result<(), JsValue> {
    let handle = mount(&MountConfig::default())?;
    // Replacing a previous mount drops (and unmounts) it
    let previous = MOUNTED.with(|m| m.borrow_mut().replace(handle));
    drop(previous);
    Ok(())
}

/// Remove every listener and timer; call when the page navigates away
#[wasm_bindgen]
pub fn unmount_widget() {
    let handle = MOUNTED.with(|m| m.borrow_mut().take());
    drop(handle);
}
