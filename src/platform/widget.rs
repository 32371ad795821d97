//! Binds a `Session` to the page
//!
//! Handlers hold `Weak` references to the mounted state, and the guards live
//! in `WidgetHandle`, so dropping the handle releases everything.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent, TouchEvent, Window};

use super::dom::{self, DomCollaborators};
use super::listeners::{Interval, Listener};
use super::DateClock;
use crate::engine::{SeededRandom, Session};
use crate::tuning::Tuning;

/// Element ids the widget looks for
#[derive(Debug, Clone)]
pub struct MountConfig {
    pub arena_id: String,
    pub target_id: String,
    pub accept_id: String,
    pub toast_host_id: String,
    pub celebration_id: String,
    /// Ambient elements are `{prefix}{id}`
    pub ambient_prefix: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            arena_id: "evasive-arena".into(),
            target_id: "evasive-target".into(),
            accept_id: "evasive-accept".into(),
            toast_host_id: "evasive-toasts".into(),
            celebration_id: "evasive-celebration".into(),
            ambient_prefix: "ambient-".into(),
        }
    }
}

struct Mounted {
    session: Session,
    collaborators: DomCollaborators,
    window: Window,
    document: Document,
    arena: Element,
    target: Element,
    ambient_prefix: String,
    interval: Option<Interval>,
}

/// Keeps the widget alive; dropping it unmounts
pub struct WidgetHandle {
    inner: Rc<RefCell<Mounted>>,
    _listeners: Vec<Listener>,
}

impl Drop for WidgetHandle {
    fn drop(&mut self) {
        if let Ok(mut m) = self.inner.try_borrow_mut() {
            m.interval = None;
            m.session.teardown();
        }
        log::info!("Widget unmounted");
    }
}

fn missing(id: &str) -> JsValue {
    JsValue::from_str(&format!("element #{id} not found"))
}

/// Mount the widget on the current page
pub fn mount(config: &MountConfig) -> Result<WidgetHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let arena = document
        .get_element_by_id(&config.arena_id)
        .ok_or_else(|| missing(&config.arena_id))?;
    let target = document
        .get_element_by_id(&config.target_id)
        .ok_or_else(|| missing(&config.target_id))?;
    let accept = document
        .get_element_by_id(&config.accept_id)
        .ok_or_else(|| missing(&config.accept_id))?;

    let tuning = Tuning::from_json_or_default(arena.get_attribute("data-tuning").as_deref());
    let seed = js_sys::Date::now() as u64;
    let session = Session::new(
        tuning,
        dom::viewport(&window),
        Box::new(DateClock),
        Box::new(SeededRandom::new(seed)),
    );

    let collaborators = DomCollaborators::new(
        document.clone(),
        document.get_element_by_id(&config.toast_host_id),
        document.get_element_by_id(&config.celebration_id),
    );

    let inner = Rc::new(RefCell::new(Mounted {
        session,
        collaborators,
        window: window.clone(),
        document: document.clone(),
        arena: arena.clone(),
        target,
        ambient_prefix: config.ambient_prefix.clone(),
        interval: None,
    }));
    sync_interval(&inner, &mut inner.borrow_mut())?;

    let mut listeners = Vec::new();

    // Global pointer feeds the repulsion field
    {
        let weak = Rc::downgrade(&inner);
        listeners.push(Listener::new(window.as_ref(), "mousemove", move |e: MouseEvent| {
            with_mounted(&weak, |m| m.session.on_pointer_move(mouse_pos(&e)));
        })?);
    }
    {
        let weak = Rc::downgrade(&inner);
        listeners.push(Listener::new(window.as_ref(), "touchmove", move |e: TouchEvent| {
            let touches = touch_points(&e);
            with_mounted(&weak, |m| m.session.on_touch(&touches));
        })?);
    }

    // Arena pointer drives the dodge
    {
        let weak = Rc::downgrade(&inner);
        listeners.push(Listener::new(arena.as_ref(), "mousemove", move |e: MouseEvent| {
            with_mounted(&weak, |m| arena_pointer(m, mouse_pos(&e)));
        })?);
    }
    {
        let weak = Rc::downgrade(&inner);
        listeners.push(Listener::new(arena.as_ref(), "touchmove", move |e: TouchEvent| {
            if let Some(&first) = touch_points(&e).first() {
                with_mounted(&weak, |m| arena_pointer(m, first));
            }
        })?);
    }

    // Device class follows the viewport
    {
        let weak = Rc::downgrade(&inner);
        listeners.push(Listener::new(window.as_ref(), "resize", move |_: web_sys::Event| {
            let Some(rc) = weak.upgrade() else { return };
            let Ok(mut m) = rc.try_borrow_mut() else { return };
            let viewport = dom::viewport(&m.window);
            if m.session.on_viewport_resize(viewport) {
                if let Err(e) = sync_interval(&rc, &mut m) {
                    log::warn!("Failed to update repulsion timer: {:?}", e);
                }
                dom::apply_ambient_offsets(&m.document, &m.ambient_prefix, m.session.ambient());
            }
        })?);
    }

    // The control that does not run away
    {
        let weak = Rc::downgrade(&inner);
        listeners.push(Listener::new(accept.as_ref(), "click", move |_: MouseEvent| {
            let Some(rc) = weak.upgrade() else { return };
            let Ok(mut guard) = rc.try_borrow_mut() else { return };
            let m = &mut *guard;
            if m.session.accept(&mut m.collaborators) {
                if let Err(e) = sync_interval(&rc, m) {
                    log::warn!("Failed to stop repulsion timer: {:?}", e);
                }
            }
        })?);
    }

    log::info!("Widget mounted on #{}", config.arena_id);
    Ok(WidgetHandle {
        inner,
        _listeners: listeners,
    })
}

fn with_mounted<F>(weak: &Weak<RefCell<Mounted>>, f: F)
where
    F: FnOnce(&mut Mounted),
{
    let Some(rc) = weak.upgrade() else { return };
    // A busy borrow means another handler is mid-update; drop this event
    let Ok(mut m) = rc.try_borrow_mut() else { return };
    f(&mut m);
}

fn arena_pointer(m: &mut Mounted, pos: Vec2) {
    let element = dom::measure(&m.target);
    let container = dom::measure(&m.arena);
    if let Some(dodge) = m
        .session
        .on_arena_pointer(pos, element, container, &mut m.collaborators)
    {
        dom::set_translate(&m.target, dodge.offset);
    }
}

fn repulsion_tick(m: &mut Mounted) {
    let document = m.document.clone();
    let prefix = m.ambient_prefix.clone();
    if m
        .session
        .advance(|e| dom::ambient_center(&document, &prefix, e.id))
    {
        dom::apply_ambient_offsets(&document, &prefix, m.session.ambient());
    }
}

/// Create or drop the interval so it runs only while the session wants ticks
fn sync_interval(rc: &Rc<RefCell<Mounted>>, m: &mut Mounted) -> Result<(), JsValue> {
    if m.session.repulsion_active() {
        if m.interval.is_none() {
            let weak = Rc::downgrade(rc);
            let period = m.session.tuning().repulsion_period_ms;
            m.interval = Some(Interval::new(&m.window, period, move || {
                with_mounted(&weak, repulsion_tick);
            })?);
        }
    } else {
        m.interval = None;
    }
    Ok(())
}

fn mouse_pos(e: &MouseEvent) -> Vec2 {
    Vec2::new(e.client_x() as f32, e.client_y() as f32)
}

fn touch_points(e: &TouchEvent) -> Vec<Vec2> {
    let list = e.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}
