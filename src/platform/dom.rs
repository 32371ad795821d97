//! DOM measurement and transform output

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::engine::{AmbientElement, Collaborators, Message, Rect};

/// Current viewport size in CSS pixels
pub fn viewport(window: &Window) -> Vec2 {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

/// Bounding rectangle, or `None` if the element is not laid out
pub fn measure(element: &Element) -> Option<Rect> {
    let rect = element.get_bounding_client_rect();
    if rect.width() == 0.0 && rect.height() == 0.0 {
        return None;
    }
    Some(Rect::new(
        rect.x() as f32,
        rect.y() as f32,
        rect.width() as f32,
        rect.height() as f32,
    ))
}

/// Write a translate transform, leaving other inline styles alone
pub fn set_translate(element: &Element, offset: Vec2) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let value = format!("translate({:.1}px, {:.1}px)", offset.x, offset.y);
    if let Err(e) = html.style().set_property("transform", &value) {
        log::warn!("Failed to set transform: {:?}", e);
    }
}

pub fn ambient_id(prefix: &str, id: u32) -> String {
    format!("{prefix}{id}")
}

/// On-screen center of an ambient element, `None` if it is not in the page
pub fn ambient_center(document: &Document, prefix: &str, id: u32) -> Option<Vec2> {
    let element = document.get_element_by_id(&ambient_id(prefix, id))?;
    measure(&element).map(|r| r.center())
}

pub fn apply_ambient_offsets(document: &Document, prefix: &str, elements: &[AmbientElement]) {
    for e in elements {
        if let Some(el) = document.get_element_by_id(&ambient_id(prefix, e.id)) {
            set_translate(&el, e.offset);
        }
    }
}

/// Minimal DOM-backed collaborators: a toast host and a celebration overlay
pub struct DomCollaborators {
    document: Document,
    toast_host: Option<Element>,
    celebration: Option<Element>,
}

impl DomCollaborators {
    pub fn new(document: Document, toast_host: Option<Element>, celebration: Option<Element>) -> Self {
        if toast_host.is_none() {
            log::warn!("No toast host found; messages will only be logged");
        }
        Self {
            document,
            toast_host,
            celebration,
        }
    }

    fn try_show(&self, message: &Message) -> Result<(), JsValue> {
        let Some(host) = &self.toast_host else {
            log::info!("Message: {}", message.text);
            return Ok(());
        };

        let toast = self.document.create_element("div")?;
        toast.set_class_name("evasive-toast");
        toast.set_text_content(Some(&message.text));
        toast.set_attribute("style", &format!("font-size: {}px", message.font_px))?;
        host.append_child(&toast)?;

        // Fire-and-forget removal
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let remove = Closure::once_into_js(move || toast.remove());
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            message.duration_ms.min(i32::MAX as u32) as i32,
        )?;
        Ok(())
    }
}

impl Collaborators for DomCollaborators {
    fn show_message(&mut self, message: &Message) {
        if let Err(e) = self.try_show(message) {
            log::warn!("Failed to show message: {:?}", e);
        }
    }

    fn celebrate(&mut self) {
        match &self.celebration {
            Some(overlay) => {
                if let Err(e) = overlay.class_list().remove_1("hidden") {
                    log::warn!("Failed to reveal celebration: {:?}", e);
                }
            }
            None => log::warn!("No celebration overlay found"),
        }
    }
}
