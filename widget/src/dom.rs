use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::geometry::ClientRect;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Bounding box of the canvas as laid out right now, for mapping
/// client pointer coordinates onto the backing store.
pub fn client_rect(canvas: &HtmlCanvasElement) -> ClientRect {
    let rect = canvas.get_bounding_client_rect();
    ClientRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Width available to the canvas: the container's inner width, or the
/// canvas' own backing width before it is attached anywhere.
pub fn container_width(canvas: &HtmlCanvasElement) -> f64 {
    canvas
        .parent_element()
        .map(|parent| f64::from(parent.client_width()))
        .unwrap_or_else(|| f64::from(canvas.width()))
}

pub fn set_drag_cursor(canvas: &HtmlCanvasElement, dragging: bool) {
    let cursor = if dragging { "grabbing" } else { "pointer" };
    if let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() {
        let _ = element.style().set_property("cursor", cursor);
    }
}
