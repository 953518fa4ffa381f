//! Thin wrappers over the web-sys DOM surface used throughout the crate.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlDocument, HtmlElement, Window};

use crate::error::{AppError, Result};

/// Get the global window object.
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| AppError::Dom("no window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| AppError::Dom("no document".into()))
}

/// The document as an `HtmlDocument`, for the rich-text command API.
pub fn html_document() -> Result<HtmlDocument> {
    document()?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| AppError::Dom("document is not an HTML document".into()))
}

pub fn body() -> Result<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| AppError::Dom("no body".into()))
}

/// Look up an element by id and cast it. `None` when absent or of another type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_selector<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Create an element and cast it to the requested HTML type.
pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)
        .map_err(|e| AppError::dom("createElement", e))?
        .dyn_into::<T>()
        .map_err(|_| AppError::Dom(format!("<{}> has an unexpected type", tag)))
}

/// Apply inline style declarations in order.
pub fn set_styles<S: AsRef<str>>(el: &HtmlElement, declarations: &[(&str, S)]) -> Result<()> {
    let style = el.style();
    for (property, value) in declarations {
        style
            .set_property(property, value.as_ref())
            .map_err(|e| AppError::dom(property, e))?;
    }
    Ok(())
}

pub fn set_display(el: &HtmlElement, display: &str) {
    let _ = el.style().set_property("display", display);
}

/// Register an event listener for the rest of the page's life.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| AppError::dom(event, e))?;
    closure.forget();
    Ok(())
}

/// Show a blocking alert. Failures (e.g. alerts suppressed) are only logged.
pub fn alert(message: &str) {
    match window() {
        Ok(w) => {
            if let Err(e) = w.alert_with_message(message) {
                log::warn!("alert failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("alert skipped: {}", e),
    }
}

/// Read a string property; `None` if missing or not a string.
pub fn read_string(obj: &JsValue, prop: &str) -> Option<String> {
    Reflect::get(obj, &JsValue::from_str(prop))
        .ok()
        .and_then(|v| v.as_string())
}

/// Length of an array-like property (`navigator.languages`, `navigator.plugins`, ...).
pub fn read_length(obj: &JsValue, prop: &str) -> Option<u32> {
    let value = Reflect::get(obj, &JsValue::from_str(prop)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    Reflect::get(&value, &JsValue::from_str("length"))
        .ok()
        .and_then(|len| len.as_f64())
        .map(|len| len as u32)
}
