use crate::decode::js_error;
use crate::{Error, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, EventTarget};

pub const READY_EVENT: &str = "DOMContentLoaded";

pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::unavailable("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| Error::unavailable("document"))
}

/// `document.readyState` past `"loading"` means the element tree is complete.
pub fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Registers `callback` for the first `event` on `target` only.
pub fn listen_once<F>(target: &EventTarget, event: &str, callback: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let listener = Closure::once_into_js(callback);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            listener.unchecked_ref(),
            &options,
        )
        .map_err(js_error("addEventListener"))
}

/// Run `callback` once the document structure is parsed.
///
/// Runs immediately when parsing already finished; otherwise registers a
/// one-shot `DOMContentLoaded` listener.
pub fn on_document_ready<F>(document: &Document, callback: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    if is_parsed(&document.ready_state()) {
        callback();
        return Ok(());
    }
    listen_once(document, READY_EVENT, callback)
}
