use crate::{Error, Result};
use js_sys::{JSON, Reflect};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};

/// Human-readable text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

pub fn js_error(operation: &'static str) -> impl FnOnce(JsValue) -> Error {
    move |value| Error::js(operation, describe(&value))
}

pub fn get_property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Look up a property on the global object (`window` on a page).
pub fn global_property(key: &str) -> Option<JsValue> {
    get_property(&js_sys::global(), key)
}

/// Decodes a JSON-compatible JS value through its serde representation.
pub fn deserialize<T>(value: &JsValue, key: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let text = JSON::stringify(value)
        .map_err(|err| Error::malformed(key, describe(&err)))?
        .as_string()
        .ok_or_else(|| Error::invalid_value(key, "JSON-compatible value"))?;
    serde_json::from_str(&text).map_err(|err| Error::malformed(key, err.to_string()))
}
