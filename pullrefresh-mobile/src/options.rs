//! Options objects passed in from JavaScript

use js_sys::{Function, Reflect};
use pullrefresh_common::{Error, RefreshConfig, RefreshHooks, Result};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Parse the data part of an options object.
///
/// Functions are dropped by `JSON.stringify`, so the callback slots never
/// reach serde.
pub fn config_from_js(options: &JsValue) -> Result<RefreshConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(RefreshConfig::default());
    }

    let json = js_sys::JSON::stringify(options)
        .map_err(|e| Error::InvalidConfig(format!("options are not serializable: {:?}", e)))?;

    RefreshConfig::from_json(&String::from(json))
}

/// Collect the callback slots, rejecting any that hold a non-function
pub fn hooks_from_js(options: &JsValue) -> Result<RefreshHooks> {
    let mut hooks = RefreshHooks::new();

    if let Some(func) = callback(options, &["dragStart", "onDragStart"])? {
        hooks = hooks.on_drag_start(move || call(&func, "dragStart", None));
    }

    if let Some(func) = callback(options, &["dragEnd", "onDragEnd"])? {
        hooks = hooks.on_drag_end(move || call(&func, "dragEnd", None));
    }

    if let Some(func) = callback(options, &["update", "onUpdate"])? {
        hooks = hooks.on_update(move |done| {
            let done = Closure::once_into_js(move || done.done());
            call(&func, "update", Some(&done));
        });
    }

    Ok(hooks)
}

fn callback(options: &JsValue, keys: &[&str]) -> Result<Option<Function>> {
    if !options.is_object() {
        return Ok(None);
    }

    for key in keys {
        let value = Reflect::get(options, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED);
        // `false`, `0` and `""` mean "no callback", like undefined
        if value.is_falsy() {
            continue;
        }

        return value
            .dyn_into::<Function>()
            .map(Some)
            .map_err(|_| Error::NotCallable(key.to_string()));
    }

    Ok(None)
}

fn call(func: &Function, slot: &str, arg: Option<&JsValue>) {
    let result = match arg {
        Some(arg) => func.call1(&JsValue::NULL, arg),
        None => func.call0(&JsValue::NULL),
    };

    if let Err(e) = result {
        warn!(slot, "refresh callback threw: {:?}", e);
    }
}
