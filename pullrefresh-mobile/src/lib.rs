//! Pullrefresh Mobile
//!
//! Browser bindings for the pull-to-refresh controller: an imperative
//! `attach`/`detach` API for existing DOM elements (also exported to
//! JavaScript) and a Yew `PullToRefresh` component.

mod attach;
mod components;
mod dom;
mod driver;
pub mod logging;
pub mod options;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use attach::{attach, detach, is_attached, reset};
pub use components::PullToRefresh;
pub use dom::DomSurface;
pub use pullrefresh_common::{DoneHandle, RefreshConfig, RefreshHooks};

fn to_js(error: pullrefresh_common::Error) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// `pullRefresh(element, options)`: bind pull-to-refresh to `element`.
///
/// Returns `false` if the element was already bound. Throws when the options
/// are invalid or a callback slot holds something that is not a function.
#[wasm_bindgen(js_name = pullRefresh)]
pub fn pull_refresh(element: HtmlElement, options: JsValue) -> Result<bool, JsValue> {
    let config = options::config_from_js(&options).map_err(to_js)?;
    let hooks = options::hooks_from_js(&options).map_err(to_js)?;

    attach(&element, config, hooks).map_err(to_js)
}

#[wasm_bindgen(js_name = pullRefreshDetach)]
pub fn pull_refresh_detach(element: HtmlElement) -> bool {
    detach(&element)
}

#[wasm_bindgen(js_name = pullRefreshReset)]
pub fn pull_refresh_reset(element: HtmlElement) -> bool {
    reset(&element)
}

/// Route `tracing` output to the browser console
#[wasm_bindgen(js_name = pullRefreshInitLogging)]
pub fn pull_refresh_init_logging(level: Option<String>) -> Result<(), JsValue> {
    let config = logging::LoggingConfig {
        level: level.unwrap_or_else(|| "info".to_string()),
        ..Default::default()
    };

    config
        .init()
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))
}
