//! Surface backed by real DOM elements

use pullrefresh_common::Surface;
use tracing::warn;
use web_sys::{Element, HtmlElement};

/// The pulled element plus the refresh panel looked up by id
#[derive(Debug, Clone)]
pub struct DomSurface {
    target: HtmlElement,
    panel: Option<Element>,
}

impl DomSurface {
    /// Resolve the refresh panel once; a missing panel only disables messages
    pub fn new(target: HtmlElement, panel_id: &str) -> Self {
        let panel = target
            .owner_document()
            .and_then(|document| document.get_element_by_id(panel_id));

        if panel.is_none() {
            warn!(panel_id, "refresh panel not found, status messages disabled");
        }

        Self { target, panel }
    }
}

impl Surface for DomSurface {
    fn scroll_top(&self) -> f64 {
        self.target.scroll_top() as f64
    }

    fn set_offset(&mut self, offset: f64) {
        if let Err(e) = self.target.style().set_property("top", &format!("{}px", offset)) {
            warn!("failed to move refresh target: {:?}", e);
        }
    }

    fn clear_offset(&mut self) {
        let style = self.target.style();
        let _ = style.remove_property("top");

        if style.length() == 0 {
            let _ = self.target.remove_attribute("style");
        }
    }

    fn show_message(&mut self, message: &str) {
        if let Some(ref panel) = self.panel {
            panel.set_inner_html(message);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(tag: &str) -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        document.create_element(tag).unwrap().dyn_into().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_clear_offset_keeps_other_styles() {
        let target = element("div");
        target.style().set_property("color", "red").unwrap();
        let mut surface = DomSurface::new(target.clone(), "missing-panel");

        surface.set_offset(42.0);
        assert_eq!(target.style().get_property_value("top").unwrap(), "42px");

        surface.clear_offset();
        assert_eq!(target.style().get_property_value("top").unwrap(), "");
        assert_eq!(target.style().get_property_value("color").unwrap(), "red");
    }

    #[wasm_bindgen_test]
    fn test_clear_offset_drops_empty_style() {
        let target = element("div");
        let mut surface = DomSurface::new(target.clone(), "missing-panel");

        surface.set_offset(10.0);
        surface.clear_offset();
        assert!(!target.has_attribute("style"));
    }

    #[wasm_bindgen_test]
    fn test_messages_go_to_panel() {
        let document = web_sys::window().unwrap().document().unwrap();
        let panel = element("div");
        panel.set_id("dom-test-panel");
        document.body().unwrap().append_child(&panel).unwrap();

        let mut surface = DomSurface::new(element("div"), "dom-test-panel");
        surface.show_message("Release to update");
        assert_eq!(panel.inner_html(), "Release to update");

        panel.remove();
    }
}
