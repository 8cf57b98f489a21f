//! Surface for declarative renderers
//!
//! Instead of touching an element directly, [`ViewState`] records what should
//! be shown so a component can render it on the next pass.

use crate::controller::Surface;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Scroll offset of the container, kept current by the host
    pub scroll_top: f64,
    /// Inline offset of the content; `None` means natural layout
    pub offset: Option<f64>,
    /// Refresh panel content
    pub message: Option<String>,
}

impl ViewState {
    /// Inline style for the pulled content
    pub fn offset_style(&self) -> String {
        match self.offset {
            Some(offset) => format!("position: relative; top: {}px;", offset),
            None => String::new(),
        }
    }
}

impl Surface for ViewState {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = Some(offset);
    }

    fn clear_offset(&mut self) {
        self.offset = None;
    }

    fn show_message(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}
