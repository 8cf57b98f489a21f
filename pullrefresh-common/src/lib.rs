//! Headless pull-to-refresh controller
//!
//! Shared by the browser binding in `pullrefresh-mobile` and by any other host
//! that can feed drag gestures in and render an offset plus a status message.

pub mod animation;
pub mod config;
pub mod controller;
pub mod gesture;
pub mod hooks;
pub mod registry;
pub mod view;

pub use animation::{ResetAnimation, Ticket};
pub use config::{Easing, RefreshConfig};
pub use controller::{Controller, DragZone, Input, Outcome, State, Surface};
pub use gesture::{Direction, DragMove, DragTracker};
pub use hooks::{update_channel, Completion, DoneHandle, RefreshHooks, UpdateSignal};
pub use registry::{Attach, Registry};
pub use view::ViewState;

/// Pull-to-refresh error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("The {0} callback is not a function")]
    NotCallable(String),

    #[error("Event binding failed: {0}")]
    Bind(String),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
