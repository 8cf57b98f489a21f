//! Reusable mobile UI components

pub mod pull_to_refresh;

pub use pull_to_refresh::PullToRefresh;
