//! Pull-to-refresh configuration
//!
//! Every field is optional when deserialized; missing keys fall back to the
//! defaults below. Keys are camelCase so the same shape can be passed from
//! JavaScript as a plain options object.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_MIN_DRAG_DISTANCE: f64 = 50.0;
pub const DEFAULT_MAX_DRAG_DISTANCE: f64 = 60.0;
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 200;
pub const DEFAULT_REFRESH_PANEL_ID: &str = "refresh-panel";

/// Touch slop before movement counts as a drag
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Easing curve used when the element animates back to rest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    Linear,
    #[default]
    Swing,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::Swing => 0.5 - (p * std::f64::consts::PI).cos() / 2.0,
        }
    }
}

/// Pull-to-refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshConfig {
    /// Drag distance (px) that arms the refresh
    pub min_drag_distance: f64,
    /// Furthest the target element can be pulled (px)
    pub max_drag_distance: f64,
    pub pull_message: String,
    pub release_message: String,
    pub update_message: String,
    #[serde(rename = "animationDuration")]
    pub animation_duration_ms: u64,
    /// Id of the element whose content shows the status messages
    #[serde(alias = "refreshPanel")]
    pub refresh_panel_id: String,
    pub easing: Easing,
    pub drag_threshold: f64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: DEFAULT_MIN_DRAG_DISTANCE,
            max_drag_distance: DEFAULT_MAX_DRAG_DISTANCE,
            pull_message: "Pull down to update".to_string(),
            release_message: "Release to update".to_string(),
            update_message: "Updating...".to_string(),
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            refresh_panel_id: DEFAULT_REFRESH_PANEL_ID.to_string(),
            easing: Easing::default(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl RefreshConfig {
    /// Parse a JSON options object and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RefreshConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Check distances and ids before a controller is built on top
    pub fn validate(&self) -> Result<()> {
        check_distance("minDragDistance", self.min_drag_distance)?;
        check_distance("maxDragDistance", self.max_drag_distance)?;
        check_distance("dragThreshold", self.drag_threshold)?;

        if self.max_drag_distance < self.min_drag_distance {
            return Err(Error::InvalidConfig(format!(
                "maxDragDistance ({}) must not be less than minDragDistance ({})",
                self.max_drag_distance, self.min_drag_distance
            )));
        }

        if self.refresh_panel_id.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "refreshPanelId must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_distance(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{} must be a finite, non-negative number of pixels (got {})",
            name, value
        )));
    }
    Ok(())
}
