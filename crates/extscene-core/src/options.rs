//! Scene configuration.
//!
//! Zoom limits, wheel speed and hit-testing tolerances. Options are checked
//! with [`SceneOptions::validate`] whenever they are handed to a scene, so an
//! invalid configuration fails at construction rather than mid-interaction.

use crate::error::ConfigError;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Configuration options for a [`Scene`](crate::Scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Minimum allowed zoom level (0.1 = 10%).
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Zoom change per wheel unit. A delta of 120 at 0.001 zooms by 12%.
    pub zoom_speed: f64,
    /// Margin in screen pixels kept around content by `fit_to_view`.
    pub fit_padding: f64,
    /// Pointer hit tolerance in screen pixels.
    pub hit_tolerance: f64,
    /// Initial viewport width in screen pixels.
    pub viewport_width: f64,
    /// Initial viewport height in screen pixels.
    pub viewport_height: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_speed: 0.001,
            fit_padding: 20.0,
            hit_tolerance: 4.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl SceneOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zoom bounds.
    pub fn zoom_bounds(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Set the wheel zoom speed.
    pub fn zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    /// Set the padding used when fitting content into the viewport.
    pub fn fit_padding(mut self, padding: f64) -> Self {
        self.fit_padding = padding;
        self
    }

    /// Set the pointer hit tolerance.
    pub fn hit_tolerance(mut self, tolerance: f64) -> Self {
        self.hit_tolerance = tolerance;
        self
    }

    /// Set the initial viewport size.
    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Initial viewport size.
    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Check that the options describe a usable scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_zoom_bounds(self.min_zoom, self.max_zoom)?;
        if !(self.zoom_speed.is_finite() && self.zoom_speed > 0.0) {
            return Err(ConfigError::InvalidZoomSpeed(self.zoom_speed));
        }
        for value in [self.fit_padding, self.hit_tolerance, self.viewport_width, self.viewport_height] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidPadding(value));
            }
        }
        Ok(())
    }

    /// Parse options from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Serialize the options to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Zoom bounds must be positive, finite and ordered.
pub(crate) fn validate_zoom_bounds(min: f64, max: f64) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) || min <= 0.0 || max <= 0.0 {
        return Err(ConfigError::NonPositiveZoom { min, max });
    }
    if min > max {
        return Err(ConfigError::InvertedZoomBounds { min, max });
    }
    Ok(())
}
