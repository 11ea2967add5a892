//! Layout tuning constants.
//!
//! Every number the layout core uses lives here so hosts can adjust
//! rendering density or travel assumptions without touching algorithms.
//! Deserializes from any serde format; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected by [`LayoutConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("zoom range is inverted: min {min} > max {max}")]
    InvertedZoomRange { min: f64, max: f64 },

    #[error("zoom step must be greater than 1, got {0}")]
    ZoomStep(f64),

    #[error("assigned status must not be empty")]
    EmptyStatus,
}

/// Tunable constants for layout, travel inference and zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixels per hour at zoom 1.0 for ranges up to 24 hours.
    pub base_px_per_hour: f64,
    /// Lower bound on the computed scale.
    pub min_px_per_hour: f64,
    /// Assumed average travel speed (km/h).
    pub average_speed_kmh: f64,
    /// Minimum home-to-first-task leg (minutes).
    pub home_travel_floor_min: f64,
    /// Minimum task-to-task leg (minutes).
    pub inter_task_travel_floor_min: f64,
    /// Total horizontal gap removed from each travel/task bar (px).
    pub bar_gap_px: f64,
    /// Narrowest bar after the gap is applied (px).
    pub min_bar_width_px: f64,
    /// Rendered duration for tasks without an estimate (minutes).
    pub default_task_duration_min: i64,
    /// Smallest zoom multiplier.
    pub min_zoom: f64,
    /// Largest zoom multiplier.
    pub max_zoom: f64,
    /// Multiplicative zoom change per wheel notch.
    pub zoom_step: f64,
    /// Status value of tasks that take part in layout.
    pub assigned_status: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_px_per_hour: 60.0,
            min_px_per_hour: 10.0,
            average_speed_kmh: 40.0,
            home_travel_floor_min: 10.0,
            inter_task_travel_floor_min: 5.0,
            bar_gap_px: 2.0,
            min_bar_width_px: 1.0,
            default_task_duration_min: 60,
            min_zoom: 0.25,
            max_zoom: 8.0,
            zoom_step: 1.1,
            assigned_status: "assigned".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base scale.
    pub fn with_base_px_per_hour(mut self, px: f64) -> Self {
        self.base_px_per_hour = px;
        self
    }

    /// Sets the assumed travel speed.
    pub fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    /// Sets both travel floors (home, inter-task) in minutes.
    pub fn with_travel_floors(mut self, home_min: f64, inter_task_min: f64) -> Self {
        self.home_travel_floor_min = home_min;
        self.inter_task_travel_floor_min = inter_task_min;
        self
    }

    /// Sets the total bar gap.
    pub fn with_bar_gap(mut self, gap_px: f64) -> Self {
        self.bar_gap_px = gap_px;
        self
    }

    /// Sets the zoom clamp range.
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min;
        self.max_zoom = max;
        self
    }

    /// Sets the status treated as assigned.
    pub fn with_assigned_status(mut self, status: impl Into<String>) -> Self {
        self.assigned_status = status.into();
        self
    }

    /// Checks that every constant is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("base_px_per_hour", self.base_px_per_hour),
            ("min_px_per_hour", self.min_px_per_hour),
            ("average_speed_kmh", self.average_speed_kmh),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("home_travel_floor_min", self.home_travel_floor_min),
            ("inter_task_travel_floor_min", self.inter_task_travel_floor_min),
            ("bar_gap_px", self.bar_gap_px),
            ("min_bar_width_px", self.min_bar_width_px),
            ("default_task_duration_min", self.default_task_duration_min as f64),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if self.assigned_status.trim().is_empty() {
            return Err(ConfigError::EmptyStatus);
        }
        Ok(())
    }
}
