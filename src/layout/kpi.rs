//! Layout quality metrics.
//!
//! Summarizes what a computed layout shows per row: how much of the
//! visible shift is booked, how much is spent travelling, and how often
//! travel pushed work later than planned.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Task minutes | Sum of clipped task bar intervals |
//! | Travel minutes | Sum of clipped travel bar intervals |
//! | Shift minutes | Sum of clipped shift bar intervals |
//! | Utilization | (task + travel) / shift minutes |
//! | Forced starts | Tasks pushed later by travel |
//!
//! Durations are measured on the bars' time windows, before pixel gaps.

use std::collections::HashMap;

use crate::models::{Bar, BarKind, RowLayout, TimelineLayout, MINUTE_MS};

/// Metrics for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowKpi {
    /// Visible task time (minutes).
    pub task_minutes: f64,
    /// Visible travel time (minutes).
    pub travel_minutes: f64,
    /// Visible shift time (minutes).
    pub shift_minutes: f64,
    /// Booked share of the shift; `None` when no shift is visible.
    pub utilization: Option<f64>,
    /// Tasks pushed later by travel.
    pub forced_starts: usize,
    /// Tasks dropped for lack of a start date.
    pub skipped_tasks: usize,
}

impl RowKpi {
    /// Computes metrics for a row.
    pub fn calculate(row: &RowLayout) -> Self {
        let task_minutes = minutes_of(&row.task_bars, BarKind::Task);
        let travel_minutes = minutes_of(&row.task_bars, BarKind::Travel);
        let shift_minutes = minutes_of(&row.shift_bars, BarKind::Shift);
        let utilization =
            (shift_minutes > 0.0).then(|| (task_minutes + travel_minutes) / shift_minutes);

        Self {
            task_minutes,
            travel_minutes,
            shift_minutes,
            utilization,
            forced_starts: row.forced_start_count(),
            skipped_tasks: row.skipped_tasks,
        }
    }
}

/// Metrics for a whole layout.
#[derive(Debug, Clone)]
pub struct LayoutKpi {
    /// Per-row metrics keyed by resource id.
    pub by_resource: HashMap<String, RowKpi>,
    /// Total visible task time (minutes).
    pub total_task_minutes: f64,
    /// Total visible travel time (minutes).
    pub total_travel_minutes: f64,
    /// Mean utilization over rows with a visible shift (0.0 if none).
    pub avg_utilization: f64,
    /// Total forced starts.
    pub forced_starts: usize,
    /// Total skipped tasks.
    pub skipped_tasks: usize,
}

impl LayoutKpi {
    /// Computes metrics from a layout.
    pub fn calculate(layout: &TimelineLayout) -> Self {
        let by_resource: HashMap<String, RowKpi> = layout
            .rows
            .iter()
            .map(|row| (row.resource_id.clone(), RowKpi::calculate(row)))
            .collect();

        let utilizations: Vec<f64> = by_resource.values().filter_map(|k| k.utilization).collect();
        let avg_utilization = if utilizations.is_empty() {
            0.0
        } else {
            utilizations.iter().sum::<f64>() / utilizations.len() as f64
        };

        Self {
            total_task_minutes: by_resource.values().map(|k| k.task_minutes).sum(),
            total_travel_minutes: by_resource.values().map(|k| k.travel_minutes).sum(),
            forced_starts: by_resource.values().map(|k| k.forced_starts).sum(),
            skipped_tasks: by_resource.values().map(|k| k.skipped_tasks).sum(),
            avg_utilization,
            by_resource,
        }
    }

    /// Whether travel stays under `max_share` of booked time across the layout.
    pub fn travel_share_within(&self, max_share: f64) -> bool {
        let booked = self.total_task_minutes + self.total_travel_minutes;
        booked <= 0.0 || self.total_travel_minutes / booked <= max_share
    }
}

fn minutes_of(bars: &[Bar], kind: BarKind) -> f64 {
    bars.iter()
        .filter(|b| b.kind == kind)
        .map(|b| b.window.duration_ms() as f64 / MINUTE_MS as f64)
        .sum()
}
