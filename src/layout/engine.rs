//! Whole-timeline layout.
//!
//! # Algorithm
//!
//! 1. Compute the horizontal scale and header ticks for the range and zoom.
//! 2. Group tasks by `employeeId`.
//! 3. For every resource row, independently:
//!    shift and lunch bars, task and travel bars, then ECBT.
//! 4. Collect rows in input order.
//!
//! Rows share no state, so step 3 runs on the rayon thread pool. The result
//! is identical to a sequential run.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, debug_span, info_span};

use super::ecbt::estimate_comeback;
use super::shift::{lunch_bars, shift_bars};
use super::tasks::resolve_task_bars;
use crate::axis::{px_per_hour, ticks};
use crate::clock::LayoutContext;
use crate::config::LayoutConfig;
use crate::models::{DateRange, ResourceRow, RowLayout, Task, TimelineLayout};

/// Input container for one layout computation.
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    /// Resource rows, in display order.
    pub resources: Vec<ResourceRow>,
    /// Tasks of every resource and status.
    pub tasks: Vec<Task>,
    /// Visible range.
    pub range: DateRange,
    /// Zoom multiplier.
    pub zoom: f64,
    /// Clock and offset.
    pub context: LayoutContext,
}

impl LayoutRequest {
    /// Creates a request at zoom 1.0 using the local clock.
    pub fn new(resources: Vec<ResourceRow>, tasks: Vec<Task>, range: DateRange) -> Self {
        Self {
            resources,
            tasks,
            range,
            zoom: 1.0,
            context: LayoutContext::local_now(),
        }
    }

    /// Sets the zoom multiplier.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets the clock.
    pub fn with_context(mut self, context: LayoutContext) -> Self {
        self.context = context;
        self
    }
}

/// Computes timeline layouts.
///
/// # Example
///
/// ```
/// use callout_timeline::clock::LayoutContext;
/// use callout_timeline::layout::TimelineEngine;
/// use callout_timeline::models::{DateRange, ResourceRow, Task, DAY_MS, HOUR_MS};
///
/// // 2024-05-01T05:00:00Z
/// let day = 1_714_521_600_000;
/// let ctx = LayoutContext::at_time(day + 5 * HOUR_MS);
///
/// let resources = vec![ResourceRow::new("R1").with_shift("6:00 AM", "2:00 PM")];
/// let tasks = vec![Task::new("T1", "R1")
///     .with_expected_start("2024-05-01T09:00:00")
///     .with_expected_finish("2024-05-01T09:45:00")
///     .with_duration(45.0)
///     .with_status("assigned")];
///
/// let engine = TimelineEngine::new();
/// let layout = engine.compute_layout(&resources, &tasks, DateRange::new(day, day + DAY_MS), 1.0, &ctx);
///
/// let row = layout.row("R1").unwrap();
/// assert_eq!(row.shift_bars.len(), 1);
/// assert_eq!(row.task_bars.len(), 1);
/// assert_eq!(row.ecbt, day + 9 * HOUR_MS + 45 * 60_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimelineEngine {
    config: LayoutConfig,
}

impl TimelineEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out a request.
    pub fn compute_request(&self, request: &LayoutRequest) -> TimelineLayout {
        self.compute_layout(
            &request.resources,
            &request.tasks,
            request.range,
            request.zoom,
            &request.context,
        )
    }

    /// Lays out every row for a range and zoom.
    pub fn compute_layout(
        &self,
        resources: &[ResourceRow],
        tasks: &[Task],
        range: DateRange,
        zoom: f64,
        ctx: &LayoutContext,
    ) -> TimelineLayout {
        let _span = info_span!(
            "compute_layout",
            resources = resources.len(),
            tasks = tasks.len(),
            zoom
        )
        .entered();

        let pxph = px_per_hour(&range, zoom, &self.config);

        let mut by_resource: HashMap<&str, Vec<&Task>> = HashMap::new();
        for task in tasks {
            by_resource.entry(task.employee_id.as_str()).or_default().push(task);
        }

        let rows: Vec<RowLayout> = resources
            .par_iter()
            .map(|row| {
                let own = by_resource
                    .get(row.resource_id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                self.layout_row(row, own, &range, pxph, ctx)
            })
            .collect();

        debug!(rows = rows.len(), px_per_hour = pxph, "layout computed");

        TimelineLayout {
            range,
            px_per_hour: pxph,
            content_width_px: range.hours() * pxph,
            ticks: ticks(&range, pxph, ctx),
            rows,
        }
    }

    /// Lays out one row. `tasks` should be the row's own tasks.
    pub fn layout_row(
        &self,
        row: &ResourceRow,
        tasks: &[&Task],
        range: &DateRange,
        px_per_hour: f64,
        ctx: &LayoutContext,
    ) -> RowLayout {
        let _span = debug_span!("row", resource = %row.resource_id).entered();

        let resolved = resolve_task_bars(row, tasks, range, px_per_hour, ctx, &self.config);
        let ecbt = estimate_comeback(row, tasks, ctx, &self.config);
        let ecbt_px = (ecbt > 0 && ecbt >= range.start && ecbt <= range.end)
            .then(|| range.offset_px(ecbt, px_per_hour));

        RowLayout {
            resource_id: row.resource_id.clone(),
            shift_bars: shift_bars(row, range, px_per_hour, ctx),
            lunch_bars: lunch_bars(row, range, px_per_hour, ctx),
            task_bars: resolved.bars,
            ecbt,
            ecbt_px,
            tasks: resolved.tasks,
            skipped_tasks: resolved.skipped,
        }
    }
}

/// Copies of `resources` carrying the ECBT computed in `layout`.
///
/// Rows missing from the layout are returned unchanged.
pub fn attach_ecbt(resources: &[ResourceRow], layout: &TimelineLayout) -> Vec<ResourceRow> {
    resources
        .iter()
        .map(|r| match layout.ecbt_for(&r.resource_id) {
            Some(ecbt) => r.clone().with_ecbt(ecbt),
            None => r.clone(),
        })
        .collect()
}
