//! Layout output model.
//!
//! A [`TimelineLayout`] is recomputed from scratch whenever resources,
//! tasks, the visible range or the zoom level change. Nothing in it is
//! incrementally updated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Bar, BarKind, DateRange, ScheduledTask, Tick};

/// Bars and markers for one resource row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout {
    /// Row identifier.
    pub resource_id: String,
    /// Shift occupancy bars, one per visible day.
    pub shift_bars: Vec<Bar>,
    /// Lunch bars, one per visible day.
    pub lunch_bars: Vec<Bar>,
    /// Travel and task bars in time order, gap-adjusted.
    pub task_bars: Vec<Bar>,
    /// Estimated comeback time (epoch ms), 0 when unknown.
    pub ecbt: i64,
    /// ECBT on the pixel axis, when inside the visible range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecbt_px: Option<f64>,
    /// Every assigned task of the row with its rendered start, including
    /// tasks whose bar was clipped away.
    pub tasks: Vec<Arc<ScheduledTask>>,
    /// Assigned tasks dropped for lack of a start field.
    pub skipped_tasks: usize,
}

impl RowLayout {
    /// Creates an empty row.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            ..Default::default()
        }
    }

    /// Bars of one kind across all three lists.
    pub fn bars_of_kind(&self, kind: BarKind) -> impl Iterator<Item = &Bar> {
        self.shift_bars
            .iter()
            .chain(&self.lunch_bars)
            .chain(&self.task_bars)
            .filter(move |b| b.kind == kind)
    }

    /// Looks up a laid-out task by id.
    pub fn scheduled_task(&self, task_id: &str) -> Option<&Arc<ScheduledTask>> {
        self.tasks.iter().find(|t| t.task_id() == task_id)
    }

    /// Number of tasks pushed later by travel.
    pub fn forced_start_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.was_forced()).count()
    }
}

/// The complete layout for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    /// Visible range the layout was computed for.
    pub range: DateRange,
    /// Horizontal scale.
    pub px_per_hour: f64,
    /// Total scrollable width (px).
    pub content_width_px: f64,
    /// Header ticks.
    pub ticks: Vec<Tick>,
    /// One entry per input resource, in input order.
    pub rows: Vec<RowLayout>,
}

impl TimelineLayout {
    /// Finds a row by resource id.
    pub fn row(&self, resource_id: &str) -> Option<&RowLayout> {
        self.rows.iter().find(|r| r.resource_id == resource_id)
    }

    /// ECBT for a resource.
    pub fn ecbt_for(&self, resource_id: &str) -> Option<i64> {
        self.row(resource_id).map(|r| r.ecbt)
    }

    /// Looks up a laid-out task across all rows.
    pub fn scheduled_task(&self, task_id: &str) -> Option<&Arc<ScheduledTask>> {
        self.rows.iter().find_map(|r| r.scheduled_task(task_id))
    }

    /// Total number of bars of every kind.
    pub fn bar_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.shift_bars.len() + r.lunch_bars.len() + r.task_bars.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskDebug, TimeWindow, HOUR_MS};

    fn scheduled(id: &str, forced: bool) -> Arc<ScheduledTask> {
        Arc::new(ScheduledTask {
            task: Task::new(id, "R1"),
            expected_date: 0,
            end_ms: HOUR_MS,
            debug: forced.then_some(TaskDebug {
                original_start_ms: 0,
                forced_start_ms: 0,
                travel_start_ms: 0,
                travel_end_ms: 0,
            }),
        })
    }

    fn sample_layout() -> TimelineLayout {
        let range = DateRange::new(0, 24 * HOUR_MS);
        let mut row = RowLayout::new("R1");
        row.shift_bars.push(Bar::from_window(
            BarKind::Shift,
            TimeWindow::new(6 * HOUR_MS, 14 * HOUR_MS),
            &range,
            60.0,
        ));
        row.task_bars.push(Bar::from_window(
            BarKind::Travel,
            TimeWindow::new(6 * HOUR_MS, 7 * HOUR_MS),
            &range,
            60.0,
        ));
        row.task_bars.push(Bar::from_window(
            BarKind::Task,
            TimeWindow::new(7 * HOUR_MS, 8 * HOUR_MS),
            &range,
            60.0,
        ));
        row.tasks = vec![scheduled("T1", true), scheduled("T2", false)];
        row.ecbt = 8 * HOUR_MS;

        TimelineLayout {
            range,
            px_per_hour: 60.0,
            content_width_px: 1440.0,
            ticks: Vec::new(),
            rows: vec![row, RowLayout::new("R2")],
        }
    }

    #[test]
    fn test_row_lookup() {
        let layout = sample_layout();
        assert!(layout.row("R1").is_some());
        assert!(layout.row("R9").is_none());
        assert_eq!(layout.ecbt_for("R1"), Some(8 * HOUR_MS));
        assert_eq!(layout.ecbt_for("R2"), Some(0));
    }

    #[test]
    fn test_bars_of_kind() {
        let layout = sample_layout();
        let row = layout.row("R1").unwrap();
        assert_eq!(row.bars_of_kind(BarKind::Travel).count(), 1);
        assert_eq!(row.bars_of_kind(BarKind::Task).count(), 1);
        assert_eq!(row.bars_of_kind(BarKind::Lunch).count(), 0);
        assert_eq!(layout.bar_count(), 3);
    }

    #[test]
    fn test_task_lookup_and_forced_count() {
        let layout = sample_layout();
        assert!(layout.scheduled_task("T2").is_some());
        assert!(layout.scheduled_task("T9").is_none());
        assert_eq!(layout.row("R1").unwrap().forced_start_count(), 1);
    }
}
