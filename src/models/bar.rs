//! Bars and ticks: the geometry handed to the rendering layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DateRange, ScheduledTask, TimeWindow};

/// What a bar represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    /// Shift occupancy.
    Shift,
    /// Lunch break.
    Lunch,
    /// Committed task.
    Task,
    /// Inferred travel leg.
    Travel,
}

/// Origin of a travel leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    /// From the resource's home to the first task.
    Home,
    /// Between two consecutive tasks on the same day.
    Between,
}

/// A positioned rectangle on a timeline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Offset from the visible range start (px).
    pub left_px: f64,
    /// Width (px), never negative.
    pub width_px: f64,
    /// Bar category.
    #[serde(rename = "type")]
    pub kind: BarKind,
    /// Clipped time interval the bar was built from.
    pub window: TimeWindow,
    /// Laid-out task, for task bars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Arc<ScheduledTask>>,
    /// Leg origin, for travel bars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg: Option<LegKind>,
}

impl Bar {
    /// Maps a clipped window onto the pixel axis.
    pub fn from_window(kind: BarKind, window: TimeWindow, range: &DateRange, px_per_hour: f64) -> Self {
        let left_px = range.offset_px(window.start_ms, px_per_hour);
        let width_px = (range.offset_px(window.end_ms, px_per_hour) - left_px).max(0.0);
        Self {
            left_px,
            width_px,
            kind,
            window,
            task: None,
            leg: None,
        }
    }

    /// Attaches the laid-out task.
    pub fn with_task(mut self, task: Arc<ScheduledTask>) -> Self {
        self.task = Some(task);
        self
    }

    /// Tags a travel bar with its origin.
    pub fn with_leg(mut self, leg: LegKind) -> Self {
        self.leg = Some(leg);
        self
    }

    /// Shrinks the bar by `gap_px` in total, half on each side.
    ///
    /// Width never drops below `min_width_px`. The left edge always moves by
    /// `gap_px / 2`, so a floored bar keeps its leading half-gap but spills
    /// past its trailing one. Adjacent bars are guaranteed `gap_px` apart only
    /// while each is at least `gap_px + min_width_px` wide before the shrink.
    pub fn with_gap(mut self, gap_px: f64, min_width_px: f64) -> Self {
        self.left_px += gap_px / 2.0;
        self.width_px = (self.width_px - gap_px).max(min_width_px);
        self
    }

    /// Right edge (px).
    #[inline]
    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }

    /// Forwards a click on a task bar to `handler`. Other bars ignore clicks.
    pub fn dispatch<H: TaskBarHandler + ?Sized>(&self, click: ClickKind, handler: &H) {
        if let Some(task) = &self.task {
            match click {
                ClickKind::Single => handler.on_click(task),
                ClickKind::Double => handler.on_double_click(task),
            }
        }
    }
}

/// Pointer activation on a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// Caller-supplied reactions to task bar clicks.
///
/// The layout core attaches no meaning to clicks; it only routes them.
pub trait TaskBarHandler {
    /// Single click on a task bar.
    fn on_click(&self, task: &ScheduledTask);

    /// Double click on a task bar. Defaults to doing nothing.
    fn on_double_click(&self, _task: &ScheduledTask) {}
}

/// A labeled time-axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    /// Tick instant (epoch ms).
    pub time: i64,
    /// Header label.
    pub label: String,
    /// Offset from the visible range start (px).
    pub left_px: f64,
    /// Interval width until the next tick (px).
    pub width_px: f64,
}
