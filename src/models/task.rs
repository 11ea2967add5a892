//! Task model.
//!
//! A task is a unit of field work pre-assigned to exactly one resource.
//! Dates arrive as loosely formatted strings with two interchangeable
//! spellings each (`expectedStartDate`/`startDate`,
//! `expectedFinishDate`/`endDate`); the expected form wins when both exist.
//!
//! Layout never mutates input tasks. It returns [`ScheduledTask`] copies
//! carrying the rendered start and any forced-start diagnostics.

use serde::{Deserialize, Serialize};

use crate::clock::LayoutContext;
use crate::geo::GeoPoint;
use crate::models::MINUTE_MS;

/// A unit of work assigned to one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub task_id: String,
    /// Assigned resource (`ResourceRow::resource_id`).
    pub employee_id: String,
    /// Planned start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_start_date: Option<String>,
    /// Raw start (used when no planned start exists).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Planned finish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_finish_date: Option<String>,
    /// Raw finish (used when no planned finish exists).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Estimated duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    /// Job site latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Job site longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Workflow status; only assigned tasks are laid out.
    #[serde(default)]
    pub task_status: String,
}

impl Task {
    /// Creates a task for a resource.
    pub fn new(task_id: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            employee_id: employee_id.into(),
            ..Default::default()
        }
    }

    /// Sets the planned start.
    pub fn with_expected_start(mut self, start: impl Into<String>) -> Self {
        self.expected_start_date = Some(start.into());
        self
    }

    /// Sets the planned finish.
    pub fn with_expected_finish(mut self, finish: impl Into<String>) -> Self {
        self.expected_finish_date = Some(finish.into());
        self
    }

    /// Sets the estimated duration (minutes).
    pub fn with_duration(mut self, minutes: f64) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    /// Sets the job site.
    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Sets the workflow status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.task_status = status.into();
        self
    }

    /// The start text, preferring the planned start. Blank strings count as absent.
    pub fn start_field(&self) -> Option<&str> {
        first_present(&self.expected_start_date, &self.start_date)
    }

    /// The finish text, preferring the planned finish.
    pub fn finish_field(&self) -> Option<&str> {
        first_present(&self.expected_finish_date, &self.end_date)
    }

    /// Job site, when both coordinates are present.
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lng)
    }

    /// Whether the status matches `assigned_status` (case-insensitive).
    pub fn is_assigned(&self, assigned_status: &str) -> bool {
        self.task_status.trim().eq_ignore_ascii_case(assigned_status)
    }

    /// Parsed start instant.
    pub fn start_ms(&self, ctx: &LayoutContext) -> Option<i64> {
        ctx.parse_instant(self.start_field()?)
    }

    /// Rendered duration (ms): the estimate, or `default_minutes`.
    ///
    /// Estimates beyond the `i64` range saturate.
    pub fn duration_ms(&self, default_minutes: i64) -> i64 {
        match self.estimated_duration {
            Some(minutes) if minutes.is_finite() && minutes >= 0.0 => {
                (minutes * MINUTE_MS as f64).round() as i64
            }
            _ => default_minutes.saturating_mul(MINUTE_MS),
        }
    }

    /// Committed finish instant: the finish field when it parses, else
    /// the start.
    ///
    /// The estimated duration only sizes the rendered bar, it never moves
    /// the finish used for travel and comeback times.
    pub fn finish_ms(&self, ctx: &LayoutContext) -> Option<i64> {
        self.finish_field()
            .and_then(|f| ctx.parse_instant(f))
            .or_else(|| self.start_ms(ctx))
    }
}

fn first_present<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(|s| s.as_str())
        .find(|s| !s.trim().is_empty())
}

/// Forced-start diagnostics.
///
/// Present only when a travel leg pushed the task later than planned.
/// Informational; the rendered start on [`ScheduledTask`] is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDebug {
    /// Nominal start before travel (ms).
    pub original_start_ms: i64,
    /// Start after travel (ms).
    pub forced_start_ms: i64,
    /// Start of the preceding travel leg (ms).
    pub travel_start_ms: i64,
    /// End of the preceding travel leg (ms).
    pub travel_end_ms: i64,
}

/// A task as laid out: the input plus its rendered start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    /// The input task, unchanged.
    #[serde(flatten)]
    pub task: Task,
    /// Rendered start (ms), after any travel push.
    pub expected_date: i64,
    /// Rendered end (ms).
    pub end_ms: i64,
    /// Forced-start diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<TaskDebug>,
}

impl ScheduledTask {
    /// Task identifier.
    pub fn task_id(&self) -> &str {
        &self.task.task_id
    }

    /// Whether travel pushed this task later than planned.
    pub fn was_forced(&self) -> bool {
        self.debug.is_some()
    }
}
