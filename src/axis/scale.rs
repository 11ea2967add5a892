//! Horizontal scale and header ticks.
//!
//! # Scale
//! `px/hour = base × zoom` for ranges up to 24 hours. Longer ranges are
//! shrunk by `24 / hours` so a week stays navigable, and the result never
//! drops below the configured floor.
//!
//! # Ticks
//!
//! | Visible days | Step | Label |
//! |--------------|------|-------|
//! | > 7 | 24 h | `May 1` |
//! | 3 – 7 | 24 h | `Wed 1` |
//! | 1 – 3 (exclusive) | 6 h | `6 AM - 12 PM` |
//! | ≤ 1 | 1 h | `6 AM` |

use chrono::DateTime;

use crate::clock::LayoutContext;
use crate::config::LayoutConfig;
use crate::models::{DateRange, Tick, HOUR_MS};

/// Scale multiplier applied to `base × zoom` for a range.
pub fn range_factor(range: &DateRange) -> f64 {
    let hours = range.hours();
    if hours <= 24.0 {
        1.0
    } else {
        24.0 / hours
    }
}

/// Pixels per hour for a range and zoom level.
///
/// ```
/// use callout_timeline::axis::px_per_hour;
/// use callout_timeline::config::LayoutConfig;
/// use callout_timeline::models::{DateRange, HOUR_MS};
///
/// let cfg = LayoutConfig::default();
/// let day = DateRange::new(0, 24 * HOUR_MS);
/// assert_eq!(px_per_hour(&day, 2.0, &cfg), 120.0);
///
/// let week = DateRange::new(0, 7 * 24 * HOUR_MS);
/// assert!((px_per_hour(&week, 1.0, &cfg) - 60.0 / 7.0).abs() < 1e-9);
/// ```
pub fn px_per_hour(range: &DateRange, zoom: f64, config: &LayoutConfig) -> f64 {
    (config.base_px_per_hour * zoom * range_factor(range)).max(config.min_px_per_hour)
}

/// How tick labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickLabel {
    /// Month and day.
    Date,
    /// Weekday and day.
    Weekday,
    /// Start and end hour of the step.
    HourRange,
    /// Start hour.
    Hour,
}

/// Tick step (hours) and label style for a range.
pub fn tick_plan(range: &DateRange) -> (i64, TickLabel) {
    let days = range.days();
    if days > 7.0 {
        (24, TickLabel::Date)
    } else if days >= 3.0 {
        (24, TickLabel::Weekday)
    } else if days > 1.0 {
        (6, TickLabel::HourRange)
    } else {
        (1, TickLabel::Hour)
    }
}

/// Header ticks from the range start, one per step, the last one cut at the range end.
pub fn ticks(range: &DateRange, px_per_hour: f64, ctx: &LayoutContext) -> Vec<Tick> {
    let (step_hours, style) = tick_plan(range);
    let step_ms = step_hours * HOUR_MS;
    let mut out = Vec::new();
    let mut time = range.start;

    while time < range.end {
        let next = (time + step_ms).min(range.end);
        let left_px = range.offset_px(time, px_per_hour);
        out.push(Tick {
            time,
            label: label(time, time + step_ms, style, ctx),
            left_px,
            width_px: range.offset_px(next, px_per_hour) - left_px,
        });
        time += step_ms;
    }
    out
}

fn label(start_ms: i64, end_ms: i64, style: TickLabel, ctx: &LayoutContext) -> String {
    let fmt = |ms: i64, pattern: &str| {
        DateTime::from_timestamp_millis(ms)
            .unwrap_or_default()
            .with_timezone(&ctx.offset)
            .format(pattern)
            .to_string()
    };
    match style {
        TickLabel::Date => fmt(start_ms, "%b %-d"),
        TickLabel::Weekday => fmt(start_ms, "%a %-d"),
        TickLabel::HourRange => format!("{} - {}", fmt(start_ms, "%-I %p"), fmt(end_ms, "%-I %p")),
        TickLabel::Hour => fmt(start_ms, "%-I %p"),
    }
}
