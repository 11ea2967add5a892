//! Shift and lunch bar extraction.
//!
//! # Algorithm
//! For every calendar day touched by the visible range (starting at the
//! day containing the range start, stopping once a day begins after the
//! range end):
//! 1. Resolve the row's clock-time pair to day-local instants, wrapping the
//!    end past midnight when it is not after the start.
//! 2. Clip to the visible range and keep only non-empty results.
//! 3. Map the clipped interval to pixels.
//!
//! Shift and lunch bars use the same routine and are independent lists.

use chrono::NaiveDate;
use tracing::trace;

use crate::clock::{ClockTime, LayoutContext};
use crate::models::{Bar, BarKind, DateRange, ResourceRow, TimeWindow};

/// Shift occupancy bars for a row, one per visible day.
pub fn shift_bars(row: &ResourceRow, range: &DateRange, px_per_hour: f64, ctx: &LayoutContext) -> Vec<Bar> {
    daily_bars(row.shift_times(), BarKind::Shift, range, px_per_hour, ctx)
}

/// Lunch bars for a row, one per visible day.
pub fn lunch_bars(row: &ResourceRow, range: &DateRange, px_per_hour: f64, ctx: &LayoutContext) -> Vec<Bar> {
    daily_bars(row.lunch_times(), BarKind::Lunch, range, px_per_hour, ctx)
}

/// Repeats a daily clock-time window across the visible range.
///
/// `None` times produce no bars.
pub fn daily_bars(
    times: Option<(ClockTime, ClockTime)>,
    kind: BarKind,
    range: &DateRange,
    px_per_hour: f64,
    ctx: &LayoutContext,
) -> Vec<Bar> {
    let Some((start, end)) = times else {
        return Vec::new();
    };
    let bounds = range.as_window();
    let mut bars = Vec::new();
    let mut day = ctx.date_of(range.start);

    loop {
        match ctx.day_start(day) {
            Some(day_start) if day_start <= range.end => {}
            _ => break,
        }
        if let Some(clipped) = day_window(day, start, end, ctx).and_then(|w| w.clip_to(&bounds)) {
            trace!(?kind, %day, start_ms = clipped.start_ms, end_ms = clipped.end_ms, "daily bar");
            bars.push(Bar::from_window(kind, clipped, range, px_per_hour));
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    bars
}

/// The row's shift on `date`, unclipped.
pub fn shift_window_on(row: &ResourceRow, date: NaiveDate, ctx: &LayoutContext) -> Option<TimeWindow> {
    let (start, end) = row.shift_times()?;
    day_window(date, start, end, ctx)
}

fn day_window(date: NaiveDate, start: ClockTime, end: ClockTime, ctx: &LayoutContext) -> Option<TimeWindow> {
    ctx.day_window(date, start, end)
        .map(|(s, e)| TimeWindow::new(s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DAY_MS, HOUR_MS};

    // 2024-05-01T00:00:00Z
    const MAY_1: i64 = 1_714_521_600_000;

    fn ctx() -> LayoutContext {
        LayoutContext::at_time(MAY_1 + 9 * HOUR_MS)
    }

    #[test]
    fn test_day_shift_single_day() {
        let row = ResourceRow::new("R1").with_shift("6:00 AM", "2:00 PM");
        let range = DateRange::new(MAY_1, MAY_1 + DAY_MS);
        let bars = shift_bars(&row, &range, 10.0, &ctx());

        // The range end is midnight of May 2, so May 2 is visited but its
        // shift lies outside the range.
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].kind, BarKind::Shift);
        assert_eq!(bars[0].window.start_ms, MAY_1 + 6 * HOUR_MS);
        assert_eq!(bars[0].window.end_ms, MAY_1 + 14 * HOUR_MS);
        assert!((bars[0].left_px - 60.0).abs() < 1e-9);
        assert!((bars[0].width_px - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_bar_per_day() {
        let row = ResourceRow::new("R1").with_shift("8:00 AM", "4:00 PM");
        let range = DateRange::new(MAY_1, MAY_1 + 3 * DAY_MS);
        let bars = shift_bars(&row, &range, 10.0, &ctx());
        assert_eq!(bars.len(), 3);
        for (i, bar) in bars.iter().enumerate() {
            assert_eq!(bar.window.start_ms, MAY_1 + i as i64 * DAY_MS + 8 * HOUR_MS);
            assert_eq!(bar.window.duration_ms(), 8 * HOUR_MS);
        }
    }

    #[test]
    fn test_overnight_shift_wraps() {
        let row = ResourceRow::new("R1").with_shift("10:00 PM", "6:00 AM");
        // 20:00 May 1 → 08:00 May 2
        let range = DateRange::new(MAY_1 + 20 * HOUR_MS, MAY_1 + DAY_MS + 8 * HOUR_MS);
        let bars = shift_bars(&row, &range, 10.0, &ctx());

        assert_eq!(bars.len(), 1);
        let w = bars[0].window;
        assert_eq!(w.start_ms, MAY_1 + 22 * HOUR_MS);
        assert_eq!(w.end_ms - w.start_ms, 8 * HOUR_MS);
        assert!(bars[0].width_px > 0.0);
    }

    #[test]
    fn test_overnight_shift_clipped_at_range_end() {
        let row = ResourceRow::new("R1").with_shift("10:00 PM", "6:00 AM");
        let range = DateRange::new(MAY_1, MAY_1 + DAY_MS);
        let bars = shift_bars(&row, &range, 10.0, &ctx());

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].window.start_ms, MAY_1 + 22 * HOUR_MS);
        assert_eq!(bars[0].window.end_ms, MAY_1 + DAY_MS);
    }

    #[test]
    fn test_lunch_bars_independent_of_shift() {
        let row = ResourceRow::new("R1").with_lunch("12:00 PM", "12:30 PM");
        let range = DateRange::new(MAY_1, MAY_1 + 2 * DAY_MS);
        assert!(shift_bars(&row, &range, 10.0, &ctx()).is_empty());

        let lunches = lunch_bars(&row, &range, 10.0, &ctx());
        assert_eq!(lunches.len(), 2);
        assert!(lunches.iter().all(|b| b.kind == BarKind::Lunch));
        assert!(lunches.iter().all(|b| b.window.duration_ms() == HOUR_MS / 2));
    }

    #[test]
    fn test_unparseable_shift_yields_nothing() {
        let row = ResourceRow::new("R1").with_shift("morning", "2:00 PM");
        let range = DateRange::new(MAY_1, MAY_1 + DAY_MS);
        assert!(shift_bars(&row, &range, 10.0, &ctx()).is_empty());
    }

    #[test]
    fn test_shift_outside_range_dropped() {
        let row = ResourceRow::new("R1").with_shift("6:00 AM", "8:00 AM");
        let range = DateRange::new(MAY_1 + 9 * HOUR_MS, MAY_1 + 17 * HOUR_MS);
        assert!(shift_bars(&row, &range, 10.0, &ctx()).is_empty());
    }

    #[test]
    fn test_shift_window_on() {
        let row = ResourceRow::new("R1").with_shift("6:00 AM", "2:00 PM");
        let c = ctx();
        let w = shift_window_on(&row, c.today(), &c).unwrap();
        assert_eq!(w, TimeWindow::new(MAY_1 + 6 * HOUR_MS, MAY_1 + 14 * HOUR_MS));
        assert!(shift_window_on(&ResourceRow::new("R2"), c.today(), &c).is_none());
    }
}
