//! Time intervals and the visible date range.
//!
//! # Time Model
//! All instants are epoch milliseconds (UTC). Day-local wall-clock times are
//! resolved to instants through a [`LayoutContext`](crate::clock::LayoutContext)
//! before they reach this module.

use serde::{Deserialize, Serialize};

/// Milliseconds in one minute.
pub const MINUTE_MS: i64 = 60_000;
/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end. A window with
/// `end_ms <= start_ms` is empty and never produces a bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this window (ms). Negative for inverted windows.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Whether the window has no positive extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end_ms <= self.start_ms
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }

    /// Truncates this window to `bounds`.
    ///
    /// Returns `None` when the clipped interval is empty.
    pub fn clip_to(&self, bounds: &Self) -> Option<Self> {
        let start = self.start_ms.max(bounds.start_ms);
        let end = self.end_ms.min(bounds.end_ms);
        if end > start {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

/// The visible window of the timeline.
///
/// Derived once per computation from a start/end pair. Unlike
/// [`TimeWindow`], the end instant is treated as part of the range when
/// iterating calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// Range start (epoch ms).
    pub start: i64,
    /// Range end (epoch ms).
    pub end: i64,
}

impl DateRange {
    /// Creates a range from two instants.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Builds a range from two `DateTime`s of any time zone.
    pub fn from_datetimes<Tz: chrono::TimeZone>(
        start: &chrono::DateTime<Tz>,
        end: &chrono::DateTime<Tz>,
    ) -> Self {
        Self::new(start.timestamp_millis(), end.timestamp_millis())
    }

    /// Range length in milliseconds (0 for inverted ranges).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    /// Range length in hours.
    pub fn hours(&self) -> f64 {
        self.duration_ms() as f64 / HOUR_MS as f64
    }

    /// Range length in days.
    pub fn days(&self) -> f64 {
        self.duration_ms() as f64 / DAY_MS as f64
    }

    /// The range as a clipping window.
    pub fn as_window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Horizontal offset (px) of an instant relative to the range start.
    pub fn offset_px(&self, time_ms: i64, px_per_hour: f64) -> f64 {
        (time_ms - self.start) as f64 / HOUR_MS as f64 * px_per_hour
    }

    /// Inverse of [`offset_px`](Self::offset_px), rounded to the millisecond.
    pub fn time_at_px(&self, px: f64, px_per_hour: f64) -> i64 {
        if px_per_hour <= 0.0 {
            return self.start;
        }
        self.start + (px / px_per_hour * HOUR_MS as f64).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(100, 200);
        assert_eq!(w.duration_ms(), 100);
        assert!(w.contains(100));
        assert!(w.contains(199));
        assert!(!w.contains(200)); // exclusive end
        assert!(!w.contains(50));
        assert!(!w.is_empty());
        assert!(TimeWindow::new(200, 200).is_empty());
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(0, 100);
        let b = TimeWindow::new(50, 150);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::new(100, 200); // touching but not overlapping
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_clip_to() {
        let bounds = TimeWindow::new(1_000, 5_000);
        assert_eq!(
            TimeWindow::new(0, 2_000).clip_to(&bounds),
            Some(TimeWindow::new(1_000, 2_000))
        );
        assert_eq!(
            TimeWindow::new(4_000, 9_000).clip_to(&bounds),
            Some(TimeWindow::new(4_000, 5_000))
        );
        assert_eq!(TimeWindow::new(5_000, 9_000).clip_to(&bounds), None);
        assert_eq!(TimeWindow::new(3_000, 2_000).clip_to(&bounds), None);
    }

    #[test]
    fn test_range_pixels() {
        let range = DateRange::new(0, DAY_MS);
        assert!((range.hours() - 24.0).abs() < 1e-10);
        assert!((range.days() - 1.0).abs() < 1e-10);
        assert!((range.offset_px(2 * HOUR_MS, 60.0) - 120.0).abs() < 1e-10);
        assert_eq!(range.time_at_px(120.0, 60.0), 2 * HOUR_MS);
    }

    #[test]
    fn test_inverted_range_is_zero_length() {
        let range = DateRange::new(DAY_MS, 0);
        assert_eq!(range.duration_ms(), 0);
        assert_eq!(range.hours(), 0.0);
    }
}
