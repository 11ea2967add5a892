//! Wall-clock parsing and the layout time context.
//!
//! Two kinds of textual time reach the layout core:
//!
//! - **Clock times** on resource rows (`"6:00 AM"`, `"10:30 pm"`), parsed by
//!   [`parse_clock_time`] into an hour/minute pair.
//! - **Date-ish strings** on tasks (`"2024-05-01T07:00:00"`, RFC 3339, bare
//!   dates, epoch milliseconds), resolved by [`LayoutContext::parse_instant`].
//!
//! Neither parser fails loudly: malformed input becomes `None` and the
//! caller decides what omission means.

use std::sync::OnceLock;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::DAY_MS;

/// A 24-hour time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    /// Hour (0-23).
    pub h: u32,
    /// Minute (0-59).
    pub m: u32,
}

impl ClockTime {
    /// Creates a clock time, or `None` when out of range.
    pub fn new(h: u32, m: u32) -> Option<Self> {
        (h < 24 && m < 60).then_some(Self { h, m })
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes_of_day(&self) -> u32 {
        self.h * 60 + self.m
    }
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*([AP]M)").expect("clock pattern compiles")
    })
}

/// Parses an informal 12-hour time such as `"6:00 AM"`.
///
/// Matching is case-insensitive and ignores surrounding text. 12 AM maps
/// to hour 0, 12 PM stays 12, any other PM hour gains 12. Hours outside
/// 1-12 or minutes above 59 are rejected.
///
/// ```
/// use callout_timeline::clock::parse_clock_time;
///
/// let t = parse_clock_time(Some("Shift: 10:15 pm")).unwrap();
/// assert_eq!((t.h, t.m), (22, 15));
/// assert!(parse_clock_time(Some("noon")).is_none());
/// assert!(parse_clock_time(None).is_none());
/// ```
pub fn parse_clock_time(text: Option<&str>) -> Option<ClockTime> {
    let caps = clock_pattern().captures(text?)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let pm = caps[3].eq_ignore_ascii_case("pm");
    let h = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    ClockTime::new(h, minute)
}

/// Naive layouts tried after RFC 3339, interpreted in the context offset.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The clock and time zone one layout computation runs against.
///
/// Fixes "now" (which also defines "today" for travel and ECBT) and the
/// UTC offset used to turn day-local wall-clock times into instants.
/// Passing it explicitly keeps every layout function pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    /// Current instant (epoch ms).
    pub now_ms: i64,
    /// Offset of the dashboard's local time zone.
    pub offset: FixedOffset,
}

impl LayoutContext {
    /// Creates a UTC context at the given instant.
    pub fn at_time(now_ms: i64) -> Self {
        Self {
            now_ms,
            offset: Utc.fix(),
        }
    }

    /// Creates a context from the system clock and local offset.
    pub fn local_now() -> Self {
        let now = Local::now();
        Self {
            now_ms: now.timestamp_millis(),
            offset: *now.offset(),
        }
    }

    /// Sets the local offset.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// The current calendar day in the context offset.
    pub fn today(&self) -> NaiveDate {
        self.date_of(self.now_ms)
    }

    /// Calendar day of an instant in the context offset.
    pub fn date_of(&self, time_ms: i64) -> NaiveDate {
        DateTime::from_timestamp_millis(time_ms)
            .unwrap_or_default()
            .with_timezone(&self.offset)
            .date_naive()
    }

    /// Instant of a wall-clock time on a given day.
    pub fn local_instant(&self, date: NaiveDate, time: ClockTime) -> Option<i64> {
        let naive = date.and_hms_opt(time.h, time.m, 0)?;
        self.resolve(naive)
    }

    /// Instant of local midnight starting `date`.
    pub fn day_start(&self, date: NaiveDate) -> Option<i64> {
        self.resolve(date.and_time(NaiveTime::MIN))
    }

    /// Day-local `[start, end]` instants for a clock-time pair on `date`.
    ///
    /// When the end is at or before the start in minutes-of-day the window
    /// wraps past midnight and the end moves 24 hours later.
    pub fn day_window(&self, date: NaiveDate, start: ClockTime, end: ClockTime) -> Option<(i64, i64)> {
        let start_ms = self.local_instant(date, start)?;
        let mut end_ms = self.local_instant(date, end)?;
        if end.minutes_of_day() <= start.minutes_of_day() {
            end_ms += DAY_MS;
        }
        Some((start_ms, end_ms))
    }

    /// Parses a task date field into an instant.
    ///
    /// Accepts epoch milliseconds, RFC 3339, `YYYY-MM-DD[T| ]HH:MM[:SS[.fff]]`
    /// and bare `YYYY-MM-DD` (local midnight). Naive forms are read in the
    /// context offset.
    pub fn parse_instant(&self, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse().ok();
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.timestamp_millis());
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return self.resolve(naive);
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| self.day_start(date))
    }

    fn resolve(&self, naive: NaiveDateTime) -> Option<i64> {
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.timestamp_millis())
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::local_now()
    }
}
