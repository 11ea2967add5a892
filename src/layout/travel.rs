//! Travel-time inference between job sites.
//!
//! # Algorithm
//! Given a row's tasks for today, sorted by nominal start:
//! 1. **Home leg**: if the first task and the home both have coordinates and
//!    today's shift start is known, a leg occupies
//!    `[shift_start, shift_start + travel]` with the home floor applied.
//! 2. **Inter-task legs**: for each consecutive pair starting on the same
//!    calendar day, both located, a leg occupies
//!    `[prev_finish, prev_finish + travel]` with the inter-task floor.
//!    Pairs that cross a day boundary never get a leg.
//! 3. Legs are keyed by the index of the task they precede.
//!
//! Travel is `max(distance / speed, floor)`; see [`crate::geo`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::LayoutContext;
use crate::config::LayoutConfig;
use crate::geo::{travel_minutes_at, GeoPoint};
use crate::models::{LegKind, TimeWindow, MINUTE_MS};

/// The timing facts the scheduler needs about one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStop {
    /// Nominal start (ms).
    pub start_ms: i64,
    /// Committed finish (ms); the start when nothing better is known.
    pub finish_ms: i64,
    /// Job site.
    pub location: Option<GeoPoint>,
}

/// An inferred travel interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelLeg {
    /// Home or between tasks.
    pub kind: LegKind,
    /// Occupied interval.
    pub window: TimeWindow,
    /// Great-circle distance (km).
    pub distance_km: f64,
}

impl TravelLeg {
    /// Leg duration in minutes.
    pub fn minutes(&self) -> f64 {
        self.window.duration_ms() as f64 / MINUTE_MS as f64
    }
}

/// Travel legs for one row, keyed by the index of the following task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelPlan {
    legs: BTreeMap<usize, TravelLeg>,
}

impl TravelPlan {
    /// Leg preceding task `index`, if any.
    pub fn leg_before(&self, index: usize) -> Option<&TravelLeg> {
        self.legs.get(&index)
    }

    /// Legs in task order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TravelLeg)> {
        self.legs.iter().map(|(&i, leg)| (i, leg))
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Whether no leg was inferred.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

/// Infers travel legs for a row.
///
/// `stops` must already be sorted by start. `shift_start_ms` is today's
/// shift start; without it no home leg is placed.
pub fn plan_travel(
    stops: &[TaskStop],
    home: Option<GeoPoint>,
    shift_start_ms: Option<i64>,
    ctx: &LayoutContext,
    config: &LayoutConfig,
) -> TravelPlan {
    let mut plan = TravelPlan::default();

    if let (Some(first), Some(home), Some(shift_start)) = (stops.first(), home, shift_start_ms) {
        if let Some(site) = first.location {
            let leg = leg_from(
                LegKind::Home,
                shift_start,
                home.distance_to(&site),
                config.home_travel_floor_min,
                config,
            );
            debug!(minutes = leg.minutes(), distance_km = leg.distance_km, "home leg");
            plan.legs.insert(0, leg);
        }
    }

    for (i, pair) in stops.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if ctx.date_of(prev.start_ms) != ctx.date_of(next.start_ms) {
            continue;
        }
        let (Some(from), Some(to)) = (prev.location, next.location) else {
            continue;
        };
        let leg = leg_from(
            LegKind::Between,
            prev.finish_ms,
            from.distance_to(&to),
            config.inter_task_travel_floor_min,
            config,
        );
        debug!(index = i + 1, minutes = leg.minutes(), distance_km = leg.distance_km, "inter-task leg");
        plan.legs.insert(i + 1, leg);
    }

    plan
}

fn leg_from(kind: LegKind, start_ms: i64, distance_km: f64, floor_min: f64, config: &LayoutConfig) -> TravelLeg {
    let minutes = travel_minutes_at(distance_km, config.average_speed_kmh, floor_min);
    let duration_ms = (minutes * MINUTE_MS as f64).round() as i64;
    TravelLeg {
        kind,
        window: TimeWindow::new(start_ms, start_ms.saturating_add(duration_ms)),
        distance_km,
    }
}
