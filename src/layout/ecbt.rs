//! Estimated comeback time (ECBT).
//!
//! The instant a resource is expected to be free of all committed work for
//! the current day. "Today" comes from the [`LayoutContext`] clock, not from
//! the visible range.
//!
//! # Algorithm
//! 1. Seed a running maximum with today's shift start (0 without a shift).
//! 2. For each assigned task whose start falls on today's date, fold in its
//!    committed finish ([`Task::finish_ms`]).
//!
//! The result is therefore never earlier than the shift start nor than any
//! qualifying task's finish, and adding tasks can only move it later.

use crate::clock::LayoutContext;
use crate::config::LayoutConfig;
use crate::models::{ResourceRow, Task};

use super::shift::shift_window_on;

/// ECBT (epoch ms) for one resource.
///
/// `tasks` may contain tasks of any status or resource-day; only assigned
/// tasks starting today count.
pub fn estimate_comeback(
    row: &ResourceRow,
    tasks: &[&Task],
    ctx: &LayoutContext,
    config: &LayoutConfig,
) -> i64 {
    let today = ctx.today();
    let shift_start = shift_window_on(row, today, ctx).map_or(0, |w| w.start_ms);

    tasks
        .iter()
        .filter(|t| t.is_assigned(&config.assigned_status))
        .filter_map(|t| {
            let start = t.start_ms(ctx)?;
            (ctx.date_of(start) == today).then(|| t.finish_ms(ctx).unwrap_or(start))
        })
        .fold(shift_start, i64::max)
}
