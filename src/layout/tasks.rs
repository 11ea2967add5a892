//! Task and travel bar resolution for one row.
//!
//! # Algorithm
//! 1. Keep assigned tasks; drop (and count) tasks with no start field.
//! 2. Parse each nominal start, falling back to "now" when the text does
//!    not parse, then sort by it.
//! 3. Infer travel legs ([`plan_travel`]) among the tasks starting today.
//!    Tasks on other days keep their nominal start and get no leg.
//! 4. Walk tasks in order. A leg that ends after the task's nominal start
//!    pushes the start to the leg end; travel never pulls work earlier.
//!    The leg bar is emitted right before its task bar.
//! 5. End = start + estimated duration (default from config), saturating.
//! 6. Clip travel and task intervals to today's shift within the visible
//!    range, drop empty ones, and shave the configured gap off each bar.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::shift::shift_window_on;
use super::travel::{plan_travel, TaskStop, TravelPlan};
use crate::clock::LayoutContext;
use crate::config::LayoutConfig;
use crate::models::{Bar, BarKind, DateRange, ResourceRow, ScheduledTask, Task, TaskDebug, TimeWindow};

/// Output of [`resolve_task_bars`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedTasks {
    /// Travel and task bars in emission order.
    pub bars: Vec<Bar>,
    /// Every laid-out task in start order.
    pub tasks: Vec<Arc<ScheduledTask>>,
    /// Tasks dropped for lack of a start field.
    pub skipped: usize,
    /// The travel legs used, keyed by position among today's tasks.
    pub travel: TravelPlan,
}

/// Lays out a row's tasks and travel legs.
///
/// `tasks` may include other statuses; only assigned ones take part.
pub fn resolve_task_bars(
    row: &ResourceRow,
    tasks: &[&Task],
    range: &DateRange,
    px_per_hour: f64,
    ctx: &LayoutContext,
    config: &LayoutConfig,
) -> ResolvedTasks {
    let mut skipped = 0;
    let mut ordered: Vec<(&Task, i64)> = Vec::with_capacity(tasks.len());
    for &task in tasks {
        if !task.is_assigned(&config.assigned_status) {
            continue;
        }
        let Some(text) = task.start_field() else {
            debug!(task = %task.task_id, "skipping task without start date");
            skipped += 1;
            continue;
        };
        let start = ctx.parse_instant(text).unwrap_or_else(|| {
            warn!(task = %task.task_id, start = text, "unparseable start date, using now");
            ctx.now_ms
        });
        ordered.push((task, start));
    }
    ordered.sort_by_key(|&(_, start)| start);

    // positions in `ordered` of today's tasks; legs are keyed into this list
    let today = ctx.today();
    let todays: Vec<usize> = ordered
        .iter()
        .enumerate()
        .filter(|&(_, &(_, start))| ctx.date_of(start) == today)
        .map(|(index, _)| index)
        .collect();
    let stops: Vec<TaskStop> = todays
        .iter()
        .map(|&index| {
            let (task, start) = ordered[index];
            TaskStop {
                start_ms: start,
                finish_ms: task.finish_ms(ctx).unwrap_or(start),
                location: task.location(),
            }
        })
        .collect();

    let today_shift = shift_window_on(row, today, ctx);
    let travel = plan_travel(&stops, row.home(), today_shift.map(|w| w.start_ms), ctx, config);
    let bounds = today_shift.and_then(|shift| shift.clip_to(&range.as_window()));

    let mut bars = Vec::new();
    let mut laid_out = Vec::with_capacity(ordered.len());

    for (index, &(task, nominal)) in ordered.iter().enumerate() {
        let leg = todays
            .binary_search(&index)
            .ok()
            .and_then(|position| travel.leg_before(position));
        let mut start = nominal;
        let mut diagnostics = None;

        if let Some(leg) = leg {
            if leg.window.end_ms > nominal {
                debug!(
                    task = %task.task_id,
                    nominal,
                    forced = leg.window.end_ms,
                    "travel pushes task start"
                );
                start = leg.window.end_ms;
                diagnostics = Some(TaskDebug {
                    original_start_ms: nominal,
                    forced_start_ms: start,
                    travel_start_ms: leg.window.start_ms,
                    travel_end_ms: leg.window.end_ms,
                });
            }
        }

        let end = start.saturating_add(task.duration_ms(config.default_task_duration_min));
        let scheduled = Arc::new(ScheduledTask {
            task: task.clone(),
            expected_date: start,
            end_ms: end,
            debug: diagnostics,
        });

        if let Some(bounds) = &bounds {
            if let Some(leg) = leg {
                if let Some(bar) = clipped_bar(BarKind::Travel, leg.window, bounds, range, px_per_hour, config) {
                    bars.push(bar.with_leg(leg.kind));
                }
            }
            if let Some(bar) = clipped_bar(BarKind::Task, TimeWindow::new(start, end), bounds, range, px_per_hour, config) {
                bars.push(bar.with_task(Arc::clone(&scheduled)));
            }
        }

        laid_out.push(scheduled);
    }

    ResolvedTasks {
        bars,
        tasks: laid_out,
        skipped,
        travel,
    }
}

fn clipped_bar(
    kind: BarKind,
    window: TimeWindow,
    bounds: &TimeWindow,
    range: &DateRange,
    px_per_hour: f64,
    config: &LayoutConfig,
) -> Option<Bar> {
    let clipped = window.clip_to(bounds)?;
    trace!(?kind, start_ms = clipped.start_ms, end_ms = clipped.end_ms, "row bar");
    Some(
        Bar::from_window(kind, clipped, range, px_per_hour)
            .with_gap(config.bar_gap_px, config.min_bar_width_px),
    )
}
