//! Row layout algorithms.
//!
//! # Modules
//!
//! - **`shift`**: daily shift and lunch bars with overnight wrap
//! - **`travel`**: inferred home and inter-task travel legs
//! - **`tasks`**: forced starts, clipping and gap-adjusted task bars
//! - **`ecbt`**: estimated comeback time
//! - **`engine`**: per-row orchestration across a whole timeline
//! - **`kpi`**: utilization and travel statistics of a computed layout

pub mod ecbt;
pub mod engine;
pub mod kpi;
pub mod shift;
pub mod tasks;
pub mod travel;

pub use ecbt::estimate_comeback;
pub use engine::{attach_ecbt, LayoutRequest, TimelineEngine};
pub use kpi::{LayoutKpi, RowKpi};
pub use shift::{lunch_bars, shift_bars};
pub use tasks::{resolve_task_bars, ResolvedTasks};
pub use travel::{plan_travel, TaskStop, TravelLeg, TravelPlan};
