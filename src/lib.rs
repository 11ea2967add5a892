//! Timeline layout engine for field-resource dispatch.
//!
//! Turns each resource's textual shift and lunch schedule plus its assigned
//! tasks into pixel-positioned bars for a multi-resource Gantt view. Travel
//! between job sites is inferred from coordinates, tasks that cannot be
//! reached in time are pushed later, and every row gets an estimated
//! comeback time (ECBT).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ResourceRow`, `Task`, `ScheduledTask`,
//!   `DateRange`, `TimeWindow`, `Bar`, `Tick`, `RowLayout`, `TimelineLayout`
//! - **`clock`**: `H:MM AM|PM` parsing, task date parsing, and the
//!   `LayoutContext` that pins "now" and the UTC offset
//! - **`geo`**: Haversine distance and travel-time estimation
//! - **`layout`**: Shift/lunch bars, travel legs, forced starts, ECBT, KPIs,
//!   and the `TimelineEngine` that runs them per row
//! - **`axis`**: Pixels-per-hour, header ticks, and the `ViewportController`
//!   for cursor-anchored zoom and scroll synchronization
//! - **`config`**: `LayoutConfig` with every tunable constant
//! - **`validation`**: Advisory input integrity checks
//!
//! # Architecture
//!
//! Layout is a pure function of (resources, tasks, range, zoom, clock) and
//! is recomputed from scratch on every change. Data-quality problems never
//! fail a layout; they drop the affected bar and are logged through
//! `tracing`. The only state lives in `ViewportController`, a thin adapter
//! the host drives with wheel, scroll and frame events.
//!
//! # Example
//!
//! ```
//! use callout_timeline::{LayoutContext, TimelineEngine};
//! use callout_timeline::models::{DateRange, ResourceRow, Task, DAY_MS, HOUR_MS};
//!
//! let midnight = 1_714_521_600_000; // 2024-05-01T00:00:00Z
//! let ctx = LayoutContext::at_time(midnight + 5 * HOUR_MS);
//!
//! let resources = vec![ResourceRow::new("R1")
//!     .with_shift("6:00 AM", "2:00 PM")
//!     .with_home(51.50, -0.12)];
//! let tasks = vec![Task::new("T1", "R1")
//!     .with_expected_start("2024-05-01T07:00:00")
//!     .with_expected_finish("2024-05-01T08:00:00")
//!     .with_duration(60.0)
//!     .with_location(51.51, -0.13)
//!     .with_status("assigned")];
//!
//! let layout = TimelineEngine::new().compute_layout(
//!     &resources,
//!     &tasks,
//!     DateRange::new(midnight, midnight + DAY_MS),
//!     1.0,
//!     &ctx,
//! );
//!
//! let row = layout.row("R1").unwrap();
//! assert_eq!(row.task_bars.len(), 2); // home travel, then T1
//! assert_eq!(row.ecbt, midnight + 8 * HOUR_MS);
//! ```

pub mod axis;
pub mod clock;
pub mod config;
pub mod geo;
pub mod layout;
pub mod models;
pub mod validation;

pub use clock::LayoutContext;
pub use config::{ConfigError, LayoutConfig};
pub use layout::TimelineEngine;
