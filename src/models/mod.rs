//! Timeline domain models.
//!
//! Input records mirror the dispatch feed (camelCase JSON); output records
//! are plain geometry for a rendering layer.
//!
//! # Roles
//!
//! | Type | Role |
//! |------|------|
//! | `ResourceRow` | Input: worker with shift/lunch text and home location |
//! | `Task` | Input: pre-assigned unit of work |
//! | `DateRange` | Input: visible window |
//! | `ScheduledTask` | Output: task copy with rendered start |
//! | `Bar`, `Tick` | Output: pixel geometry |
//! | `RowLayout`, `TimelineLayout` | Output: per-row and whole-view results |

mod bar;
mod layout;
mod resource;
mod task;
mod window;

pub use bar::{Bar, BarKind, ClickKind, LegKind, TaskBarHandler, Tick};
pub use layout::{RowLayout, TimelineLayout};
pub use resource::ResourceRow;
pub use task::{ScheduledTask, Task, TaskDebug};
pub use window::{DateRange, TimeWindow, DAY_MS, HOUR_MS, MINUTE_MS};
