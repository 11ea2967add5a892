//! Time axis: scale, ticks and viewport interaction.
//!
//! - **`scale`**: pure range/zoom → px/hour and header ticks
//! - **`viewport`**: stateful cursor-anchored zoom and scroll sync

pub mod scale;
pub mod viewport;

pub use scale::{px_per_hour, range_factor, tick_plan, ticks, TickLabel};
pub use viewport::{FrameTask, PaneId, ScrollPane, ViewportController};
