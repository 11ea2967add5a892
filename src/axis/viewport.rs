//! Stateful zoom and scroll controller around the pure layout core.
//!
//! Three panes are tracked:
//!
//! | Pane | Follows |
//! |------|---------|
//! | Header (tick labels) | body's horizontal scroll, proportionally |
//! | Body (bars) | header's horizontal scroll, proportionally |
//! | Row labels | body's vertical scroll only |
//!
//! # Cursor-anchored zoom
//! 1. Read the instant under the pointer at the current scale.
//! 2. Change the zoom, clamped to `[min_zoom, max_zoom]`.
//! 3. Queue a correction that scrolls the body so the same instant sits
//!    under the pointer at the new scale.
//!
//! The correction is applied by [`ViewportController::flush_frame`], which
//! the host calls once the new scale has been rendered. Vertical mirroring
//! of the row-label pane is queued the same way.
//!
//! Programmatic scrolls suppress the echo event they cause, so propagation
//! is one-directional per user event.

use std::fmt;

use tracing::{debug, trace};

use super::scale::{px_per_hour, range_factor};
use crate::config::{ConfigError, LayoutConfig};
use crate::models::DateRange;

/// Hours that must fit one screen at minimum zoom.
const FIT_HOURS: f64 = 24.0;

/// Scroll state of one pane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPane {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ScrollPane {
    /// Largest horizontal scroll offset.
    pub fn max_left(&self) -> f64 {
        (self.content_width - self.client_width).max(0.0)
    }

    /// Largest vertical scroll offset.
    pub fn max_top(&self) -> f64 {
        (self.content_height - self.client_height).max(0.0)
    }

    /// Horizontal position as a fraction of the scrollable extent.
    pub fn horizontal_ratio(&self) -> f64 {
        let max = self.max_left();
        if max > 0.0 {
            (self.scroll_left / max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn set_left(&mut self, left: f64) {
        self.scroll_left = left.clamp(0.0, self.max_left());
    }

    fn set_top(&mut self, top: f64) {
        self.scroll_top = top.clamp(0.0, self.max_top());
    }
}

/// Pane identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Header,
    Body,
    RowLabels,
}

/// Work queued for the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameTask {
    /// Keep `anchor_time_ms` under the pointer at `cursor_x`.
    AnchorZoom { anchor_time_ms: i64, cursor_x: f64 },
    /// Copy the body's vertical scroll to the row-label pane.
    MirrorVertical,
}

/// Zoom level and scroll offsets for one timeline view.
pub struct ViewportController {
    config: LayoutConfig,
    range: DateRange,
    zoom: f64,
    header: ScrollPane,
    body: ScrollPane,
    row_labels: ScrollPane,
    pending: Vec<FrameTask>,
    suppress: Option<PaneId>,
    on_zoom_change: Option<Box<dyn FnMut(f64)>>,
}

impl fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("range", &self.range)
            .field("zoom", &self.zoom)
            .field("header", &self.header)
            .field("body", &self.body)
            .field("row_labels", &self.row_labels)
            .field("pending", &self.pending)
            .field("suppress", &self.suppress)
            .field("on_zoom_change", &self.on_zoom_change.is_some())
            .finish()
    }
}

impl ViewportController {
    /// Creates a controller at zoom 1.0 (or the minimum, if larger).
    pub fn new(config: LayoutConfig, range: DateRange, viewport_width: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(viewport_width.is_finite() && viewport_width > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "viewport_width",
                value: viewport_width,
            });
        }

        let pane = ScrollPane {
            client_width: viewport_width,
            ..Default::default()
        };
        let mut controller = Self {
            config,
            range,
            zoom: 1.0,
            header: pane,
            body: pane,
            row_labels: ScrollPane::default(),
            pending: Vec::new(),
            suppress: None,
            on_zoom_change: None,
        };
        controller.zoom = controller.clamp_zoom(1.0);
        controller.refresh_content_width();
        Ok(controller)
    }

    /// Registers the zoom-change callback.
    pub fn with_zoom_listener(mut self, listener: impl FnMut(f64) + 'static) -> Self {
        self.on_zoom_change = Some(Box::new(listener));
        self
    }

    /// Current zoom multiplier.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Visible range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Scale at the current zoom.
    pub fn px_per_hour(&self) -> f64 {
        px_per_hour(&self.range, self.zoom, &self.config)
    }

    /// Total scrollable width at the current zoom.
    pub fn content_width(&self) -> f64 {
        self.range.hours() * self.px_per_hour()
    }

    /// Lowest allowed zoom: the configured minimum, raised so 24 hours
    /// never get narrower than the body viewport at the current range's
    /// compression.
    pub fn min_zoom(&self) -> f64 {
        let day_px = FIT_HOURS * self.config.base_px_per_hour * range_factor(&self.range);
        let fit = self.body.client_width / day_px;
        self.config.min_zoom.max(fit).min(self.config.max_zoom)
    }

    /// State of a pane.
    pub fn pane(&self, id: PaneId) -> &ScrollPane {
        match id {
            PaneId::Header => &self.header,
            PaneId::Body => &self.body,
            PaneId::RowLabels => &self.row_labels,
        }
    }

    /// Updates a pane's client size.
    pub fn resize(&mut self, id: PaneId, client_width: f64, client_height: f64) {
        let pane = self.pane_mut(id);
        pane.client_width = client_width.max(0.0);
        pane.client_height = client_height.max(0.0);
        if id == PaneId::Body {
            self.zoom = self.clamp_zoom(self.zoom);
        }
        self.refresh_content_width();
    }

    /// Sets the height of the row area shared by the body and row labels.
    pub fn set_content_height(&mut self, height: f64) {
        self.body.content_height = height.max(0.0);
        self.row_labels.content_height = height.max(0.0);
        self.body.set_top(self.body.scroll_top);
        self.row_labels.set_top(self.row_labels.scroll_top);
    }

    /// Switches the visible range, scrolling back to its start.
    ///
    /// The zoom is re-clamped since the minimum depends on the range.
    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.pending.retain(|t| !matches!(t, FrameTask::AnchorZoom { .. }));
        self.suppress = None;
        let zoom = self.clamp_zoom(self.zoom);
        if (zoom - self.zoom).abs() >= 1e-12 {
            debug!(from = self.zoom, to = zoom, "zoom re-clamped for range");
            self.zoom = zoom;
            if let Some(listener) = self.on_zoom_change.as_mut() {
                listener(zoom);
            }
        }
        self.refresh_content_width();
        self.header.scroll_left = 0.0;
        self.body.scroll_left = 0.0;
    }

    /// Sets the zoom directly, keeping the instant at the viewport center.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let cursor_x = self.body.client_width / 2.0;
        self.apply_zoom(zoom, cursor_x)
    }

    /// Instant under a pointer at `cursor_x` (relative to the body viewport).
    ///
    /// Accounts for a queued anchor correction, so repeated zooms before a
    /// frame keep the same anchor.
    pub fn time_under_cursor(&self, cursor_x: f64) -> i64 {
        self.range
            .time_at_px(self.effective_scroll_left() + cursor_x, self.px_per_hour())
    }

    /// Handles a wheel event over the body.
    ///
    /// Without the zoom modifier the event is left to native scrolling and
    /// `false` is returned. Negative `delta_y` zooms in. Returns whether the
    /// zoom changed.
    pub fn zoom_at_cursor(&mut self, cursor_x: f64, delta_y: f64, modifier: bool) -> bool {
        if !modifier || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let target = if delta_y < 0.0 {
            self.zoom * self.config.zoom_step
        } else {
            self.zoom / self.config.zoom_step
        };
        self.apply_zoom(target, cursor_x)
    }

    /// Whether corrections are queued for the next frame.
    pub fn has_pending_frame(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies queued corrections. Call once the new scale is rendered.
    ///
    /// Returns the number of tasks applied.
    pub fn flush_frame(&mut self) -> usize {
        let tasks = std::mem::take(&mut self.pending);
        for task in &tasks {
            match *task {
                FrameTask::AnchorZoom { anchor_time_ms, cursor_x } => {
                    let left = self.anchored_left(anchor_time_ms, cursor_x);
                    self.scroll_body_to(left);
                    trace!(left, anchor_time_ms, "anchor applied");
                }
                FrameTask::MirrorVertical => {
                    self.row_labels.set_top(self.body.scroll_top);
                }
            }
        }
        tasks.len()
    }

    /// Handles a scroll event reported by the body pane.
    pub fn on_body_scroll(&mut self, scroll_left: f64, scroll_top: f64) {
        let top_changed = (self.body.scroll_top - scroll_top).abs() > f64::EPSILON;
        self.body.set_left(scroll_left);
        self.body.set_top(scroll_top);

        if top_changed && !self.pending.contains(&FrameTask::MirrorVertical) {
            self.pending.push(FrameTask::MirrorVertical);
        }
        if self.suppress == Some(PaneId::Body) {
            self.suppress = None;
            return;
        }
        let left = self.body.horizontal_ratio() * self.header.max_left();
        if (self.header.scroll_left - left).abs() > f64::EPSILON {
            self.header.set_left(left);
            self.suppress = Some(PaneId::Header);
        }
    }

    /// Handles a scroll event reported by the header pane.
    pub fn on_header_scroll(&mut self, scroll_left: f64) {
        self.header.set_left(scroll_left);
        if self.suppress == Some(PaneId::Header) {
            self.suppress = None;
            return;
        }
        let left = self.header.horizontal_ratio() * self.body.max_left();
        if (self.body.scroll_left - left).abs() > f64::EPSILON {
            self.body.set_left(left);
            self.suppress = Some(PaneId::Body);
        }
    }

    fn apply_zoom(&mut self, zoom: f64, cursor_x: f64) -> bool {
        let next = self.clamp_zoom(zoom);
        if (next - self.zoom).abs() < 1e-12 {
            return false;
        }
        let anchor_time_ms = self.time_under_cursor(cursor_x);
        debug!(from = self.zoom, to = next, anchor_time_ms, "zoom");

        self.zoom = next;
        self.refresh_content_width();
        self.pending.retain(|t| !matches!(t, FrameTask::AnchorZoom { .. }));
        self.pending.push(FrameTask::AnchorZoom { anchor_time_ms, cursor_x });

        if let Some(listener) = self.on_zoom_change.as_mut() {
            listener(next);
        }
        true
    }

    fn effective_scroll_left(&self) -> f64 {
        self.pending
            .iter()
            .find_map(|t| match *t {
                FrameTask::AnchorZoom { anchor_time_ms, cursor_x } => {
                    Some(self.anchored_left(anchor_time_ms, cursor_x))
                }
                FrameTask::MirrorVertical => None,
            })
            .unwrap_or(self.body.scroll_left)
    }

    fn anchored_left(&self, anchor_time_ms: i64, cursor_x: f64) -> f64 {
        let left = self.range.offset_px(anchor_time_ms, self.px_per_hour()) - cursor_x;
        left.clamp(0.0, self.body.max_left())
    }

    fn scroll_body_to(&mut self, left: f64) {
        self.body.set_left(left);
        let header_left = self.body.horizontal_ratio() * self.header.max_left();
        if (self.header.scroll_left - header_left).abs() > f64::EPSILON {
            self.header.set_left(header_left);
            self.suppress = Some(PaneId::Header);
        }
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if !zoom.is_finite() {
            return self.zoom;
        }
        zoom.clamp(self.min_zoom(), self.config.max_zoom)
    }

    fn refresh_content_width(&mut self) {
        let width = self.content_width();
        self.header.content_width = width;
        self.body.content_width = width;
        self.header.set_left(self.header.scroll_left);
        self.body.set_left(self.body.scroll_left);
    }

    fn pane_mut(&mut self, id: PaneId) -> &mut ScrollPane {
        match id {
            PaneId::Header => &mut self.header,
            PaneId::Body => &mut self.body,
            PaneId::RowLabels => &mut self.row_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DAY_MS, HOUR_MS};
    use std::cell::RefCell;
    use std::rc::Rc;

    // 2024-05-01T00:00:00Z
    const MAY_1: i64 = 1_714_521_600_000;

    fn day_controller() -> ViewportController {
        ViewportController::new(
            LayoutConfig::default(),
            DateRange::new(MAY_1, MAY_1 + DAY_MS),
            1200.0,
        )
        .unwrap()
    }

    fn ms_per_px(c: &ViewportController) -> f64 {
        HOUR_MS as f64 / c.px_per_hour()
    }

    #[test]
    fn test_initial_state() {
        let c = day_controller();
        assert_eq!(c.zoom(), 1.0);
        assert_eq!(c.px_per_hour(), 60.0);
        assert_eq!(c.pane(PaneId::Body).content_width, 1440.0);
        assert!((c.pane(PaneId::Body).max_left() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let range = DateRange::new(MAY_1, MAY_1 + DAY_MS);
        assert!(ViewportController::new(LayoutConfig::default(), range, 0.0).is_err());
        let bad = LayoutConfig::default().with_zoom_range(4.0, 2.0);
        assert!(ViewportController::new(bad, range, 800.0).is_err());
    }

    #[test]
    fn test_min_zoom_fits_a_day() {
        let c = day_controller();
        // 1200 / (24 × 60)
        assert!((c.min_zoom() - 1200.0 / 1440.0).abs() < 1e-12);

        let mut c = day_controller();
        assert!(c.set_zoom(0.1));
        assert!((c.zoom() - c.min_zoom()).abs() < 1e-12);
        assert!(c.pane(PaneId::Body).content_width >= 1200.0 - 1e-9);
    }

    #[test]
    fn test_zoom_clamped_to_max() {
        let mut c = day_controller();
        assert!(c.set_zoom(100.0));
        assert_eq!(c.zoom(), 8.0);
        assert!(!c.zoom_at_cursor(600.0, -1.0, true));
    }

    #[test]
    fn test_zoom_in_keeps_instant_under_cursor() {
        let mut c = day_controller();
        let before = c.time_under_cursor(600.0);
        assert_eq!(before, MAY_1 + 10 * HOUR_MS);

        assert!(c.zoom_at_cursor(600.0, -120.0, true));
        assert!((c.zoom() - 1.1).abs() < 1e-12);
        assert!(c.has_pending_frame());

        // the body has not moved until the frame is flushed
        assert_eq!(c.pane(PaneId::Body).scroll_left, 0.0);
        assert_eq!(c.flush_frame(), 1);
        assert!(!c.has_pending_frame());

        let after = c.time_under_cursor(600.0);
        assert!(((after - before) as f64).abs() <= ms_per_px(&c));
        assert!((c.pane(PaneId::Body).scroll_left - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_zoom_before_frame_keeps_anchor() {
        let mut c = day_controller();
        c.on_body_scroll(100.0, 0.0);
        let before = c.time_under_cursor(300.0);
        for _ in 0..5 {
            assert!(c.zoom_at_cursor(300.0, -1.0, true));
        }
        assert_eq!(c.flush_frame(), 1);
        let after = c.time_under_cursor(300.0);
        assert!(((after - before) as f64).abs() <= ms_per_px(&c));
    }

    #[test]
    fn test_zoom_out_anchor() {
        let mut c = day_controller();
        c.set_zoom(4.0);
        c.flush_frame();
        c.on_body_scroll(2000.0, 0.0);
        let before = c.time_under_cursor(450.0);
        assert!(c.zoom_at_cursor(450.0, 3.0, true));
        c.flush_frame();
        let after = c.time_under_cursor(450.0);
        assert!(((after - before) as f64).abs() <= ms_per_px(&c));
    }

    #[test]
    fn test_wheel_without_modifier_is_ignored() {
        let mut c = day_controller();
        assert!(!c.zoom_at_cursor(600.0, -1.0, false));
        assert!(!c.zoom_at_cursor(600.0, 0.0, true));
        assert_eq!(c.zoom(), 1.0);
        assert!(!c.has_pending_frame());
    }

    #[test]
    fn test_zoom_listener() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut c = day_controller().with_zoom_listener(move |z| sink.borrow_mut().push(z));

        c.zoom_at_cursor(0.0, -1.0, true);
        c.set_zoom(2.0);
        c.set_zoom(2.0);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], 2.0);
    }

    #[test]
    fn test_body_scroll_syncs_header_proportionally() {
        let mut c = day_controller();
        c.resize(PaneId::Header, 1000.0, 40.0);

        c.on_body_scroll(120.0, 0.0);
        // body: 120 / 240 = 0.5 → header: 0.5 × (1440 - 1000)
        assert!((c.pane(PaneId::Header).scroll_left - 220.0).abs() < 1e-9);

        // the echo from the header is swallowed
        c.on_header_scroll(220.0);
        assert!((c.pane(PaneId::Body).scroll_left - 120.0).abs() < 1e-9);

        // a real header scroll drives the body
        c.on_header_scroll(440.0);
        assert!((c.pane(PaneId::Body).scroll_left - 240.0).abs() < 1e-9);
        c.on_body_scroll(240.0, 0.0);
        assert!((c.pane(PaneId::Header).scroll_left - 440.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_mirror_deferred() {
        let mut c = day_controller();
        c.resize(PaneId::Body, 1200.0, 300.0);
        c.resize(PaneId::RowLabels, 200.0, 300.0);
        c.set_content_height(1000.0);

        c.on_body_scroll(0.0, 150.0);
        c.on_body_scroll(0.0, 180.0);
        assert_eq!(c.pane(PaneId::RowLabels).scroll_top, 0.0);
        assert_eq!(c.flush_frame(), 1);
        assert_eq!(c.pane(PaneId::RowLabels).scroll_top, 180.0);
        // horizontal offsets of the label pane never move
        assert_eq!(c.pane(PaneId::RowLabels).scroll_left, 0.0);
    }

    #[test]
    fn test_set_range_resets_scroll() {
        let mut c = day_controller();
        c.on_body_scroll(200.0, 0.0);
        c.zoom_at_cursor(600.0, -1.0, true);
        c.set_range(DateRange::new(MAY_1, MAY_1 + 2 * DAY_MS));
        assert!(!c.has_pending_frame());
        assert_eq!(c.pane(PaneId::Body).scroll_left, 0.0);
        // zoom 1.1 is below the two-day minimum of 1200 / (24 × 60 × 0.5)
        assert!((c.zoom() - 1200.0 / 720.0).abs() < 1e-12);
        assert!((c.content_width() - 2400.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_zoom_fits_a_day_on_long_ranges() {
        let mut c = ViewportController::new(
            LayoutConfig::default(),
            DateRange::new(MAY_1, MAY_1 + 2 * DAY_MS),
            1200.0,
        )
        .unwrap();
        c.set_zoom(0.1);
        // 24 rendered hours span the whole viewport
        assert!((24.0 * c.px_per_hour() - 1200.0).abs() < 1e-6);
        assert!((c.zoom() - c.min_zoom()).abs() < 1e-12);
    }
}
