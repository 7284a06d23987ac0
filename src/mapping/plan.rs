//! 2D floor-plan projection.
//!
//! Floor-local rectangles map to screen space as `p · zoom + pan`. Zoom stays
//! within the configured bounds for any sequence of wheel input. Dragging pans
//! only while the pointer button is held; release or leave always ends it.

use crate::config::PlanConfig;
use crate::geom::rect::Rect;
use crate::model::floor::Floor;
use crate::model::room::Room;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    zoom: f64,
    pan: (f64, f64),
    /// Last pointer position while the button is held.
    drag_anchor: Option<(f64, f64)>,
    config: PlanConfig,
}

impl Default for PlanView {
    fn default() -> Self {
        Self::new(PlanConfig::default())
    }
}

impl PlanView {
    pub fn new(config: PlanConfig) -> Self {
        Self {
            zoom: 1.0,
            pan: (0.0, 0.0),
            drag_anchor: None,
            config,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Sets the zoom factor, clamped to `[zoom_min, zoom_max]`. Non-finite input is ignored.
    ///
    /// Inverted bounds never panic: the upper bound wins.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            let clamped = zoom.max(self.config.zoom_min).min(self.config.zoom_max);
            if clamped.is_finite() {
                self.zoom = clamped;
            }
        }
    }

    /// Applies one wheel event. Positive delta (scrolling down) zooms out.
    pub fn zoom_by(&mut self, wheel_delta: f64) {
        self.set_zoom(self.zoom - wheel_delta * self.config.wheel_sensitivity);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pan = (x, y);
        }
    }

    /// Maps a floor-local rectangle to screen space.
    pub fn project(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x * self.zoom + self.pan.0,
            rect.y * self.zoom + self.pan.1,
            rect.width * self.zoom,
            rect.height * self.zoom,
        )
    }

    /// Maps a screen point back to floor-local coordinates.
    pub fn unproject(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.pan.0) / self.zoom, (sy - self.pan.1) / self.zoom)
    }

    /// Screen rectangle of the whole floor footprint.
    pub fn floor_rect(&self, floor: &Floor) -> Rect {
        self.project(&Rect::new(0., 0., floor.width, floor.height))
    }

    /// Room under a screen point.
    pub fn room_at<'a>(&self, floor: &'a Floor, sx: f64, sy: f64) -> Option<&'a Room> {
        let (x, y) = self.unproject(sx, sy);
        floor.room_at(x, y)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag_anchor = Some((x, y));
    }

    /// Pans by the pointer movement while dragging. Returns `true` if the view moved.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let Some((ax, ay)) = self.drag_anchor else {
            return false;
        };
        let (dx, dy) = (x - ax, y - ay);
        if !(dx.is_finite() && dy.is_finite()) {
            return false;
        }
        self.pan = (self.pan.0 + dx, self.pan.1 + dy);
        self.drag_anchor = Some((x, y));
        dx != 0.0 || dy != 0.0
    }

    pub fn pointer_up(&mut self) {
        self.drag_anchor = None;
    }

    pub fn pointer_leave(&mut self) {
        self.drag_anchor = None;
    }

    /// Resets zoom and centers the floor footprint in a `width × height` viewport.
    pub fn recenter(&mut self, floor: &Floor, viewport: (f64, f64)) {
        self.zoom = 1.0;
        self.drag_anchor = None;
        self.pan = (
            (viewport.0 - floor.width) * 0.5,
            (viewport.1 - floor.height) * 0.5,
        );
    }
}
