//! Viewport bounds and the zoom/bounce state machine.
//!
//! The controller owns the visible complex-plane rectangle and drives a
//! smoothed zoom toward a fixed focal point. The zoom direction oscillates:
//! when the progress counter reaches `zoom_duration` the sign flips and the
//! counter resets, bouncing between zoom-in and zoom-out forever. The
//! recentering math keeps the focal point at the same fractional offset
//! inside the bounds, so the zoom never drifts visibly.

/// Fraction of the visible range moved per pan event.
pub const PAN_STEP: f64 = 0.01;

/// The visible rectangle of the complex plane.
///
/// Invariant: `x_max > x_min` and `y_max > y_min`. Pan preserves both
/// ranges and zoom scales them by a strictly positive factor, so a
/// degenerate viewport is a programming error, not a runtime condition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        debug_assert!(x_max > x_min && y_max > y_min, "degenerate viewport");
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Shift the bounds by a fraction of the current ranges.
    pub fn pan(&mut self, dx_frac: f64, dy_frac: f64) {
        let dx = dx_frac * self.width();
        let dy = dy_frac * self.height();
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
    }
}

/// Zoom state machine driving the viewport each tick.
#[derive(Clone, Copy, Debug)]
pub struct ViewportController {
    viewport: Viewport,
    /// Base per-tick shrink ratio; < 1 zooms in, > 1 zooms out.
    zoom_factor: f64,
    /// `1 - zoom_factor`, the oscillation depth.
    zoom_speed: f64,
    zoom_sign: f64,
    zoom_position: (f64, f64),
    zoom_duration: u32,
    zoom_iteration: u32,
    current_zoom: f64,
}

impl ViewportController {
    pub fn new(
        viewport: Viewport,
        zoom_factor: f64,
        zoom_position: (f64, f64),
        zoom_duration: u32,
    ) -> Self {
        debug_assert!(zoom_factor > 0.0, "zoom factor must be positive");
        debug_assert!(zoom_duration > 0, "zoom duration must be positive");
        Self {
            viewport,
            zoom_factor,
            zoom_speed: 1.0 - zoom_factor,
            zoom_sign: 1.0,
            zoom_position,
            zoom_duration,
            zoom_iteration: 0,
            current_zoom: 1.0,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom_iteration(&self) -> u32 {
        self.zoom_iteration
    }

    pub fn zoom_sign(&self) -> f64 {
        self.zoom_sign
    }

    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    pub fn zoom_position(&self) -> (f64, f64) {
        self.zoom_position
    }

    /// Fractional offset of the focal point within the current bounds.
    pub fn focal_offset(&self) -> (f64, f64) {
        let (px, py) = self.zoom_position;
        (
            (px - self.viewport.x_min) / self.viewport.width(),
            (py - self.viewport.y_min) / self.viewport.height(),
        )
    }

    /// Shift the view by pan fractions of the visible range.
    pub fn pan(&mut self, dx_frac: f64, dy_frac: f64) {
        self.viewport.pan(dx_frac, dy_frac);
    }

    /// Advance the zoom by one tick.
    ///
    /// At the half-cycle boundary the direction flips and the counter
    /// resets; otherwise the zoom ratio is smoothed toward an oscillating
    /// target and the bounds are recentered around the focal point.
    pub fn tick(&mut self) {
        if self.zoom_iteration >= self.zoom_duration {
            self.zoom_sign = -self.zoom_sign;
            self.zoom_iteration = 0;
            return;
        }

        // The target ratio ramps over the half-cycle: deepest zoom-in at the
        // start of the inward phase, strengthening zoom-out over the outward
        // phase.
        let progress = if self.zoom_sign > 0.0 {
            (self.zoom_duration - self.zoom_iteration) as f64
        } else {
            self.zoom_iteration as f64
        };
        let target =
            1.0 - self.zoom_sign * self.zoom_speed * progress / self.zoom_duration as f64;
        let t = self.zoom_iteration as f64 / self.zoom_duration as f64;
        self.current_zoom += (target - self.current_zoom) * t;
        self.zoom_iteration += 1;

        if self.current_zoom != 1.0 {
            self.apply_zoom();
        }
    }

    /// Scale the bounds by `current_zoom` around the focal point, keeping
    /// its fractional offset constant.
    fn apply_zoom(&mut self) {
        let (px, py) = self.zoom_position;
        let (zoom_x, zoom_y) = self.focal_offset();

        let range_x = self.viewport.width() * self.current_zoom;
        let range_y = self.viewport.height() * self.current_zoom;

        self.viewport.x_min = px - range_x * zoom_x;
        self.viewport.x_max = px + range_x * (1.0 - zoom_x);
        self.viewport.y_min = py - range_y * zoom_y;
        self.viewport.y_max = py + range_y * (1.0 - zoom_y);

        debug_assert!(
            self.viewport.width() > 0.0 && self.viewport.height() > 0.0,
            "zoom produced a degenerate viewport"
        );
    }
}
