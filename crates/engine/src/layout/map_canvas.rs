//! Map viewport transform
//!
//! The map view keeps one pan/zoom transform per session; marker coordinates
//! stay in map pixel space and only the viewport moves. Converting a cursor
//! position back into map space inverts the pan first, then the scale.

/// Multiplicative zoom step per wheel notch or button press.
pub const ZOOM_STEP: f64 = 1.2;
pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 5.0;

/// Pan/zoom state of the map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl CanvasTransform {
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * ZOOM_STEP).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / ZOOM_STEP).max(MIN_SCALE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Convert a viewport position into map pixel space, used when dropping
    /// a marker at the cursor.
    pub fn screen_to_map(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }
}
