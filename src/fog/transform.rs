//! Conversion between image space (fixed pixels of the map asset) and
//! viewport space (on-screen pixels that move with pan and zoom).

/// Zoom limits of the base map, in log2 steps.
pub const MIN_ZOOM: f64 = -2.0;
pub const MAX_ZOOM: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Notification from the base map component after a pan, zoom or resize.
///
/// `pan_x`/`pan_y` is where the image origin currently sits on screen, in
/// viewport pixels. `zoom_factor` is viewport pixels per image pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportChange {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom_factor: f64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportParams {
    /// Image-space point under the viewport's top-left corner.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Image pixels per viewport pixel (inverse of the zoom factor).
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

impl ViewportParams {
    pub const fn new(origin: Point, scale: f64, size: (u32, u32)) -> Self {
        Self {
            origin_x: origin.x,
            origin_y: origin.y,
            scale,
            width: size.0,
            height: size.1,
        }
    }

    pub const fn identity(size: (u32, u32)) -> Self {
        Self::new(Point::ORIGIN, 1.0, size)
    }

    /// Parameters for a log2 zoom level, where zoom 0 shows one image pixel
    /// per viewport pixel and every step doubles the magnification.
    pub fn from_zoom(origin: Point, zoom: f64, size: (u32, u32)) -> Self {
        Self::new(origin, (-zoom).exp2(), size)
    }

    /// A zoom factor that is not a finite positive number, or one whose
    /// inverse overflows, falls back to zoom 0. Non-finite pan offsets count
    /// as 0.
    pub fn from_map_change(change: ViewportChange) -> Self {
        let scale = match change.zoom_factor.recip() {
            scale if change.zoom_factor > 0.0 && scale.is_finite() && scale > 0.0 => scale,
            _ => {
                tracing::warn!(zoom_factor = change.zoom_factor, "unusable map zoom factor, using 1");
                1.0
            }
        };
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            origin_x: -finite_or_zero(change.pan_x) * scale,
            origin_y: -finite_or_zero(change.pan_y) * scale,
            scale,
            width: change.width,
            height: change.height,
        }
    }

    /// Largest whole zoom level (within the map's limits) at which the whole
    /// image fits the viewport, with the image centred.
    pub fn fit_image(image_size: (f64, f64), viewport_size: (u32, u32)) -> Self {
        let (image_w, image_h) = image_size;
        let view_w = viewport_size.0 as f64;
        let view_h = viewport_size.1 as f64;
        let ratio = (view_w / image_w).min(view_h / image_h);
        let zoom = if ratio.is_finite() && ratio > 0.0 {
            ratio.log2().floor().clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            0.0
        };
        let scale = (-zoom).exp2();
        let origin = Point::new(
            image_w / 2.0 - view_w * scale / 2.0,
            image_h / 2.0 - view_h * scale / 2.0,
        );
        Self::new(origin, scale, viewport_size)
    }

    pub fn zoom(&self) -> f64 {
        -self.scale.log2()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn to_image_space(&self, viewport: Point) -> Point {
        Point {
            x: self.origin_x + viewport.x * self.scale,
            y: self.origin_y + viewport.y * self.scale,
        }
    }

    pub fn to_viewport_space(&self, image: Point) -> Point {
        Point {
            x: (image.x - self.origin_x) / self.scale,
            y: (image.y - self.origin_y) / self.scale,
        }
    }

    pub fn radius_to_viewport(&self, radius: f64) -> f64 {
        radius / self.scale
    }

    pub fn radius_to_image(&self, radius: f64) -> f64 {
        radius * self.scale
    }

    /// Zoom to `zoom` (clamped to the map limits) while keeping the image
    /// point under `anchor` in place.
    pub fn zoom_at(&self, anchor: Point, zoom: f64) -> Self {
        let pinned = self.to_image_space(anchor);
        let scale = (-zoom.clamp(MIN_ZOOM, MAX_ZOOM)).exp2();
        Self {
            origin_x: pinned.x - anchor.x * scale,
            origin_y: pinned.y - anchor.y * scale,
            scale,
            ..*self
        }
    }

    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            origin_x: self.origin_x - dx * self.scale,
            origin_y: self.origin_y - dy * self.scale,
            ..*self
        }
    }

    pub fn resized(&self, size: (u32, u32)) -> Self {
        Self {
            width: size.0,
            height: size.1,
            ..*self
        }
    }

    pub fn contains(&self, viewport: Point) -> bool {
        viewport.x >= 0.0
            && viewport.y >= 0.0
            && viewport.x < self.width as f64
            && viewport.y < self.height as f64
    }
}
