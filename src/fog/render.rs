use crate::fog::composite::{Rgba, RgbaBuffer};
use crate::fog::model::Stroke;
use crate::fog::settings::FogSettings;
use crate::fog::transform::{Point, ViewportParams};

/// Pixel-aligned rectangle in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

// Far beyond any surface size, small enough that edge arithmetic cannot
// saturate.
const MAX_EXTENT: f64 = (1u64 << 40) as f64;

impl PixelRect {
    pub fn around_circle(center: Point, radius: f64) -> Self {
        let edge = |v: f64| v.clamp(-MAX_EXTENT, MAX_EXTENT);
        let x0 = edge((center.x - radius).floor()) as i64;
        let y0 = edge((center.y - radius).floor()) as i64;
        let x1 = edge((center.x + radius).ceil()) as i64;
        let y1 = edge((center.y + radius).ceil()) as i64;
        Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0).max(1),
            height: y1.saturating_sub(y0).max(1),
        }
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<PixelRect> {
        let max_w = width as i64;
        let max_h = height as i64;
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.x.saturating_add(self.width).clamp(0, max_w);
        let y1 = self.y.saturating_add(self.height).clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Colour of unexplored areas, also painted back by erase strokes.
    pub veil: Rgba,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&FogSettings::default())
    }
}

impl From<&FogSettings> for RenderSettings {
    fn from(settings: &FogSettings) -> Self {
        Self {
            veil: settings.veil_rgba(),
        }
    }
}

/// Replays every stroke over a fresh veil. Same inputs, same pixels.
pub fn render_frame(
    strokes: &[Stroke],
    params: &ViewportParams,
    settings: RenderSettings,
) -> RgbaBuffer {
    let mut frame = RgbaBuffer::new(params.width, params.height, Rgba::TRANSPARENT);
    paint_frame(&mut frame, strokes, params, settings);
    frame
}

fn paint_frame(
    frame: &mut RgbaBuffer,
    strokes: &[Stroke],
    params: &ViewportParams,
    settings: RenderSettings,
) {
    frame.fill(Rgba::TRANSPARENT);
    frame.fill(settings.veil);
    for stroke in strokes {
        stamp_stroke(frame, stroke, params, settings);
    }
}

/// Reveal cuts the circle to transparent, erase paints the veil back.
/// Returns the touched area, if any of it is on screen.
pub fn stamp_stroke(
    frame: &mut RgbaBuffer,
    stroke: &Stroke,
    params: &ViewportParams,
    settings: RenderSettings,
) -> Option<PixelRect> {
    let center = params.to_viewport_space(stroke.center());
    let radius = params.radius_to_viewport(stroke.radius);
    let color = if stroke.erase {
        settings.veil
    } else {
        Rgba::TRANSPARENT
    };
    fill_circle(frame, center, radius, color)
}

// A pixel belongs to the circle when its centre does.
fn fill_circle(
    frame: &mut RgbaBuffer,
    center: Point,
    radius: f64,
    color: Rgba,
) -> Option<PixelRect> {
    if radius.is_nan() || radius <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
        return None;
    }
    let bounds = PixelRect::around_circle(center, radius).clamp(frame.width, frame.height)?;

    let color = color.to_array();
    let row_len = frame.width as usize;
    let radius_sq = radius * radius;
    let last_x = bounds.x + bounds.width - 1;

    for y in bounds.y..(bounds.y + bounds.height) {
        let dy = y as f64 + 0.5 - center.y;
        let span_sq = radius_sq - dy * dy;
        if span_sq < 0.0 {
            continue;
        }
        let half = span_sq.sqrt();
        let x0 = ((center.x - half - 0.5).ceil() as i64).max(bounds.x);
        let x1 = ((center.x + half - 0.5).floor() as i64).min(last_x);
        if x0 > x1 {
            continue;
        }
        let row_base = y as usize * row_len;
        for x in x0..=x1 {
            let idx = (row_base + x as usize) * 4;
            frame.pixels[idx..idx + 4].copy_from_slice(&color);
        }
    }
    Some(bounds)
}

/// Holds the rendering surface between frames so it is only reallocated when
/// the viewport is resized.
#[derive(Debug, Default)]
pub struct FogRenderer {
    frame: RgbaBuffer,
    last_params: Option<ViewportParams>,
    last_settings: Option<RenderSettings>,
    #[cfg(test)]
    allocation_count: usize,
}

impl FogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_size(&mut self, size: (u32, u32)) {
        if self.frame.size() != size {
            self.frame = RgbaBuffer::new(size.0, size.1, Rgba::TRANSPARENT);
            self.last_params = None;
            #[cfg(test)]
            {
                self.allocation_count += 1;
            }
        }
    }

    pub fn render(
        &mut self,
        strokes: &[Stroke],
        params: &ViewportParams,
        settings: RenderSettings,
    ) -> &RgbaBuffer {
        self.ensure_size(params.size());
        paint_frame(&mut self.frame, strokes, params, settings);
        self.last_params = Some(*params);
        self.last_settings = Some(settings);
        &self.frame
    }

    /// Whether the cached frame was produced for exactly these inputs, so a
    /// newly appended stroke can be stamped without a full replay.
    pub fn is_current(&self, params: &ViewportParams, settings: RenderSettings) -> bool {
        self.last_params.as_ref() == Some(params) && self.last_settings == Some(settings)
    }

    /// Stamps one stroke onto the cached frame. Every stamp overwrites what
    /// it covers, so this matches a full replay of the extended history.
    pub fn apply_stroke(
        &mut self,
        stroke: &Stroke,
        params: &ViewportParams,
        settings: RenderSettings,
    ) -> Option<PixelRect> {
        debug_assert!(self.is_current(params, settings));
        stamp_stroke(&mut self.frame, stroke, params, settings)
    }

    pub fn frame(&self) -> &RgbaBuffer {
        &self.frame
    }

    #[cfg(test)]
    pub fn allocation_count(&self) -> usize {
        self.allocation_count
    }
}
