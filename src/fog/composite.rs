use crate::fog::transform::{Point, ViewportParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Row-major, straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RgbaBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaBuffer {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let mut buffer = Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        };
        buffer.fill(fill);
        buffer
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn fill(&mut self, color: Rgba) {
        let color = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Rgba {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }

    /// True when the fog is fully cut away at this pixel.
    pub fn is_revealed(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).a == 0
    }

    pub fn revealed_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] == 0).count()
    }
}

/// Lays the fog surface over the base map with source-over blending.
pub fn composite_fog_over_map(map: &RgbaBuffer, fog: &RgbaBuffer) -> RgbaBuffer {
    assert_eq!(map.size(), fog.size());

    let mut output = map.clone();
    for (dst, src) in output
        .pixels
        .chunks_exact_mut(4)
        .zip(fog.pixels.chunks_exact(4))
    {
        let blended = blend_pixel(
            Rgba::rgba(dst[0], dst[1], dst[2], dst[3]),
            Rgba::rgba(src[0], src[1], src[2], src[3]),
        );
        dst.copy_from_slice(&blended.to_array());
    }
    output
}

/// Nearest-neighbour view of a full-size map image through the viewport.
/// Viewport pixels outside the image stay transparent.
pub fn project_map(map: &RgbaBuffer, params: &ViewportParams) -> RgbaBuffer {
    let mut output = RgbaBuffer::new(params.width, params.height, Rgba::TRANSPARENT);
    for y in 0..params.height {
        for x in 0..params.width {
            let image = params.to_image_space(Point::new(x as f64 + 0.5, y as f64 + 0.5));
            let (ix, iy) = (image.x.floor(), image.y.floor());
            if ix < 0.0 || iy < 0.0 || ix >= map.width as f64 || iy >= map.height as f64 {
                continue;
            }
            let src = map.pixel(ix as u32, iy as u32).to_array();
            let idx = ((y as usize) * (params.width as usize) + x as usize) * 4;
            output.pixels[idx..idx + 4].copy_from_slice(&src);
        }
    }
    output
}

fn blend_pixel(bottom: Rgba, top: Rgba) -> Rgba {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Rgba::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}
