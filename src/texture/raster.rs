//! Procedural bitmaps for the ring and disc layers.
//!
//! Output is straight-alpha RGBA8, row-major, tightly packed. Pixel distances are measured from
//! pixel corners to the bitmap center (`size / 2`), and edges are anti-aliased with a
//! one-pixel smoothstep band.

use crate::foundation::core::ColorArgb;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::foundation::math::smoothstep;

/// Largest edge length the rasterizer will produce.
pub const MAX_BITMAP_EDGE: u32 = 8192;

const EDGE_PX: f32 = 1.0;

/// Host-side bitmap awaiting upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes.
    pub data: Vec<u8>,
}

impl RgbaBitmap {
    fn transparent(edge: u32) -> OverlayResult<Self> {
        if edge == 0 {
            return Err(OverlayError::texture("bitmap edge must be > 0"));
        }
        if edge > MAX_BITMAP_EDGE {
            return Err(OverlayError::texture(format!(
                "bitmap edge {edge} exceeds {MAX_BITMAP_EDGE}"
            )));
        }
        let len = (edge as usize) * (edge as usize) * 4;
        Ok(Self {
            width: edge,
            height: edge,
            data: vec![0u8; len],
        })
    }

    /// RGBA bytes at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    fn put(&mut self, x: u32, y: u32, color: ColorArgb, a: u8) {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[i] = color.r();
        self.data[i + 1] = color.g();
        self.data[i + 2] = color.b();
        self.data[i + 3] = a;
    }

    fn for_each_distance(&mut self, mut f: impl FnMut(&mut Self, u32, u32, f32)) {
        let center = self.width as f32 / 2.0;
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                f(self, x, y, (dx * dx + dy * dy).sqrt());
            }
        }
    }
}

fn alpha_byte(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0) as u8
}

/// Anti-aliased ring: inner radius `radius`, band width `thickness`.
///
/// Edge length is `2 * (radius + thickness)`.
pub fn ring_rgba8(
    radius: u32,
    thickness: u32,
    color: ColorArgb,
    alpha: f32,
) -> OverlayResult<RgbaBitmap> {
    let edge = radius
        .checked_add(thickness)
        .and_then(|v| v.checked_mul(2))
        .ok_or_else(|| OverlayError::texture("ring size overflows"))?;
    let mut bmp = RgbaBitmap::transparent(edge)?;

    let inner = radius as f32;
    let outer = (radius + thickness) as f32;
    let a = alpha_byte(alpha);

    bmp.for_each_distance(|bmp, x, y, d| {
        if d < inner - EDGE_PX || d > outer + EDGE_PX {
            return;
        }
        let fade_in = smoothstep(inner, inner + EDGE_PX, d);
        let fade_out = smoothstep(outer - EDGE_PX, outer, d);
        let mul = fade_in * (1.0 - fade_out);
        bmp.put(x, y, color, (f32::from(a) * mul) as u8);
    });
    Ok(bmp)
}

/// Anti-aliased filled disc of the given radius. Edge length is `2 * radius`.
pub fn disc_rgba8(radius: u32, color: ColorArgb, alpha: f32) -> OverlayResult<RgbaBitmap> {
    let edge = radius
        .checked_mul(2)
        .ok_or_else(|| OverlayError::texture("disc size overflows"))?;
    let mut bmp = RgbaBitmap::transparent(edge)?;

    let r = radius as f32;
    let a = alpha_byte(alpha);

    bmp.for_each_distance(|bmp, x, y, d| {
        if d > r + EDGE_PX {
            return;
        }
        let mul = if d > r - EDGE_PX {
            smoothstep(r, r - EDGE_PX, d)
        } else {
            1.0
        };
        bmp.put(x, y, color, (f32::from(a) * mul) as u8);
    });
    Ok(bmp)
}

/// A single opaque white pixel, used as the mask for tinted solid quads.
pub fn white_pixel() -> RgbaBitmap {
    RgbaBitmap {
        width: 1,
        height: 1,
        data: vec![255, 255, 255, 255],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/raster.rs"]
mod tests;
