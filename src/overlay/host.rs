use crate::foundation::core::{Point, Rect, Timestamp};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::texture::raster::{MAX_BITMAP_EDGE, RgbaBitmap};
use anyhow::Context;
use std::path::Path;

/// Pointer and display queries provided by the host.
pub trait PointerHost {
    /// Current global pointer position, or `None` if it cannot be read this tick.
    fn current_pointer_position(&self) -> Option<Point>;

    /// Bounds of the display containing `pointer` in global desktop coordinates.
    fn active_display_bounds(&self, pointer: Point) -> Option<Rect>;
}

/// Everything one tick needs from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Pointer position; `None` skips the tick.
    pub pointer: Option<Point>,
    /// Active display bounds (coordinate mode).
    pub display: Option<Rect>,
    /// Seconds since the previous tick.
    pub elapsed_secs: f64,
    /// Monotonic clock reading.
    pub now: Timestamp,
}

impl TickInput {
    /// Query `host` for the pointer and the display under it.
    pub fn from_host(host: &dyn PointerHost, elapsed_secs: f64, now: Timestamp) -> Self {
        let pointer = host.current_pointer_position();
        let display = pointer.and_then(|p| host.active_display_bounds(p));
        Self {
            pointer,
            display,
            elapsed_secs,
            now,
        }
    }
}

/// Decoded straight-alpha RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes.
    pub rgba: Vec<u8>,
}

impl From<DecodedImage> for RgbaBitmap {
    fn from(img: DecodedImage) -> Self {
        RgbaBitmap {
            width: img.width,
            height: img.height,
            data: img.rgba,
        }
    }
}

/// Loads the custom crosshair image.
pub trait ImageDecoder: Send + Sync {
    /// Decode the image at `path`.
    fn decode(&self, path: &Path) -> OverlayResult<DecodedImage>;
}

/// [`ImageDecoder`] reading from the filesystem with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageDecoder;

impl ImageDecoder for FsImageDecoder {
    fn decode(&self, path: &Path) -> OverlayResult<DecodedImage> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        decode_image(&bytes)
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) to straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> OverlayResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(OverlayError::image("decoded image is empty"));
    }
    if width > MAX_BITMAP_EDGE || height > MAX_BITMAP_EDGE {
        return Err(OverlayError::image(format!(
            "image {width}x{height} exceeds {MAX_BITMAP_EDGE}px"
        )));
    }
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/host.rs"]
mod tests;
