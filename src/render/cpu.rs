use crate::foundation::core::{Affine, ColorArgb, Vec2};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::render::backend::{BlendFactor, Graphics, TextureHandle};
use std::collections::HashMap;
use std::sync::Arc;

/// A rendered overlay frame as RGBA8 pixels.
///
/// Frames read back from [`CpuGraphics`] are premultiplied alpha; `premultiplied` makes this
/// explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
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

    /// Convert to straight alpha in place (for PNG output).
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }
}

struct CpuTexture {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

/// Reference [`Graphics`] backend rasterizing with `vello_cpu`.
///
/// Usage per frame: [`CpuGraphics::begin_frame`], draw, [`CpuGraphics::finish_frame`]. Draw
/// calls outside a frame are dropped.
pub struct CpuGraphics {
    ctx: Option<vello_cpu::RenderContext>,
    in_frame: bool,
    textures: HashMap<u64, CpuTexture>,
    next_id: u64,
    transform: Affine,
    transform_stack: Vec<Affine>,
    blend: (BlendFactor, BlendFactor),
    blend_stack: Vec<(BlendFactor, BlendFactor)>,
    depth: u32,
}

impl Default for CpuGraphics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CpuGraphics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuGraphics")
            .field("in_frame", &self.in_frame)
            .field("textures", &self.textures.len())
            .field("depth", &self.depth)
            .finish()
    }
}

impl CpuGraphics {
    /// Backend with no live textures.
    pub fn new() -> Self {
        Self {
            ctx: None,
            in_frame: false,
            textures: HashMap::new(),
            next_id: 1,
            transform: Affine::IDENTITY,
            transform_stack: Vec::new(),
            blend: (BlendFactor::SrcAlpha, BlendFactor::InvSrcAlpha),
            blend_stack: Vec::new(),
            depth: 0,
        }
    }

    /// Number of live textures.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Start a transparent `width x height` frame.
    pub fn begin_frame(&mut self, width: u32, height: u32) -> OverlayResult<()> {
        let w = frame_dim(width, "width")?;
        let h = frame_dim(height, "height")?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        self.ctx = Some(ctx);
        self.in_frame = true;
        self.transform = Affine::IDENTITY;
        self.transform_stack.clear();
        self.blend = (BlendFactor::SrcAlpha, BlendFactor::InvSrcAlpha);
        self.blend_stack.clear();
        Ok(())
    }

    /// Rasterize the frame's draw calls and read back premultiplied RGBA8.
    pub fn finish_frame(&mut self) -> OverlayResult<FrameRGBA> {
        if !self.in_frame {
            return Err(OverlayError::backend("finish_frame without begin_frame"));
        }
        self.in_frame = false;
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| OverlayError::backend("cpu render context missing"))?;
        if !self.transform_stack.is_empty() || !self.blend_stack.is_empty() {
            tracing::warn!(
                transforms = self.transform_stack.len(),
                blends = self.blend_stack.len(),
                "unbalanced state stacks at end of frame"
            );
        }

        let (w, h) = (ctx.width(), ctx.height());
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn frame_ctx(&mut self) -> Option<&mut vello_cpu::RenderContext> {
        if !self.in_frame {
            tracing::trace!("draw outside begin_frame/finish_frame dropped");
            return None;
        }
        self.ctx.as_mut()
    }
}

impl Graphics for CpuGraphics {
    fn enter(&mut self) {
        self.depth += 1;
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureHandle> {
        if self.depth == 0 {
            tracing::warn!("create_texture outside enter/leave");
        }
        let mut bytes = rgba.to_vec();
        premultiply_rgba8_in_place(&mut bytes);
        let pixmap = match pixmap_from_premul_bytes(&bytes, width, height) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(error = %err, "cpu texture upload failed");
                return None;
            }
        };
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let id = self.next_id;
        self.next_id += 1;
        self.textures.insert(
            id,
            CpuTexture {
                paint,
                width,
                height,
            },
        );
        Some(TextureHandle::new(id, width, height))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if self.depth == 0 {
            tracing::warn!("destroy_texture outside enter/leave");
        }
        self.textures.remove(&texture.id());
    }

    fn push_transform(&mut self) {
        self.transform_stack.push(self.transform);
    }

    fn pop_transform(&mut self) {
        self.transform = self.transform_stack.pop().unwrap_or(Affine::IDENTITY);
    }

    fn translate(&mut self, by: Vec2) {
        self.transform = self.transform * Affine::translate(by);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform = self.transform * Affine::rotate(radians);
    }

    fn scale(&mut self, by: Vec2) {
        self.transform = self.transform * Affine::scale_non_uniform(by.x, by.y);
    }

    fn push_blend_state(&mut self) {
        self.blend_stack.push(self.blend);
    }

    fn set_blend(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend = (src, dst);
    }

    fn pop_blend_state(&mut self) {
        if let Some(prev) = self.blend_stack.pop() {
            self.blend = prev;
        }
    }

    fn draw_sprite(&mut self, texture: &TextureHandle, width: f64, height: f64) {
        let Some(tex) = self.textures.get(&texture.id()) else {
            return;
        };
        if tex.width == 0 || tex.height == 0 {
            return;
        }
        let (tw, th) = (f64::from(tex.width), f64::from(tex.height));
        let tr = self.transform * Affine::scale_non_uniform(width / tw, height / th);
        let paint = tex.paint.clone();
        let blend = blend_mode(self.blend);
        let Some(ctx) = self.frame_ctx() else {
            return;
        };
        ctx.set_blend_mode(blend);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, tw, th));
    }

    fn draw_solid(&mut self, width: f64, height: f64, color: ColorArgb, alpha: f32) {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a == 0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let tr = self.transform;
        let blend = blend_mode(self.blend);
        let Some(ctx) = self.frame_ctx() else {
            return;
        };
        ctx.set_blend_mode(blend);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r(),
            color.g(),
            color.b(),
            a,
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, width, height));
    }
}

fn frame_dim(v: u32, what: &str) -> OverlayResult<u16> {
    if v == 0 {
        return Err(OverlayError::backend(format!("frame {what} must be > 0")));
    }
    v.try_into()
        .map_err(|_| OverlayError::backend(format!("frame {what} exceeds u16")))
}

fn blend_mode(blend: (BlendFactor, BlendFactor)) -> vello_cpu::peniko::BlendMode {
    use vello_cpu::peniko::{BlendMode, Compose, Mix};
    // Textures are stored premultiplied, so both (One, InvSrcAlpha) and (SrcAlpha, InvSrcAlpha)
    // resolve to source-over.
    match blend {
        (_, BlendFactor::Zero) => BlendMode::new(Mix::Normal, Compose::Copy),
        _ => BlendMode::default(),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> OverlayResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| OverlayError::backend("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| OverlayError::backend("pixmap height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(OverlayError::backend("pixmap must be non-empty"));
    }
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(OverlayError::backend("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
