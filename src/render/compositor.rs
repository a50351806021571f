//! Back-to-front layer drawing for one overlay frame.
//!
//! Order: trail, ring, cross, custom image, box. The ring, cross and image follow the crosshair
//! center (`frame_center + offset`); the box never moves.

use crate::config::settings::{OverlaySettings, TrailMode};
use crate::foundation::core::{ColorArgb, Point, Timestamp, Vec2, secs_to_nanos};
use crate::overlay::host::ImageDecoder;
use crate::overlay::shared::TintLease;
use crate::render::backend::{Graphics, TextureHandle, with_source_over, with_transform};
use crate::texture::cache::{AlphaRamp, RingKey, TextureSlot};
use crate::texture::raster::ring_rgba8;
use crate::trail::path::{PathTrail, fade_bucket};
use std::path::PathBuf;

/// Textures owned by one overlay instance.
#[derive(Debug, Default)]
pub struct LayerTextures {
    pub(crate) ring: TextureSlot<RingKey>,
    pub(crate) ramp: AlphaRamp,
    pub(crate) custom: TextureSlot<PathBuf>,
}

impl LayerTextures {
    /// Empty set; everything is built on first draw.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy every texture.
    pub fn release<G>(&mut self, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        self.ring.release(gfx);
        self.ramp.release(gfx);
        self.custom.release(gfx);
    }
}

/// Read-only per-frame inputs.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    /// Sanitized settings.
    pub settings: &'a OverlaySettings,
    /// Current crosshair offset.
    pub offset: Vec2,
    /// Path trail (ignored in linear mode).
    pub trail: &'a PathTrail,
    /// Render time, used for trail fading.
    pub now: Timestamp,
}

impl FrameInputs<'_> {
    /// Center of the frame.
    pub fn frame_center(&self) -> Point {
        let (w, h) = self.settings.frame_size();
        Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0)
    }

    /// Center of the crosshair.
    pub fn crosshair_center(&self) -> Point {
        self.frame_center() + self.offset
    }
}

/// Solid-quad painter: native backend tint, or the shared tint effect when the backend has none.
struct Solid<'a> {
    tint: &'a mut TintLease,
}

impl Solid<'_> {
    fn fill<G>(&mut self, gfx: &mut G, width: f64, height: f64, color: ColorArgb, alpha: f32)
    where
        G: Graphics + ?Sized,
    {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        if gfx.has_native_tint() {
            gfx.draw_solid(width, height, color, alpha);
        } else {
            self.tint.draw_solid(gfx, width, height, color, alpha);
        }
    }
}

/// Draw every enabled layer. Unavailable textures skip their layer for this frame.
pub fn compose_frame<G>(
    gfx: &mut G,
    frame: &FrameInputs<'_>,
    textures: &mut LayerTextures,
    tint: &mut TintLease,
    decoder: &dyn ImageDecoder,
) where
    G: Graphics + ?Sized,
{
    let s = frame.settings;
    let mut solid = Solid { tint };

    if s.show_tracking_line && s.tracking_line_alpha > 0.0 {
        match s.tracking_line_mode {
            TrailMode::Linear => draw_linear_trail(gfx, frame, &mut solid),
            TrailMode::Path => draw_path_trail(gfx, frame, &mut textures.ramp),
        }
    }

    if !s.show_custom_image && s.circle_alpha > 0.0 && s.circle_thickness > 0 {
        draw_ring(gfx, frame, &mut textures.ring);
    }

    if !s.show_custom_image && s.crosshair_alpha > 0.0 {
        draw_cross(gfx, frame, &mut solid);
    }

    if let Some(path) = s.custom_image() {
        draw_custom_image(gfx, frame, &mut textures.custom, path.to_path_buf(), decoder);
    }

    let box_alpha = s.effective_box_alpha();
    if box_alpha > 0.0 {
        draw_box(gfx, s, box_alpha, &mut solid);
    }
}

fn draw_linear_trail<G>(gfx: &mut G, frame: &FrameInputs<'_>, solid: &mut Solid<'_>)
where
    G: Graphics + ?Sized,
{
    let s = frame.settings;
    let t = f64::from(s.tracking_line_thickness);
    let length = frame.offset.hypot();
    let angle = frame.offset.y.atan2(frame.offset.x);
    let center = frame.frame_center();

    with_source_over(gfx, |gfx| {
        with_transform(gfx, |gfx| {
            gfx.translate(center.to_vec2());
            gfx.rotate(angle);
            gfx.translate(Vec2::new(-t / 2.0, -t / 2.0));
            solid.fill(gfx, length + t, t, s.tracking_line_color, s.tracking_line_alpha);
        });
    });
}

fn draw_path_trail<G>(gfx: &mut G, frame: &FrameInputs<'_>, ramp: &mut AlphaRamp)
where
    G: Graphics + ?Sized,
{
    let s = frame.settings;
    if frame.trail.is_empty() {
        return;
    }
    ramp.ensure(s.path_circle_radius, s.path_circle_color, gfx);
    let lifetime_ns = secs_to_nanos(s.path_lifetime);

    with_source_over(gfx, |gfx| {
        for point in frame.trail.iter() {
            let bucket = fade_bucket(point.age_ns(frame.now), lifetime_ns);
            let Some(tex) = ramp.get(bucket) else {
                continue;
            };
            draw_centered(gfx, tex, point.position);
        }
    });
}

fn draw_ring<G>(gfx: &mut G, frame: &FrameInputs<'_>, slot: &mut TextureSlot<RingKey>)
where
    G: Graphics + ?Sized,
{
    let key = RingKey::from_settings(frame.settings);
    let edge = f64::from(key.edge());
    let Some(tex) = slot.ensure(&key, gfx, |k| {
        ring_rgba8(k.radius, k.thickness, k.color, k.alpha())
    }) else {
        return;
    };
    draw_centered_sized(gfx, tex, frame.crosshair_center(), edge, edge);
}

fn draw_cross<G>(gfx: &mut G, frame: &FrameInputs<'_>, solid: &mut Solid<'_>)
where
    G: Graphics + ?Sized,
{
    let s = frame.settings;
    let len = f64::from(s.crosshair_length);
    let t = f64::from(s.crosshair_thickness);
    let center = frame.crosshair_center();

    with_transform(gfx, |gfx| {
        gfx.translate(center.to_vec2());

        with_transform(gfx, |gfx| {
            gfx.translate(Vec2::new(-len / 2.0, -t / 2.0));
            solid.fill(gfx, len, t, s.crosshair_color, s.crosshair_alpha);
        });

        with_transform(gfx, |gfx| {
            gfx.translate(Vec2::new(-t / 2.0, -len / 2.0));
            solid.fill(gfx, t, len, s.crosshair_color, s.crosshair_alpha);
        });
    });
}

fn draw_custom_image<G>(
    gfx: &mut G,
    frame: &FrameInputs<'_>,
    slot: &mut TextureSlot<PathBuf>,
    path: PathBuf,
    decoder: &dyn ImageDecoder,
) where
    G: Graphics + ?Sized,
{
    let Some(tex) = slot.ensure(&path, gfx, |p| decoder.decode(p).map(Into::into)) else {
        return;
    };
    let center = frame.crosshair_center();
    with_source_over(gfx, |gfx| draw_centered(gfx, tex, center));
}

fn draw_box<G>(gfx: &mut G, s: &OverlaySettings, alpha: f32, solid: &mut Solid<'_>)
where
    G: Graphics + ?Sized,
{
    let (w, h) = s.frame_size();
    let size = f64::from(s.box_size);
    let t = f64::from(s.box_thickness).min(size);
    let origin = Vec2::new(f64::from(w) / 2.0 - size / 2.0, f64::from(h) / 2.0 - size / 2.0);

    with_transform(gfx, |gfx| {
        gfx.translate(origin);
        // top, bottom, left, right
        solid.fill(gfx, size, t, s.box_color, alpha);
        gfx.translate(Vec2::new(0.0, size - t));
        solid.fill(gfx, size, t, s.box_color, alpha);
        gfx.translate(Vec2::new(0.0, -(size - t)));
        solid.fill(gfx, t, size, s.box_color, alpha);
        gfx.translate(Vec2::new(size - t, 0.0));
        solid.fill(gfx, t, size, s.box_color, alpha);
    });
}

fn draw_centered<G>(gfx: &mut G, tex: &TextureHandle, center: Point)
where
    G: Graphics + ?Sized,
{
    let w = f64::from(tex.width());
    let h = f64::from(tex.height());
    draw_centered_sized(gfx, tex, center, w, h);
}

fn draw_centered_sized<G>(gfx: &mut G, tex: &TextureHandle, center: Point, w: f64, h: f64)
where
    G: Graphics + ?Sized,
{
    with_transform(gfx, |gfx| {
        gfx.translate(center.to_vec2() - Vec2::new(w / 2.0, h / 2.0));
        gfx.draw_sprite(tex, w, h);
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
