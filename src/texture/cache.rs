//! Lazily-built GPU textures keyed by the parameters that produced them.
//!
//! Every slot owns its handles. Stale handles are destroyed in the same enter/leave bracket that
//! builds their replacement, and host bitmaps are dropped as soon as they are uploaded.

use crate::config::settings::OverlaySettings;
use crate::foundation::core::ColorArgb;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::render::backend::{Graphics, TextureHandle, with_graphics};
use crate::texture::raster::{RgbaBitmap, disc_rgba8};
use crate::trail::path::FADE_BUCKETS;
use std::fmt;

/// Single cached texture, rebuilt whenever its key changes.
///
/// A failed build leaves the slot empty and is retried on the next `ensure`. The failure is
/// logged once per distinct key.
#[derive(Debug)]
pub struct TextureSlot<K> {
    key: Option<K>,
    handle: Option<TextureHandle>,
    warned: Option<K>,
}

impl<K> Default for TextureSlot<K> {
    fn default() -> Self {
        Self {
            key: None,
            handle: None,
            warned: None,
        }
    }
}

impl<K: Clone + PartialEq + fmt::Debug> TextureSlot<K> {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle, if any.
    pub fn handle(&self) -> Option<&TextureHandle> {
        self.handle.as_ref()
    }

    /// Key of the last build attempt.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Return the texture for `key`, building it with `build` if the cached entry is missing or
    /// was built for a different key.
    pub fn ensure<G>(
        &mut self,
        key: &K,
        gfx: &mut G,
        build: impl FnOnce(&K) -> OverlayResult<RgbaBitmap>,
    ) -> Option<&TextureHandle>
    where
        G: Graphics + ?Sized,
    {
        if self.handle.is_some() && self.key.as_ref() == Some(key) {
            return self.handle.as_ref();
        }
        self.rebuild(key, gfx, build);
        self.handle.as_ref()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn rebuild<G>(
        &mut self,
        key: &K,
        gfx: &mut G,
        build: impl FnOnce(&K) -> OverlayResult<RgbaBitmap>,
    ) where
        G: Graphics + ?Sized,
    {
        let stale = self.handle.take();
        self.key = Some(key.clone());

        let built = with_graphics(gfx, |gfx| {
            if let Some(old) = stale {
                gfx.destroy_texture(old);
            }
            let bmp = build(key)?;
            upload(gfx, &bmp)
        });

        match built {
            Ok(handle) => {
                tracing::debug!(?key, w = handle.width(), h = handle.height(), "texture built");
                self.handle = Some(handle);
                self.warned = None;
            }
            Err(err) => {
                if self.warned.as_ref() != Some(key) {
                    tracing::warn!(?key, error = %err, "texture unavailable; layer skipped");
                    self.warned = Some(key.clone());
                }
            }
        }
    }

    /// Destroy the cached texture and forget the key.
    pub fn release<G>(&mut self, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        self.key = None;
        self.warned = None;
        if let Some(handle) = self.handle.take() {
            with_graphics(gfx, |gfx| gfx.destroy_texture(handle));
        }
    }
}

fn upload<G>(gfx: &mut G, bmp: &RgbaBitmap) -> OverlayResult<TextureHandle>
where
    G: Graphics + ?Sized,
{
    gfx.create_texture(bmp.width, bmp.height, &bmp.data)
        .ok_or_else(|| {
            OverlayError::backend(format!(
                "texture allocation refused ({}x{})",
                bmp.width, bmp.height
            ))
        })
}

/// Parameters that identify a ring bitmap.
///
/// Alpha is bucketed by rounding to thousandths. Values in the same bucket share a texture;
/// neighbouring values can still straddle a bucket boundary and trigger a rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RingKey {
    /// Inner radius in pixels.
    pub radius: u32,
    /// Band width in pixels.
    pub thickness: u32,
    /// Ring color.
    pub color: ColorArgb,
    /// Opacity in thousandths.
    pub alpha_milli: u16,
}

impl RingKey {
    /// Key for the ring described by `settings`.
    pub fn from_settings(settings: &OverlaySettings) -> Self {
        Self {
            radius: settings.circle_radius,
            thickness: settings.circle_thickness,
            color: settings.circle_color,
            alpha_milli: (settings.circle_alpha.clamp(0.0, 1.0) * 1000.0).round() as u16,
        }
    }

    /// Opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        f32::from(self.alpha_milli) / 1000.0
    }

    /// Edge length of the ring bitmap.
    pub fn edge(&self) -> u32 {
        self.radius.saturating_add(self.thickness).saturating_mul(2)
    }
}

/// Opacity of ramp level `index` (0%, 5%, ..., 100%).
pub fn ramp_alpha(index: usize) -> f32 {
    (index as f32 * 5.0) / 100.0
}

/// The path-trail dot at every fade level, indexed by fade bucket.
#[derive(Debug)]
pub struct AlphaRamp {
    key: Option<(u32, ColorArgb)>,
    levels: Vec<Option<TextureHandle>>,
    warned: Option<(u32, ColorArgb)>,
}

impl Default for AlphaRamp {
    fn default() -> Self {
        Self {
            key: None,
            levels: (0..FADE_BUCKETS).map(|_| None).collect(),
            warned: None,
        }
    }
}

impl AlphaRamp {
    /// Empty ramp.
    pub fn new() -> Self {
        Self::default()
    }

    /// `(radius, color)` of the current levels.
    pub fn key(&self) -> Option<(u32, ColorArgb)> {
        self.key
    }

    /// Number of levels currently holding a texture.
    pub fn built_levels(&self) -> usize {
        self.levels.iter().filter(|l| l.is_some()).count()
    }

    /// Make sure the ramp holds discs of `radius` and `color`.
    ///
    /// All levels are rebuilt together when the key changes, or when a previous attempt left
    /// any level empty.
    pub fn ensure<G>(&mut self, radius: u32, color: ColorArgb, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        let key = (radius, color);
        if self.key == Some(key) && self.levels.iter().all(Option::is_some) {
            return;
        }
        self.rebuild(key, gfx);
    }

    #[tracing::instrument(level = "debug", skip_all, fields(radius = key.0))]
    fn rebuild<G>(&mut self, key: (u32, ColorArgb), gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        let (radius, color) = key;
        let stale: Vec<TextureHandle> = self.levels.iter_mut().filter_map(Option::take).collect();
        self.key = Some(key);

        let mut first_err = None;
        with_graphics(gfx, |gfx| {
            for old in stale {
                gfx.destroy_texture(old);
            }
            for (i, level) in self.levels.iter_mut().enumerate() {
                match disc_rgba8(radius, color, ramp_alpha(i)).and_then(|bmp| upload(gfx, &bmp)) {
                    Ok(handle) => *level = Some(handle),
                    Err(err) => {
                        first_err.get_or_insert(err);
                    }
                }
            }
        });

        match first_err {
            None => {
                tracing::debug!(radius, levels = FADE_BUCKETS, "alpha ramp built");
                self.warned = None;
            }
            Some(err) => {
                if self.warned != Some(key) {
                    tracing::warn!(radius, error = %err, "alpha ramp incomplete; missing levels skipped");
                    self.warned = Some(key);
                }
            }
        }
    }

    /// Texture for fade `bucket`. `None` when out of range or not built.
    pub fn get(&self, bucket: usize) -> Option<&TextureHandle> {
        self.levels.get(bucket).and_then(Option::as_ref)
    }

    /// Destroy every level.
    pub fn release<G>(&mut self, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        self.key = None;
        self.warned = None;
        let handles: Vec<TextureHandle> = self.levels.iter_mut().filter_map(Option::take).collect();
        if handles.is_empty() {
            return;
        }
        with_graphics(gfx, |gfx| {
            for h in handles {
                gfx.destroy_texture(h);
            }
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/cache.rs"]
mod tests;
