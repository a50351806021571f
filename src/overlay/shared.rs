//! Process-wide resources shared by every overlay instance.
//!
//! Only the fallback tint (an effect plus a 1x1 white mask) lives here. It is created on first
//! use and destroyed when the last lease is released.

use crate::foundation::core::ColorArgb;
use crate::render::backend::{EffectHandle, Graphics, TextureHandle, with_graphics};
use crate::texture::raster::white_pixel;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Source handed to [`Graphics::create_effect`] for the tint fallback: output is the sampled
/// mask multiplied by a uniform color.
pub const TINT_EFFECT_SOURCE: &str = "\
uniform float4x4 ViewProj;
uniform texture2d image;
uniform float4 color;
sampler_state def_sampler { Filter = Linear; AddressU = Clamp; AddressV = Clamp; };
struct VertInOut { float4 pos : POSITION; float2 uv : TEXCOORD0; };
VertInOut VSDefault(VertInOut v) { v.pos = mul(float4(v.pos.xyz, 1.0), ViewProj); return v; }
float4 PSTint(VertInOut v) : TARGET { return image.Sample(def_sampler, v.uv) * color; }
technique Draw { pass { vertex_shader = VSDefault(v); pixel_shader = PSTint(v); } }
";

struct TintResources {
    effect: EffectHandle,
    mask: TextureHandle,
}

#[derive(Default)]
struct TintState {
    holders: usize,
    resources: Option<TintResources>,
    warned: bool,
}

fn lock(state: &Mutex<TintState>) -> MutexGuard<'_, TintState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the shared resources. Cheap to clone; every clone refers to the same state.
#[derive(Clone, Default)]
pub struct SharedResources {
    tint: Arc<Mutex<TintState>>,
}

impl std::fmt::Debug for SharedResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedResources")
            .field("holders", &self.holders())
            .field("tint_ready", &self.tint_ready())
            .finish()
    }
}

impl SharedResources {
    /// Fresh, uninitialized resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new holder.
    pub fn lease(&self) -> TintLease {
        lock(&self.tint).holders += 1;
        TintLease {
            tint: Arc::clone(&self.tint),
            released: false,
        }
    }

    /// Number of live leases.
    pub fn holders(&self) -> usize {
        lock(&self.tint).holders
    }

    /// Whether the tint effect and mask currently exist.
    pub fn tint_ready(&self) -> bool {
        lock(&self.tint).resources.is_some()
    }
}

/// One instance's claim on [`SharedResources`].
///
/// Must be given back with [`TintLease::release`] so the last holder can destroy the GPU
/// resources inside a graphics context.
pub struct TintLease {
    tint: Arc<Mutex<TintState>>,
    released: bool,
}

impl std::fmt::Debug for TintLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TintLease")
            .field("released", &self.released)
            .finish()
    }
}

impl TintLease {
    /// Fill a `width x height` quad through the tint effect, creating it on first use.
    ///
    /// Does nothing if the backend cannot create the effect or the mask.
    pub fn draw_solid<G>(
        &mut self,
        gfx: &mut G,
        width: f64,
        height: f64,
        color: ColorArgb,
        alpha: f32,
    ) where
        G: Graphics + ?Sized,
    {
        let mut state = lock(&self.tint);
        if state.resources.is_none() {
            state.resources = with_graphics(gfx, create_tint);
            match &state.resources {
                Some(_) => {
                    tracing::debug!("tint effect created");
                    state.warned = false;
                }
                None if !state.warned => {
                    tracing::warn!("tint effect unavailable; solid layers skipped");
                    state.warned = true;
                }
                None => {}
            }
        }
        if let Some(res) = &state.resources {
            gfx.draw_tinted(&res.effect, &res.mask, width, height, color, alpha);
        }
    }

    /// Give the lease back. The last holder destroys the tint resources.
    pub fn release<G>(mut self, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        self.released = true;
        let mut state = lock(&self.tint);
        state.holders = state.holders.saturating_sub(1);
        if state.holders > 0 {
            return;
        }
        if let Some(res) = state.resources.take() {
            with_graphics(gfx, |gfx| {
                gfx.destroy_effect(res.effect);
                gfx.destroy_texture(res.mask);
            });
            tracing::debug!("tint effect destroyed");
        }
    }
}

impl Drop for TintLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let mut state = lock(&self.tint);
        state.holders = state.holders.saturating_sub(1);
        if state.holders == 0 && state.resources.is_some() {
            tracing::warn!("last tint lease dropped without release; GPU resources leaked");
        }
    }
}

fn create_tint<G>(gfx: &mut G) -> Option<TintResources>
where
    G: Graphics + ?Sized,
{
    let effect = gfx.create_effect(TINT_EFFECT_SOURCE)?;
    let px = white_pixel();
    match gfx.create_texture(px.width, px.height, &px.data) {
        Some(mask) => Some(TintResources { effect, mask }),
        None => {
            gfx.destroy_effect(effect);
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/shared.rs"]
mod tests;
