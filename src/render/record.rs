//! Headless [`Graphics`] backend that records every call.
//!
//! Draw calls carry the frame-space origin and rotation in effect when they were issued, so
//! layer placement can be asserted without rasterizing.

use crate::foundation::core::{Affine, ColorArgb, Point, Vec2};
use crate::render::backend::{BlendFactor, EffectHandle, Graphics, TextureHandle};
use std::collections::{BTreeMap, BTreeSet};

/// One recorded call.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedCall {
    /// `enter`
    Enter,
    /// `leave`
    Leave,
    /// Successful `create_texture`.
    CreateTexture {
        /// Assigned id.
        id: u64,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Largest alpha byte in the uploaded bitmap.
        max_alpha: u8,
    },
    /// `create_texture` refused.
    CreateTextureFailed {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// `destroy_texture`
    DestroyTexture {
        /// Texture id.
        id: u64,
    },
    /// `create_effect`
    CreateEffect {
        /// Assigned id.
        id: u64,
    },
    /// `destroy_effect`
    DestroyEffect {
        /// Effect id.
        id: u64,
    },
    /// `push_transform`
    PushTransform,
    /// `pop_transform`
    PopTransform,
    /// `push_blend_state`
    PushBlend,
    /// `set_blend`
    SetBlend(BlendFactor, BlendFactor),
    /// `pop_blend_state`
    PopBlend,
    /// `draw_sprite`
    Sprite(RecordedQuad),
    /// `draw_solid`
    Solid(RecordedQuad),
    /// `draw_tinted`
    Tinted(RecordedQuad),
}

/// Geometry and paint of a recorded quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedQuad {
    /// Frame-space position of the quad's local origin.
    pub origin: Point,
    /// Rotation of the current transform in radians.
    pub rotation: f64,
    /// Quad width.
    pub width: f64,
    /// Quad height.
    pub height: f64,
    /// Texture id for sprites and tinted quads.
    pub texture: Option<u64>,
    /// Tint color for solid and tinted quads.
    pub color: Option<ColorArgb>,
    /// Opacity for solid and tinted quads.
    pub alpha: f32,
    /// Blend function in effect.
    pub blend: (BlendFactor, BlendFactor),
}

impl RecordedQuad {
    /// Frame-space center, ignoring rotation.
    pub fn center(&self) -> Point {
        self.origin + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct TextureInfo {
    width: u32,
    height: u32,
    max_alpha: u8,
}

/// Recording backend.
#[derive(Debug)]
pub struct RecordingGraphics {
    calls: Vec<RecordedCall>,
    transform: Affine,
    transform_stack: Vec<Affine>,
    blend: (BlendFactor, BlendFactor),
    blend_stack: Vec<(BlendFactor, BlendFactor)>,
    depth: u32,
    next_id: u64,
    textures: BTreeMap<u64, TextureInfo>,
    effects: BTreeSet<u64>,
    scope_violations: u32,
    fail_allocations: bool,
    native_tint: bool,
}

impl Default for RecordingGraphics {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingGraphics {
    /// Backend with native tinting and working allocation.
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            transform: Affine::IDENTITY,
            transform_stack: Vec::new(),
            blend: (BlendFactor::One, BlendFactor::InvSrcAlpha),
            blend_stack: Vec::new(),
            depth: 0,
            next_id: 1,
            textures: BTreeMap::new(),
            effects: BTreeSet::new(),
            scope_violations: 0,
            fail_allocations: false,
            native_tint: true,
        }
    }

    /// Backend without native tinting; solid quads must use the tint effect.
    pub fn without_native_tint() -> Self {
        Self {
            native_tint: false,
            ..Self::new()
        }
    }

    /// Refuse (or accept again) every texture and effect allocation.
    pub fn set_fail_allocations(&mut self, fail: bool) {
        self.fail_allocations = fail;
    }

    /// Every call so far.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Forget recorded calls. Live resources are kept.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Sprite, solid and tinted quads in draw order.
    pub fn quads(&self) -> Vec<&RecordedQuad> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RecordedCall::Sprite(q) | RecordedCall::Solid(q) | RecordedCall::Tinted(q) => {
                    Some(q)
                }
                _ => None,
            })
            .collect()
    }

    /// Textures created and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Effects created and not yet destroyed.
    pub fn live_effects(&self) -> usize {
        self.effects.len()
    }

    /// Size of a live texture.
    pub fn texture_size(&self, id: u64) -> Option<(u32, u32)> {
        self.textures.get(&id).map(|t| (t.width, t.height))
    }

    /// Largest alpha byte uploaded for a live texture.
    pub fn texture_max_alpha(&self, id: u64) -> Option<u8> {
        self.textures.get(&id).map(|t| t.max_alpha)
    }

    /// Resource creations or destructions issued outside enter/leave.
    pub fn scope_violations(&self) -> u32 {
        self.scope_violations
    }

    /// Whether the transform and blend stacks are balanced and no enter is pending.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.transform_stack.is_empty() && self.blend_stack.is_empty()
    }

    fn check_scope(&mut self) {
        if self.depth == 0 {
            self.scope_violations += 1;
        }
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn quad(
        &self,
        width: f64,
        height: f64,
        texture: Option<u64>,
        color: Option<ColorArgb>,
        alpha: f32,
    ) -> RecordedQuad {
        let c = self.transform.as_coeffs();
        RecordedQuad {
            origin: self.transform * Point::ORIGIN,
            rotation: c[1].atan2(c[0]),
            width,
            height,
            texture,
            color,
            alpha,
            blend: self.blend,
        }
    }
}

impl Graphics for RecordingGraphics {
    fn enter(&mut self) {
        self.depth += 1;
        self.calls.push(RecordedCall::Enter);
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.calls.push(RecordedCall::Leave);
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureHandle> {
        self.check_scope();
        let expected = (width as usize) * (height as usize) * 4;
        if self.fail_allocations || width == 0 || height == 0 || rgba.len() != expected {
            self.calls
                .push(RecordedCall::CreateTextureFailed { width, height });
            return None;
        }
        let id = self.alloc_id();
        let max_alpha = rgba.chunks_exact(4).map(|px| px[3]).max().unwrap_or(0);
        self.textures.insert(
            id,
            TextureInfo {
                width,
                height,
                max_alpha,
            },
        );
        self.calls.push(RecordedCall::CreateTexture {
            id,
            width,
            height,
            max_alpha,
        });
        Some(TextureHandle::new(id, width, height))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.check_scope();
        self.textures.remove(&texture.id());
        self.calls
            .push(RecordedCall::DestroyTexture { id: texture.id() });
    }

    fn push_transform(&mut self) {
        self.transform_stack.push(self.transform);
        self.calls.push(RecordedCall::PushTransform);
    }

    fn pop_transform(&mut self) {
        self.transform = self.transform_stack.pop().unwrap_or(Affine::IDENTITY);
        self.calls.push(RecordedCall::PopTransform);
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
        self.calls.push(RecordedCall::PushBlend);
    }

    fn set_blend(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend = (src, dst);
        self.calls.push(RecordedCall::SetBlend(src, dst));
    }

    fn pop_blend_state(&mut self) {
        if let Some(prev) = self.blend_stack.pop() {
            self.blend = prev;
        }
        self.calls.push(RecordedCall::PopBlend);
    }

    fn draw_sprite(&mut self, texture: &TextureHandle, width: f64, height: f64) {
        let q = self.quad(width, height, Some(texture.id()), None, 1.0);
        self.calls.push(RecordedCall::Sprite(q));
    }

    fn draw_solid(&mut self, width: f64, height: f64, color: ColorArgb, alpha: f32) {
        let q = self.quad(width, height, None, Some(color), alpha);
        self.calls.push(RecordedCall::Solid(q));
    }

    fn has_native_tint(&self) -> bool {
        self.native_tint
    }

    fn create_effect(&mut self, _source: &str) -> Option<EffectHandle> {
        self.check_scope();
        if self.fail_allocations {
            return None;
        }
        let id = self.alloc_id();
        self.effects.insert(id);
        self.calls.push(RecordedCall::CreateEffect { id });
        Some(EffectHandle(id))
    }

    fn destroy_effect(&mut self, effect: EffectHandle) {
        self.check_scope();
        self.effects.remove(&effect.0);
        self.calls.push(RecordedCall::DestroyEffect { id: effect.0 });
    }

    fn draw_tinted(
        &mut self,
        _effect: &EffectHandle,
        texture: &TextureHandle,
        width: f64,
        height: f64,
        color: ColorArgb,
        alpha: f32,
    ) {
        let q = self.quad(width, height, Some(texture.id()), Some(color), alpha);
        self.calls.push(RecordedCall::Tinted(q));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
