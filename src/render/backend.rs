use crate::foundation::core::{ColorArgb, Vec2};

/// Backend-owned texture. Not `Clone`: exactly one owner destroys it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: u64,
    width: u32,
    height: u32,
}

impl TextureHandle {
    /// Wrap a backend texture id. Only backends should construct handles.
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Backend id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Backend-owned shader effect used for the tint fallback path.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u64);

/// Blend factors for [`Graphics::set_blend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source alpha.
    SrcAlpha,
    /// 1 - source alpha.
    InvSrcAlpha,
}

/// Graphics capability the overlay draws through.
///
/// Coordinates are in frame pixels with the origin at the top-left. Transform calls compose onto
/// the current matrix (post-multiplied, so later calls act in the local space of earlier ones).
/// Sprites and solid quads are drawn with their top-left corner at the current origin.
///
/// Resource creation and destruction must happen between [`Graphics::enter`] and
/// [`Graphics::leave`]; use [`with_graphics`] rather than calling them directly.
pub trait Graphics {
    /// Acquire the graphics context for resource mutation.
    fn enter(&mut self);
    /// Release the graphics context.
    fn leave(&mut self);

    /// Upload a straight-alpha RGBA8 bitmap. `None` when the backend cannot allocate it.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureHandle>;
    /// Free a texture.
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Save the current transform.
    fn push_transform(&mut self);
    /// Restore the most recently saved transform.
    fn pop_transform(&mut self);
    /// Translate the current transform.
    fn translate(&mut self, by: Vec2);
    /// Rotate the current transform about the current origin (radians, clockwise in screen space).
    fn rotate(&mut self, radians: f64);
    /// Scale the current transform.
    fn scale(&mut self, by: Vec2);

    /// Save the current blend state.
    fn push_blend_state(&mut self);
    /// Set the blend function for subsequent draws.
    fn set_blend(&mut self, src: BlendFactor, dst: BlendFactor);
    /// Restore the most recently saved blend state.
    fn pop_blend_state(&mut self);

    /// Draw `texture` stretched to `width x height`.
    fn draw_sprite(&mut self, texture: &TextureHandle, width: f64, height: f64);
    /// Fill a `width x height` quad with `color` at `alpha`.
    fn draw_solid(&mut self, width: f64, height: f64, color: ColorArgb, alpha: f32);

    /// Whether [`Graphics::draw_solid`] can tint natively. When `false`, solid quads go through
    /// the shared tint effect instead.
    fn has_native_tint(&self) -> bool {
        true
    }

    /// Compile the tint effect from `source`.
    fn create_effect(&mut self, _source: &str) -> Option<EffectHandle> {
        None
    }

    /// Free an effect.
    fn destroy_effect(&mut self, _effect: EffectHandle) {}

    /// Draw `texture` multiplied by `color`/`alpha` through `effect`.
    fn draw_tinted(
        &mut self,
        _effect: &EffectHandle,
        _texture: &TextureHandle,
        _width: f64,
        _height: f64,
        _color: ColorArgb,
        _alpha: f32,
    ) {
    }
}

/// Run `f` inside an enter/leave bracket.
pub fn with_graphics<G, R>(gfx: &mut G, f: impl FnOnce(&mut G) -> R) -> R
where
    G: Graphics + ?Sized,
{
    gfx.enter();
    let out = f(gfx);
    gfx.leave();
    out
}

/// Run `f` with the transform saved and restored around it.
pub fn with_transform<G, R>(gfx: &mut G, f: impl FnOnce(&mut G) -> R) -> R
where
    G: Graphics + ?Sized,
{
    gfx.push_transform();
    let out = f(gfx);
    gfx.pop_transform();
    out
}

/// Run `f` with standard source-over blending, restoring the previous blend state afterwards.
pub fn with_source_over<G, R>(gfx: &mut G, f: impl FnOnce(&mut G) -> R) -> R
where
    G: Graphics + ?Sized,
{
    gfx.push_blend_state();
    gfx.set_blend(BlendFactor::SrcAlpha, BlendFactor::InvSrcAlpha);
    let out = f(gfx);
    gfx.pop_blend_state();
    out
}
