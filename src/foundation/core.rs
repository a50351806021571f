pub use kurbo::{Affine, Point, Rect, Vec2};

/// Packed `0xAARRGGBB` color.
///
/// The alpha byte is informational; every layer carries its own opacity as a separate `f32`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ColorArgb(pub u32);

impl ColorArgb {
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Red channel.
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Alpha channel.
    pub fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Convert a host color packed as little-endian RGBA (`0xAABBGGRR`).
    pub fn from_obs_rgba(packed: u32) -> Self {
        let r = packed & 0xFF;
        let g = (packed >> 8) & 0xFF;
        let b = (packed >> 16) & 0xFF;
        let a = (packed >> 24) & 0xFF;
        Self((a << 24) | (r << 16) | (g << 8) | b)
    }

    /// Inverse of [`ColorArgb::from_obs_rgba`].
    pub fn to_obs_rgba(self) -> u32 {
        let r = u32::from(self.r());
        let g = u32::from(self.g());
        let b = u32::from(self.b());
        let a = u32::from(self.a());
        r | (g << 8) | (b << 16) | (a << 24)
    }
}

/// Monotonic timestamp in nanoseconds, supplied by the host clock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Nanoseconds elapsed since `earlier`, saturating at zero if the clock went backwards.
    pub fn saturating_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Advance by a number of seconds (negative and non-finite inputs add nothing).
    pub fn after_secs(self, secs: f64) -> Self {
        Self(self.0.saturating_add(secs_to_nanos(secs)))
    }
}

/// Convert seconds to nanoseconds; negative and non-finite values map to zero.
pub fn secs_to_nanos(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1_000_000_000.0) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
