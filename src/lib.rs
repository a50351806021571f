//! Crosshair tracker overlay core.
//!
//! A broadcast-overlay source that turns mouse movement into a stabilized crosshair inside a
//! fixed bounding box. Each overlay instance owns:
//!
//! - a [`MotionSimulator`] turning pointer samples into a bounded offset
//! - a [`PathTrail`] of fading historical crosshair positions
//! - lazily-built textures for the ring, the path dots and an optional custom image
//!
//! and draws its layers through a host-provided [`Graphics`] implementation. [`CpuGraphics`]
//! rasterizes with `vello_cpu`; [`RecordingGraphics`] captures the call list.
//!
//! Typical host loop:
//!
//! - create one [`SharedResources`] per process and a [`CursorOverlay`] per source
//! - every frame call [`CursorOverlay::tick`] then [`CursorOverlay::render`]
//! - finish with [`CursorOverlay::destroy`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Overlay configuration.
pub mod config;
/// Crosshair motion.
pub mod motion;
/// Host interfaces and the overlay instance.
pub mod overlay;
/// Graphics backends and the compositor.
pub mod render;
/// Procedural bitmaps and texture caching.
pub mod texture;
/// Path trail bookkeeping.
pub mod trail;

pub use crate::foundation::core::{
    Affine, ColorArgb, Point, Rect, Timestamp, Vec2, secs_to_nanos,
};
pub use crate::foundation::error::{OverlayError, OverlayResult};

pub use crate::config::settings::{CrosshairMode, OverlaySettings, TrailMode};
pub use crate::config::visibility::visible_fields;
pub use crate::motion::simulator::{MotionInput, MotionSimulator, TickOutcome, TrackerState};
pub use crate::overlay::host::{
    DecodedImage, FsImageDecoder, ImageDecoder, PointerHost, TickInput, decode_image,
};
pub use crate::overlay::instance::CursorOverlay;
pub use crate::overlay::shared::{SharedResources, TintLease};
pub use crate::render::backend::{
    BlendFactor, EffectHandle, Graphics, TextureHandle, with_graphics,
};
pub use crate::render::cpu::{CpuGraphics, FrameRGBA};
pub use crate::render::record::{RecordedCall, RecordedQuad, RecordingGraphics};
pub use crate::trail::path::{MAX_PATH_POINTS, PathPoint, PathTrail};
