use crate::config::settings::OverlaySettings;
use crate::foundation::core::{Point, Timestamp, Vec2};
use crate::motion::simulator::{MotionInput, MotionSimulator, TickOutcome, TrackerState};
use crate::overlay::host::{FsImageDecoder, ImageDecoder, PointerHost, TickInput};
use crate::overlay::shared::{SharedResources, TintLease};
use crate::render::backend::Graphics;
use crate::render::compositor::{FrameInputs, LayerTextures, compose_frame};
use crate::trail::path::{PathTrail, TrailStep};
use std::sync::Arc;

/// One crosshair-tracker overlay.
///
/// Lifecycle: [`CursorOverlay::new`], then any number of [`CursorOverlay::tick`],
/// [`CursorOverlay::render`] and [`CursorOverlay::update`] calls, then
/// [`CursorOverlay::destroy`]. Calls for one instance must not overlap, but may come from
/// different threads.
pub struct CursorOverlay {
    settings: OverlaySettings,
    motion: MotionSimulator,
    trail: PathTrail,
    textures: LayerTextures,
    tint: TintLease,
    decoder: Arc<dyn ImageDecoder>,
}

impl std::fmt::Debug for CursorOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorOverlay")
            .field("offset", &self.motion.offset())
            .field("trail_len", &self.trail.len())
            .finish_non_exhaustive()
    }
}

impl CursorOverlay {
    /// Create an overlay that loads custom images from the filesystem.
    pub fn new(settings: &OverlaySettings, shared: &SharedResources) -> Self {
        Self::with_decoder(settings, shared, Arc::new(FsImageDecoder))
    }

    /// Create an overlay with a custom image decoder.
    pub fn with_decoder(
        settings: &OverlaySettings,
        shared: &SharedResources,
        decoder: Arc<dyn ImageDecoder>,
    ) -> Self {
        let settings = settings.sanitized();
        tracing::debug!(mode = ?settings.mode, box_size = settings.box_size, "overlay created");
        Self {
            motion: MotionSimulator::new(&settings),
            settings,
            trail: PathTrail::new(),
            textures: LayerTextures::new(),
            tint: shared.lease(),
            decoder,
        }
    }

    /// Current (sanitized) settings.
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Reported width and height in pixels.
    pub fn frame_size(&self) -> (u32, u32) {
        self.settings.frame_size()
    }

    /// Current crosshair offset from the frame center.
    pub fn offset(&self) -> Vec2 {
        self.motion.offset()
    }

    /// Motion state snapshot.
    pub fn tracker_state(&self) -> &TrackerState {
        self.motion.state()
    }

    /// Path trail.
    pub fn trail(&self) -> &PathTrail {
        &self.trail
    }

    /// Rendered crosshair center in frame coordinates.
    pub fn crosshair_center(&self) -> Point {
        let (w, h) = self.frame_size();
        Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0) + self.motion.offset()
    }

    /// Apply new settings.
    ///
    /// A changed custom image path drops the old image texture, and disabling the custom image
    /// releases it. Ring and ramp textures are re-keyed lazily on the next render. Leaving path
    /// mode clears the trail.
    pub fn update<G>(&mut self, settings: &OverlaySettings, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        let next = settings.sanitized();

        if next.custom_image() != self.settings.custom_image() {
            self.textures.custom.release(gfx);
        }
        if !next.path_trail_active() {
            self.trail.clear();
        }
        if next.mode != self.settings.mode {
            tracing::debug!(from = ?self.settings.mode, to = ?next.mode, "crosshair mode changed");
        }
        self.settings = next;
    }

    /// Advance the simulation and trail by one tick.
    ///
    /// A tick without a pointer reading is skipped entirely.
    pub fn tick(&mut self, input: &TickInput) -> Option<TickOutcome> {
        let pointer = input.pointer?;
        let outcome = self.motion.tick(
            &self.settings,
            &MotionInput {
                pointer,
                display: input.display,
                elapsed_secs: input.elapsed_secs,
            },
        );

        if self.settings.path_trail_active() {
            let center = self.crosshair_center();
            self.trail.advance(&TrailStep {
                center,
                pointer_moved: outcome.moved,
                now: input.now,
                lifetime_secs: self.settings.path_lifetime,
                spacing_px: self.settings.path_generation_interval,
            });
        } else {
            self.trail.clear();
        }
        Some(outcome)
    }

    /// Query `host` and tick.
    pub fn tick_from_host(
        &mut self,
        host: &dyn PointerHost,
        elapsed_secs: f64,
        now: Timestamp,
    ) -> Option<TickOutcome> {
        self.tick(&TickInput::from_host(host, elapsed_secs, now))
    }

    /// Draw the current frame.
    pub fn render<G>(&mut self, gfx: &mut G, now: Timestamp)
    where
        G: Graphics + ?Sized,
    {
        let frame = FrameInputs {
            settings: &self.settings,
            offset: self.motion.offset(),
            trail: &self.trail,
            now,
        };
        compose_frame(
            gfx,
            &frame,
            &mut self.textures,
            &mut self.tint,
            self.decoder.as_ref(),
        );
    }

    /// Release every resource this instance owns, and the shared tint if this was its last
    /// holder.
    pub fn destroy<G>(mut self, gfx: &mut G)
    where
        G: Graphics + ?Sized,
    {
        self.textures.release(gfx);
        self.trail.clear();
        self.tint.release(gfx);
        tracing::debug!("overlay destroyed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/instance.rs"]
mod tests;
