use crate::foundation::core::ColorArgb;
use crate::foundation::error::{OverlayError, OverlayResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How the crosshair offset is derived from the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrosshairMode {
    /// Relative pointer motion integrated into a damped, self-recentering offset.
    #[default]
    Movement,
    /// Absolute pointer position within the active display projected onto the offset range.
    Coordinate,
}

/// How the trail between frame center and crosshair is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailMode {
    /// A single line from the frame center to the crosshair. Stateless.
    #[default]
    Linear,
    /// Fading dots left behind the crosshair as it moves.
    Path,
}

/// Flat overlay configuration, supplied at creation and on every update.
///
/// Unknown JSON keys are rejected; missing keys take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlaySettings {
    /// Offset simulation mode.
    pub mode: CrosshairMode,

    /// Draw the boundary box.
    pub show_box: bool,
    /// Box edge length in pixels; also the overlay's reported width and height.
    pub box_size: u32,
    /// Box outline color.
    pub box_color: ColorArgb,
    /// Box outline thickness in pixels.
    pub box_thickness: u32,
    /// Box opacity in `[0, 1]`.
    pub box_alpha: f32,

    /// Maximum per-axis crosshair displacement in pixels.
    pub max_offset: f64,

    /// Replace the ring and cross with a custom image.
    pub show_custom_image: bool,
    /// Filesystem path of the custom image.
    pub custom_image_path: String,

    /// Cross color.
    pub crosshair_color: ColorArgb,
    /// Length of each cross arm in pixels.
    pub crosshair_length: u32,
    /// Width of each cross arm in pixels.
    pub crosshair_thickness: u32,
    /// Cross opacity in `[0, 1]`.
    pub crosshair_alpha: f32,

    /// Ring color.
    pub circle_color: ColorArgb,
    /// Ring band width in pixels.
    pub circle_thickness: u32,
    /// Inner ring radius in pixels.
    pub circle_radius: u32,
    /// Ring opacity in `[0, 1]`.
    pub circle_alpha: f32,

    /// Draw the trail layer.
    pub show_tracking_line: bool,
    /// Trail sub-mode.
    pub tracking_line_mode: TrailMode,
    /// Linear trail color.
    pub tracking_line_color: ColorArgb,
    /// Linear trail thickness in pixels.
    pub tracking_line_thickness: u32,
    /// Trail opacity in `[0, 1]`. Gates both trail sub-modes.
    pub tracking_line_alpha: f32,

    /// Path dot radius in pixels.
    pub path_circle_radius: u32,
    /// Path dot color.
    pub path_circle_color: ColorArgb,
    /// Seconds a path dot stays alive.
    pub path_lifetime: f64,
    /// Minimum distance in pixels between consecutive path dots.
    pub path_generation_interval: f64,

    /// Recenter speed (per second) when the crosshair sits at the center.
    pub recenter_speed_center: f64,
    /// Recenter speed (per second) when the crosshair sits at `max_offset`.
    pub recenter_speed_edge: f64,
    /// Movement gain applied to pointer deltas.
    pub crosshair_move_speed_center: f64,
    /// Movement gain at the edge. Carried for configuration compatibility; unused by the simulator.
    pub crosshair_move_speed_edge: f64,
    /// Pointer delta multiplier.
    pub sensitivity: f64,

    /// Ramp up recentering while the pointer stays still.
    pub enable_idle_recenter: bool,
    /// Seconds of stillness before the ramp starts.
    pub idle_recenter_delay: f64,
    /// Seconds for the ramp to reach the full boost.
    pub idle_recenter_time: f64,
    /// Speed added to both recenter speeds at the end of the ramp.
    pub idle_recenter_boost: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            mode: CrosshairMode::Movement,
            show_box: true,
            box_size: 500,
            box_color: ColorArgb(0xFF00_00FF),
            box_thickness: 4,
            box_alpha: 1.0,
            max_offset: 200.0,
            show_custom_image: false,
            custom_image_path: String::new(),
            crosshair_color: ColorArgb(0xFFFF_0000),
            crosshair_length: 48,
            crosshair_thickness: 4,
            crosshair_alpha: 1.0,
            circle_color: ColorArgb(0xFF00_FFFF),
            circle_thickness: 48,
            circle_radius: 15,
            circle_alpha: 1.0,
            show_tracking_line: true,
            tracking_line_mode: TrailMode::Linear,
            tracking_line_color: ColorArgb(0xFF00_00FF),
            tracking_line_thickness: 6,
            tracking_line_alpha: 1.0,
            path_circle_radius: 8,
            path_circle_color: ColorArgb(0xFF00_FF00),
            path_lifetime: 2.0,
            path_generation_interval: 20.0,
            recenter_speed_center: 0.75,
            recenter_speed_edge: 1.50,
            crosshair_move_speed_center: 1.0,
            crosshair_move_speed_edge: 0.05,
            sensitivity: 0.25,
            enable_idle_recenter: true,
            idle_recenter_delay: 0.10,
            idle_recenter_time: 2.0,
            idle_recenter_boost: 10.0,
        }
    }
}

impl OverlaySettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> OverlayResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| OverlayError::config(format!("parse settings JSON: {e}")))?;
        Ok(settings.sanitized())
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OverlayError::config(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> OverlayResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OverlayError::config(format!("serialize settings JSON: {e}")))
    }

    /// Return a copy with every numeric field forced into its valid domain.
    ///
    /// Non-finite values fall back to the default, opacities clamp to `[0, 1]`, and speeds,
    /// durations and distances clamp to `>= 0`. Simulation and rendering rely on this never
    /// producing NaN.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let mut s = self.clone();

        s.box_alpha = unit_f32(s.box_alpha, d.box_alpha);
        s.crosshair_alpha = unit_f32(s.crosshair_alpha, d.crosshair_alpha);
        s.circle_alpha = unit_f32(s.circle_alpha, d.circle_alpha);
        s.tracking_line_alpha = unit_f32(s.tracking_line_alpha, d.tracking_line_alpha);

        s.max_offset = non_negative(s.max_offset, d.max_offset);
        s.path_lifetime = non_negative(s.path_lifetime, d.path_lifetime);
        s.path_generation_interval =
            non_negative(s.path_generation_interval, d.path_generation_interval);
        s.recenter_speed_center = non_negative(s.recenter_speed_center, d.recenter_speed_center);
        s.recenter_speed_edge = non_negative(s.recenter_speed_edge, d.recenter_speed_edge);
        s.crosshair_move_speed_center =
            non_negative(s.crosshair_move_speed_center, d.crosshair_move_speed_center);
        s.crosshair_move_speed_edge =
            non_negative(s.crosshair_move_speed_edge, d.crosshair_move_speed_edge);
        s.idle_recenter_delay = non_negative(s.idle_recenter_delay, d.idle_recenter_delay);
        s.idle_recenter_time = non_negative(s.idle_recenter_time, d.idle_recenter_time);
        s.idle_recenter_boost = non_negative(s.idle_recenter_boost, d.idle_recenter_boost);

        // Sensitivity may legitimately be negative (inverted axes) but never NaN.
        if !s.sensitivity.is_finite() {
            s.sensitivity = d.sensitivity;
        }
        s
    }

    /// Box opacity after applying the `show_box` toggle.
    pub fn effective_box_alpha(&self) -> f32 {
        if self.show_box { self.box_alpha } else { 0.0 }
    }

    /// Overlay width and height in pixels.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.box_size, self.box_size)
    }

    /// Whether the path trail is active and keeps per-tick state.
    pub fn path_trail_active(&self) -> bool {
        self.show_tracking_line && self.tracking_line_mode == TrailMode::Path
    }

    /// Custom image path, if the custom image layer is enabled and configured.
    pub fn custom_image(&self) -> Option<&Path> {
        if self.show_custom_image && !self.custom_image_path.trim().is_empty() {
            Some(Path::new(&self.custom_image_path))
        } else {
            None
        }
    }
}

fn unit_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback }
}

fn non_negative(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
