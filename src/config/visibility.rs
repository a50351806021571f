use crate::config::settings::{OverlaySettings, TrailMode};
use std::collections::BTreeSet;

/// Configuration fields that a settings UI should currently show.
///
/// Pure function of the settings; hosts map the names onto their own property widgets.
pub fn visible_fields(s: &OverlaySettings) -> BTreeSet<&'static str> {
    let mut out = BTreeSet::new();

    out.extend([
        "mode",
        "max_offset",
        "show_custom_image",
        "show_box",
        "box_size",
        "show_tracking_line",
        "recenter_speed_center",
        "recenter_speed_edge",
        "sensitivity",
        "crosshair_move_speed_center",
        "crosshair_move_speed_edge",
        "enable_idle_recenter",
    ]);

    if s.show_custom_image {
        out.insert("custom_image_path");
    } else {
        out.extend([
            "crosshair_length",
            "crosshair_color",
            "crosshair_thickness",
            "crosshair_alpha",
            "circle_color",
            "circle_thickness",
            "circle_radius",
            "circle_alpha",
        ]);
    }

    if s.show_box {
        out.extend(["box_color", "box_thickness", "box_alpha"]);
    }

    if s.show_tracking_line {
        out.insert("tracking_line_mode");
        match s.tracking_line_mode {
            TrailMode::Linear => out.extend([
                "tracking_line_color",
                "tracking_line_thickness",
                "tracking_line_alpha",
            ]),
            TrailMode::Path => out.extend([
                "path_circle_color",
                "path_circle_radius",
                "path_lifetime",
                "path_generation_interval",
            ]),
        }
    }

    if s.enable_idle_recenter {
        out.extend([
            "idle_recenter_delay",
            "idle_recenter_time",
            "idle_recenter_boost",
        ]);
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/config/visibility.rs"]
mod tests;
