use super::*;

#[test]
fn custom_image_hides_cross_and_ring_fields() {
    let s = OverlaySettings {
        show_custom_image: true,
        ..OverlaySettings::default()
    };
    let v = visible_fields(&s);
    assert!(v.contains("custom_image_path"));
    assert!(!v.contains("crosshair_color"));
    assert!(!v.contains("circle_radius"));
}

#[test]
fn box_size_stays_visible_when_box_hidden() {
    let s = OverlaySettings {
        show_box: false,
        ..OverlaySettings::default()
    };
    let v = visible_fields(&s);
    assert!(v.contains("box_size"));
    assert!(!v.contains("box_color"));
    assert!(!v.contains("box_alpha"));
}

#[test]
fn trail_fields_follow_sub_mode() {
    let linear = visible_fields(&OverlaySettings::default());
    assert!(linear.contains("tracking_line_color"));
    assert!(!linear.contains("path_lifetime"));

    let path = visible_fields(&OverlaySettings {
        tracking_line_mode: TrailMode::Path,
        ..OverlaySettings::default()
    });
    assert!(path.contains("path_lifetime"));
    assert!(!path.contains("tracking_line_color"));

    let hidden = visible_fields(&OverlaySettings {
        show_tracking_line: false,
        tracking_line_mode: TrailMode::Path,
        ..OverlaySettings::default()
    });
    assert!(!hidden.contains("tracking_line_mode"));
    assert!(!hidden.contains("path_lifetime"));
}

#[test]
fn idle_fields_follow_toggle() {
    let off = visible_fields(&OverlaySettings {
        enable_idle_recenter: false,
        ..OverlaySettings::default()
    });
    assert!(!off.contains("idle_recenter_boost"));
    assert!(visible_fields(&OverlaySettings::default()).contains("idle_recenter_boost"));
}
