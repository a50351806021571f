use super::*;

#[test]
fn defaults_match_shipped_values() {
    let s = OverlaySettings::default();
    assert_eq!(s.mode, CrosshairMode::Movement);
    assert_eq!(s.frame_size(), (500, 500));
    assert_eq!(s.max_offset, 200.0);
    assert_eq!(s.sensitivity, 0.25);
    assert_eq!(s.path_generation_interval, 20.0);
    assert_eq!(s.tracking_line_mode, TrailMode::Linear);
    assert!(s.enable_idle_recenter);
}

#[test]
fn partial_json_fills_defaults() {
    let json = r#"{ "mode": "coordinate", "max_offset": 120, "tracking_line_mode": "path" }"#;
    let s = OverlaySettings::from_reader(json.as_bytes()).unwrap();
    assert_eq!(s.mode, CrosshairMode::Coordinate);
    assert_eq!(s.max_offset, 120.0);
    assert!(s.path_trail_active());
    assert_eq!(s.box_size, 500);
}

#[test]
fn unknown_keys_are_config_errors() {
    let err = OverlaySettings::from_reader(r#"{ "nope": 1 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, OverlayError::Config(_)));
}

#[test]
fn sanitize_clamps_and_replaces_non_finite() {
    let s = OverlaySettings {
        box_alpha: 3.0,
        circle_alpha: f32::NAN,
        max_offset: -5.0,
        path_lifetime: f64::INFINITY,
        recenter_speed_edge: -1.0,
        sensitivity: f64::NAN,
        ..OverlaySettings::default()
    }
    .sanitized();
    assert_eq!(s.box_alpha, 1.0);
    assert_eq!(s.circle_alpha, 1.0);
    assert_eq!(s.max_offset, 0.0);
    assert_eq!(s.path_lifetime, 2.0);
    assert_eq!(s.recenter_speed_edge, 0.0);
    assert_eq!(s.sensitivity, 0.25);
}

#[test]
fn box_alpha_follows_show_box() {
    let s = OverlaySettings {
        show_box: false,
        box_alpha: 0.7,
        ..OverlaySettings::default()
    };
    assert_eq!(s.effective_box_alpha(), 0.0);
    let s = OverlaySettings {
        show_box: true,
        ..s
    };
    assert_eq!(s.effective_box_alpha(), 0.7);
}

#[test]
fn custom_image_requires_toggle_and_path() {
    let mut s = OverlaySettings {
        custom_image_path: "reticle.png".to_string(),
        ..OverlaySettings::default()
    };
    assert!(s.custom_image().is_none());
    s.show_custom_image = true;
    assert_eq!(s.custom_image(), Some(Path::new("reticle.png")));
    s.custom_image_path = "   ".to_string();
    assert!(s.custom_image().is_none());
}

#[test]
fn json_roundtrip_preserves_settings() {
    let s = OverlaySettings {
        mode: CrosshairMode::Coordinate,
        circle_color: ColorArgb(0x1234_5678),
        ..OverlaySettings::default()
    };
    let json = s.to_json_pretty().unwrap();
    assert!(json.contains("\"mode\": \"coordinate\""));
    assert_eq!(OverlaySettings::from_reader(json.as_bytes()).unwrap(), s);
}
