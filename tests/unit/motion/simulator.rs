use super::*;

fn still_settings() -> OverlaySettings {
    OverlaySettings {
        recenter_speed_center: 0.0,
        recenter_speed_edge: 0.0,
        enable_idle_recenter: false,
        ..OverlaySettings::default()
    }
}

fn input(x: f64, y: f64, dt: f64) -> MotionInput {
    MotionInput {
        pointer: Point::new(x, y),
        display: None,
        elapsed_secs: dt,
    }
}

#[test]
fn single_delta_without_recentering_scales_by_sensitivity() {
    let s = OverlaySettings {
        max_offset: 200.0,
        sensitivity: 0.25,
        crosshair_move_speed_center: 1.0,
        ..still_settings()
    };
    let mut sim = MotionSimulator::new(&s);
    sim.tick(&s, &input(500.0, 500.0, 1.0));
    let out = sim.tick(&s, &input(600.0, 500.0, 1.0));
    assert!(out.moved);
    assert_eq!(out.offset, Vec2::new(25.0, 0.0));
}

#[test]
fn first_observation_primes_baseline() {
    let s = still_settings();
    let mut sim = MotionSimulator::new(&s);
    let out = sim.tick(&s, &input(1000.0, -300.0, 0.016));
    assert!(!out.moved);
    assert_eq!(out.offset, Vec2::ZERO);
    assert_eq!(sim.state().last_pointer, Some(Point::new(1000.0, -300.0)));
}

#[test]
fn offset_stays_within_bounds_for_wild_deltas() {
    let s = OverlaySettings {
        max_offset: 50.0,
        sensitivity: 3.0,
        ..OverlaySettings::default()
    };
    let mut sim = MotionSimulator::new(&s);
    let deltas = [
        (0.0, 0.0),
        (9000.0, -40.0),
        (-120.0, 7000.0),
        (3.0, 3.0),
        (-9999.0, -9999.0),
        (0.0, 0.0),
        (42.0, -42.0),
    ];
    let mut p = Point::ZERO;
    for (i, (dx, dy)) in deltas.iter().enumerate() {
        p += Vec2::new(*dx, *dy);
        let dt = if i % 2 == 0 { 0.016 } else { 0.9 };
        let out = sim.tick(&s, &MotionInput {
            pointer: p,
            display: None,
            elapsed_secs: dt,
        });
        assert!(out.offset.x.abs() <= 50.0, "x out of bounds: {:?}", out.offset);
        assert!(out.offset.y.abs() <= 50.0, "y out of bounds: {:?}", out.offset);
    }
}

#[test]
fn huge_recenter_speed_never_flips_sign() {
    let s = OverlaySettings {
        recenter_speed_center: 100.0,
        recenter_speed_edge: 100.0,
        enable_idle_recenter: false,
        ..OverlaySettings::default()
    };
    let mut sim = MotionSimulator::new(&s);
    sim.tick(&s, &input(0.0, 0.0, 0.5));
    let out = sim.tick(&s, &input(400.0, 0.0, 0.5));
    assert!(out.offset.x >= 0.0);
    assert!(out.offset.x.abs() <= s.max_offset);
}

#[test]
fn idle_ticks_never_increase_offset() {
    let s = OverlaySettings {
        enable_idle_recenter: false,
        ..OverlaySettings::default()
    };
    let mut sim = MotionSimulator::new(&s);
    sim.tick(&s, &input(0.0, 0.0, 0.016));
    sim.tick(&s, &input(300.0, -150.0, 0.016));

    let mut prev = sim.offset().hypot();
    assert!(prev > 0.0);
    for _ in 0..60 {
        let out = sim.tick(&s, &input(300.0, -150.0, 0.1));
        assert!(!out.moved);
        let mag = out.offset.hypot();
        assert!(mag <= prev);
        prev = mag;
    }
    assert!(prev < 1.0);
}

#[test]
fn double_recenter_is_applied_before_and_after_movement() {
    let s = OverlaySettings {
        recenter_speed_center: 0.5,
        recenter_speed_edge: 0.5,
        enable_idle_recenter: false,
        sensitivity: 1.0,
        crosshair_move_speed_center: 1.0,
        max_offset: 1000.0,
        ..OverlaySettings::default()
    };
    let mut sim = MotionSimulator::new(&s);
    sim.tick(&s, &input(0.0, 0.0, 0.1));
    sim.tick(&s, &input(100.0, 0.0, 0.1));
    // Offset before: 0 -> recenter(0) + 100 -> 100 * 0.95 = 95.
    assert!((sim.offset().x - 95.0).abs() < 1e-9);

    sim.tick(&s, &input(110.0, 0.0, 0.1));
    // 95 * 0.95 + 10 = 100.25, then * 0.95 = 95.2375.
    assert!((sim.offset().x - 95.2375).abs() < 1e-9);
}

#[test]
fn idle_time_accumulates_once_per_tick_and_resets_on_motion() {
    let s = OverlaySettings::default();
    let mut sim = MotionSimulator::new(&s);
    sim.tick(&s, &input(10.0, 10.0, 0.25));
    sim.tick(&s, &input(10.0, 10.0, 0.25));
    sim.tick(&s, &input(10.0, 10.0, 0.25));
    assert!((sim.state().idle_time - 0.75).abs() < 1e-12);

    sim.tick(&s, &input(11.0, 10.0, 0.25));
    assert_eq!(sim.state().idle_time, 0.0);
    assert!(sim.state().moving);
}

#[test]
fn idle_time_stays_zero_when_idle_recenter_disabled() {
    let s = OverlaySettings {
        enable_idle_recenter: false,
        ..OverlaySettings::default()
    };
    let mut sim = MotionSimulator::new(&s);
    for _ in 0..5 {
        sim.tick(&s, &input(1.0, 1.0, 0.5));
    }
    assert_eq!(sim.state().idle_time, 0.0);
}

#[test]
fn idle_boost_ramps_linearly() {
    let s = OverlaySettings {
        enable_idle_recenter: true,
        idle_recenter_delay: 0.0,
        idle_recenter_time: 2.0,
        idle_recenter_boost: 10.0,
        ..OverlaySettings::default()
    };
    assert_eq!(idle_boost(&s, 1.0, false), 5.0);
    assert_eq!(idle_boost(&s, 5.0, false), 10.0);
    assert_eq!(idle_boost(&s, 1.0, true), 0.0);
}

#[test]
fn idle_boost_waits_for_delay() {
    let s = OverlaySettings {
        enable_idle_recenter: true,
        idle_recenter_delay: 0.5,
        idle_recenter_time: 1.0,
        idle_recenter_boost: 4.0,
        ..OverlaySettings::default()
    };
    assert_eq!(idle_boost(&s, 0.4, false), 0.0);
    assert_eq!(idle_boost(&s, 1.0, false), 2.0);
}

#[test]
fn zero_ramp_time_gives_full_boost_immediately() {
    let s = OverlaySettings {
        enable_idle_recenter: true,
        idle_recenter_delay: 0.1,
        idle_recenter_time: 0.0,
        idle_recenter_boost: 3.0,
        ..OverlaySettings::default()
    };
    assert_eq!(idle_boost(&s, 0.1, false), 3.0);
}

#[test]
fn zero_max_offset_degrades_to_center_speed() {
    assert_eq!(normalized_distance(Vec2::new(30.0, 40.0), 0.0), 0.0);
    assert_eq!(normalized_distance(Vec2::new(30.0, 40.0), 100.0), 0.5);
    assert_eq!(normalized_distance(Vec2::new(300.0, 400.0), 100.0), 1.0);
    assert_eq!(blended_recenter_speed(0.75, 1.5, 0.0, 0.0), 0.75);
    assert_eq!(blended_recenter_speed(0.75, 1.5, 1.0, 1.0), 2.5);
    assert_eq!(blended_recenter_speed(-3.0, -3.0, 0.0, 0.5), 0.0);
}

#[test]
fn coordinate_mode_maps_display_center_to_zero() {
    let s = OverlaySettings {
        mode: CrosshairMode::Coordinate,
        max_offset: 200.0,
        ..OverlaySettings::default()
    };
    let mut sim = MotionSimulator::new(&s);
    let out = sim.tick(&s, &MotionInput {
        pointer: Point::new(960.0, 540.0),
        display: Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)),
        elapsed_secs: 0.016,
    });
    assert_eq!(out.offset, Vec2::ZERO);
}

#[test]
fn coordinate_mode_maps_corners_and_secondary_displays() {
    let display = Rect::new(1920.0, 0.0, 3840.0, 1080.0);
    assert_eq!(
        coordinate_offset(Point::new(1920.0, 0.0), display, 100.0),
        Vec2::new(-100.0, -100.0)
    );
    assert_eq!(
        coordinate_offset(Point::new(3360.0, 810.0), display, 100.0),
        Vec2::new(50.0, 50.0)
    );
    assert_eq!(
        coordinate_offset(Point::new(9999.0, 0.0), display, 100.0).x,
        100.0
    );
    let flat = Rect::new(0.0, 0.0, 0.0, 100.0);
    assert_eq!(coordinate_offset(Point::new(0.0, 25.0), flat, 100.0).x, 0.0);
}

#[test]
fn coordinate_mode_without_display_keeps_offset() {
    let mut s = OverlaySettings::default();
    let mut sim = MotionSimulator::new(&s);
    sim.tick(&s, &input(0.0, 0.0, 0.016));
    sim.tick(&s, &input(80.0, 0.0, 0.016));
    let before = sim.offset();

    s.mode = CrosshairMode::Coordinate;
    let out = sim.tick(&s, &input(90.0, 0.0, 0.016));
    assert!(out.moved);
    assert_eq!(out.offset, before);
    assert_eq!(sim.state().mode, CrosshairMode::Coordinate);
}
