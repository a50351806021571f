use super::*;

#[test]
fn argb_channels() {
    let c = ColorArgb(0x80_11_22_33);
    assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x80, 0x11, 0x22, 0x33));
}

#[test]
fn obs_rgba_conversion_swaps_red_and_blue() {
    // Opaque blue in the host's packing is 0xFFFF0000.
    let blue = ColorArgb::from_obs_rgba(0xFFFF_0000);
    assert_eq!(blue, ColorArgb(0xFF00_00FF));
    assert_eq!(blue.to_obs_rgba(), 0xFFFF_0000);

    let c = ColorArgb(0x7F12_3456);
    assert_eq!(ColorArgb::from_obs_rgba(c.to_obs_rgba()), c);
}

#[test]
fn timestamp_age_saturates() {
    let t0 = Timestamp(1_000);
    assert_eq!(Timestamp(400).saturating_since(t0), 0);
    assert_eq!(Timestamp(1_500).saturating_since(t0), 500);
}

#[test]
fn secs_to_nanos_guards_degenerate_inputs() {
    assert_eq!(secs_to_nanos(2.0), 2_000_000_000);
    assert_eq!(secs_to_nanos(-1.0), 0);
    assert_eq!(secs_to_nanos(f64::NAN), 0);
    assert_eq!(Timestamp(5).after_secs(f64::INFINITY), Timestamp(5));
}
