use super::*;

#[test]
fn smoothstep_edges_and_midpoint() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn smoothstep_reversed_edges_fall() {
    // Used for the outer anti-aliasing band of discs.
    assert_eq!(smoothstep(10.0, 9.0, 9.0), 1.0);
    assert_eq!(smoothstep(10.0, 9.0, 10.0), 0.0);
    assert!(smoothstep(10.0, 9.0, 9.25) > smoothstep(10.0, 9.0, 9.75));
}

#[test]
fn premultiply_rounds_and_zeroes_transparent() {
    let mut px = [100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0
        ]
    );
}

#[test]
fn mul_div255_identity_at_full_scale() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(77, 255), 77);
    assert_eq!(mul_div255_u8(77, 0), 0);
}

#[test]
fn unpremultiply_restores_opaque_color_channels() {
    let mut px = [64u8, 0, 128, 128, 10, 20, 30, 255, 5, 5, 5, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 0, 255, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..], &[5, 5, 5, 0]);
}
