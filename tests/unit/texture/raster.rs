use super::*;

const CYAN: ColorArgb = ColorArgb(0xFF00_FFFF);

#[test]
fn ring_dimensions_follow_radius_and_thickness() {
    let bmp = ring_rgba8(10, 4, CYAN, 1.0).unwrap();
    assert_eq!((bmp.width, bmp.height), (28, 28));
    assert_eq!(bmp.data.len(), 28 * 28 * 4);
}

#[test]
fn ring_band_is_opaque_and_hole_is_clear() {
    let bmp = ring_rgba8(10, 4, CYAN, 1.0).unwrap();
    assert_eq!(bmp.pixel(26, 14), [0, 255, 255, 255]);
    assert_eq!(bmp.pixel(14, 14)[3], 0);
    assert_eq!(bmp.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn ring_alpha_scales_band() {
    let bmp = ring_rgba8(10, 4, CYAN, 0.5).unwrap();
    assert_eq!(bmp.pixel(26, 14)[3], 127);
}

#[test]
fn ring_edges_are_antialiased() {
    let bmp = ring_rgba8(20, 6, CYAN, 1.0).unwrap();
    let c = bmp.width / 2;
    // Row through the center: alpha rises across the inner edge and falls across the outer edge.
    let inner_mid = bmp.pixel(c + 20, c)[3];
    let band = bmp.pixel(c + 23, c)[3];
    let outer = bmp.pixel(c + 26, c)[3];
    assert_eq!(inner_mid, 0);
    assert_eq!(band, 255);
    assert_eq!(outer, 0);
    assert_eq!(bmp.pixel(c + 21, c)[3], 255);
}

#[test]
fn disc_is_filled_with_soft_edge() {
    let bmp = disc_rgba8(8, ColorArgb(0xFF00_FF00), 1.0).unwrap();
    assert_eq!((bmp.width, bmp.height), (16, 16));
    assert_eq!(bmp.pixel(8, 8), [0, 255, 0, 255]);
    assert_eq!(bmp.pixel(15, 8)[3], 255);
    assert_eq!(bmp.pixel(8, 0)[3], 0);
    assert_eq!(bmp.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn disc_alpha_levels() {
    let bmp = disc_rgba8(4, ColorArgb::WHITE, 0.05).unwrap();
    assert_eq!(bmp.pixel(4, 4)[3], 12);
    let bmp = disc_rgba8(4, ColorArgb::WHITE, 0.0).unwrap();
    assert!(bmp.data.chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn degenerate_sizes_are_texture_errors() {
    assert!(matches!(
        disc_rgba8(0, CYAN, 1.0),
        Err(OverlayError::Texture(_))
    ));
    assert!(ring_rgba8(0, 0, CYAN, 1.0).is_err());
    assert!(ring_rgba8(u32::MAX, 1, CYAN, 1.0).is_err());
    assert!(disc_rgba8(MAX_BITMAP_EDGE, CYAN, 1.0).is_err());
}
