use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(OverlayError::config("x").to_string().contains("config error:"));
    assert!(
        OverlayError::texture("x")
            .to_string()
            .contains("texture error:")
    );
    assert!(OverlayError::image("x").to_string().contains("image error:"));
    assert!(
        OverlayError::backend("x")
            .to_string()
            .contains("backend error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
