/// Keyed texture slots and the path-dot alpha ramp.
pub mod cache;
/// Procedural ring and disc bitmaps.
pub mod raster;
