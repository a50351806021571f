/// Overlay settings, defaults and JSON loading.
pub mod settings;
/// Which settings fields apply to the current configuration.
pub mod visibility;
