/// Fading path trail history.
pub mod path;
