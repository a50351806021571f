/// Host-provided inputs: pointer queries, tick input, image decoding.
pub mod host;
/// The overlay instance.
pub mod instance;
/// Resources shared between overlay instances.
pub mod shared;
