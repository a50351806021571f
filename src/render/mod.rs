/// Graphics capability trait and resource handles.
pub mod backend;
/// Layer drawing for one overlay frame.
pub mod compositor;
/// `vello_cpu` reference backend.
pub mod cpu;
/// Call-recording backend for headless hosts and tests.
pub mod record;
