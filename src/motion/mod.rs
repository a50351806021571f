/// Per-tick crosshair offset simulation.
pub mod simulator;
