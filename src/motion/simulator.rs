//! Per-tick crosshair offset simulation.
//!
//! Movement mode is a damped integrator: each tick the offset is pulled toward the center by a
//! speed blended between `recenter_speed_center` and `recenter_speed_edge` (plus an idle boost),
//! then the scaled pointer delta is added, the result is clamped to `max_offset`, and the same
//! recenter pull is applied a second time. Coordinate mode is a direct projection of the pointer's
//! position inside its display.
//!
//! Every step is a free function so it can be tested in isolation; [`MotionSimulator::tick`]
//! chains them.

use crate::config::settings::{CrosshairMode, OverlaySettings};
use crate::foundation::core::{Point, Rect, Vec2};

/// Mutable simulation state, one per overlay instance.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerState {
    /// Mode used by the most recent tick.
    pub mode: CrosshairMode,
    /// Displacement of the crosshair from the frame center.
    pub offset: Vec2,
    /// Raw pointer position seen by the previous tick.
    pub last_pointer: Option<Point>,
    /// Seconds since the pointer last moved (only accumulated while idle recentering is enabled).
    pub idle_time: f64,
    /// Recenter speed computed by the most recent movement tick.
    pub current_recenter_speed: f64,
    /// Whether the most recent tick observed pointer movement.
    pub moving: bool,
}

/// Host-provided input for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionInput {
    /// Current raw pointer position.
    pub pointer: Point,
    /// Bounds of the display containing the pointer (coordinate mode only).
    pub display: Option<Rect>,
    /// Seconds since the previous tick.
    pub elapsed_secs: f64,
}

/// Result of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// The pointer position differs from the previous tick.
    pub moved: bool,
    /// Offset after the tick.
    pub offset: Vec2,
}

/// Owns a [`TrackerState`] and advances it one tick at a time.
#[derive(Clone, Debug)]
pub struct MotionSimulator {
    state: TrackerState,
}

impl MotionSimulator {
    /// Create a simulator at rest in the center.
    pub fn new(settings: &OverlaySettings) -> Self {
        Self {
            state: TrackerState {
                mode: settings.mode,
                offset: Vec2::ZERO,
                last_pointer: None,
                idle_time: 0.0,
                current_recenter_speed: settings.recenter_speed_center.max(0.0),
                moving: false,
            },
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Current offset from the frame center.
    pub fn offset(&self) -> Vec2 {
        self.state.offset
    }

    /// Advance one tick. Mode changes in `settings` apply from this tick on.
    pub fn tick(&mut self, settings: &OverlaySettings, input: &MotionInput) -> TickOutcome {
        let dt = sanitize_elapsed(input.elapsed_secs);
        self.state.mode = settings.mode;

        let moved = match settings.mode {
            CrosshairMode::Movement => self.tick_movement(settings, input.pointer, dt),
            CrosshairMode::Coordinate => self.tick_coordinate(settings, input),
        };
        self.state.last_pointer = Some(input.pointer);

        tracing::trace!(
            mode = ?settings.mode,
            moved,
            x = self.state.offset.x,
            y = self.state.offset.y,
            "motion tick"
        );

        TickOutcome {
            moved,
            offset: self.state.offset,
        }
    }

    fn tick_movement(&mut self, s: &OverlaySettings, pointer: Point, dt: f64) -> bool {
        let delta = self.observe_pointer(pointer, dt, s.enable_idle_recenter);
        let moved = self.state.moving;

        let nd = normalized_distance(self.state.offset, s.max_offset);
        let boost = idle_boost(s, self.state.idle_time, moved);
        let speed = blended_recenter_speed(
            s.recenter_speed_center,
            s.recenter_speed_edge,
            boost,
            nd,
        );
        self.state.current_recenter_speed = speed;

        let mut offset = recenter(self.state.offset, speed, dt);
        offset = apply_movement(
            offset,
            delta,
            s.sensitivity,
            s.crosshair_move_speed_center,
        );
        offset = clamp_offset(offset, s.max_offset);
        offset = recenter(offset, self.state.current_recenter_speed, dt);

        self.state.offset = offset;
        moved
    }

    fn tick_coordinate(&mut self, s: &OverlaySettings, input: &MotionInput) -> bool {
        let moved = self
            .state
            .last_pointer
            .is_some_and(|last| last != input.pointer);
        self.state.moving = moved;

        if let Some(rect) = input.display {
            self.state.offset = coordinate_offset(input.pointer, rect, s.max_offset);
        }
        moved
    }

    /// Record the new pointer position and update idle tracking. Returns the pointer delta.
    ///
    /// The first observation primes the baseline and reports a zero delta.
    pub fn observe_pointer(&mut self, pointer: Point, dt: f64, idle_enabled: bool) -> Vec2 {
        let delta = match self.state.last_pointer {
            Some(last) => pointer - last,
            None => Vec2::ZERO,
        };

        if delta.x != 0.0 || delta.y != 0.0 {
            self.state.moving = true;
            self.state.idle_time = 0.0;
        } else {
            self.state.moving = false;
            if idle_enabled {
                self.state.idle_time += dt;
            } else {
                self.state.idle_time = 0.0;
            }
        }
        self.state.last_pointer = Some(pointer);
        delta
    }
}

/// `|offset| / max_offset` clamped to `[0, 1]`; zero when `max_offset` is zero.
pub fn normalized_distance(offset: Vec2, max_offset: f64) -> f64 {
    if max_offset > 0.0 {
        (offset.hypot() / max_offset).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Extra recenter speed earned by holding the pointer still.
pub fn idle_boost(s: &OverlaySettings, idle_time: f64, moving: bool) -> f64 {
    if !s.enable_idle_recenter || moving {
        return 0.0;
    }
    if s.idle_recenter_delay != 0.0 && idle_time < s.idle_recenter_delay {
        return 0.0;
    }
    let progress = if s.idle_recenter_time > 0.0 {
        ((idle_time - s.idle_recenter_delay) / s.idle_recenter_time).clamp(0.0, 1.0)
    } else {
        1.0
    };
    s.idle_recenter_boost * progress
}

/// Blend the boosted center and edge speeds by normalized distance; never negative.
pub fn blended_recenter_speed(center: f64, edge: f64, boost: f64, normalized: f64) -> f64 {
    let c = center + boost;
    let e = edge + boost;
    (c + (e - c) * normalized).max(0.0)
}

/// Scale the offset toward zero by `max(0, 1 - speed * dt)`.
pub fn recenter(offset: Vec2, speed: f64, dt: f64) -> Vec2 {
    if speed <= 0.0 {
        return offset;
    }
    offset * (1.0 - speed * dt).max(0.0)
}

/// Add the scaled pointer delta.
pub fn apply_movement(offset: Vec2, delta: Vec2, sensitivity: f64, move_speed: f64) -> Vec2 {
    offset + delta * (sensitivity * move_speed)
}

/// Clamp each axis to `[-max_offset, max_offset]`.
pub fn clamp_offset(offset: Vec2, max_offset: f64) -> Vec2 {
    let m = max_offset.max(0.0);
    Vec2::new(offset.x.clamp(-m, m), offset.y.clamp(-m, m))
}

/// Project a pointer inside `display` onto `[-max_offset, max_offset]` per axis.
///
/// Zero-sized display axes map to the center; pointers outside the display clamp to the bound.
pub fn coordinate_offset(pointer: Point, display: Rect, max_offset: f64) -> Vec2 {
    fn axis(p: f64, origin: f64, size: f64, max_offset: f64) -> f64 {
        if size.abs() < f64::EPSILON {
            return 0.0;
        }
        let relative = (p - origin) / size;
        (relative * 2.0 - 1.0) * max_offset
    }

    let origin = display.origin();
    let size = display.size();
    clamp_offset(
        Vec2::new(
            axis(pointer.x, origin.x, size.width, max_offset),
            axis(pointer.y, origin.y, size.height, max_offset),
        ),
        max_offset,
    )
}

fn sanitize_elapsed(dt: f64) -> f64 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/simulator.rs"]
mod tests;
