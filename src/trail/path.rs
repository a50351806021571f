use crate::foundation::core::{Point, Timestamp, secs_to_nanos};
use std::collections::VecDeque;

/// Hard cap on retained path points, independent of configuration.
pub const MAX_PATH_POINTS: usize = 1000;

/// Number of discrete fade levels (0%, 5%, ..., 100%).
pub const FADE_BUCKETS: usize = 21;

/// A historical crosshair center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    /// Rendered crosshair center (frame center plus offset) at creation.
    pub position: Point,
    /// Creation time.
    pub created_at: Timestamp,
}

impl PathPoint {
    /// Nanoseconds since creation.
    pub fn age_ns(&self, now: Timestamp) -> u64 {
        now.saturating_since(self.created_at)
    }
}

/// Per-tick parameters for [`PathTrail::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStep {
    /// Current rendered crosshair center.
    pub center: Point,
    /// Whether the pointer moved this tick.
    pub pointer_moved: bool,
    /// Current time.
    pub now: Timestamp,
    /// Point lifetime in seconds.
    pub lifetime_secs: f64,
    /// Minimum distance between consecutive points in pixels.
    pub spacing_px: f64,
}

/// Ordered, time-bounded history of crosshair centers. Oldest at the front.
#[derive(Clone, Debug, Default)]
pub struct PathTrail {
    points: VecDeque<PathPoint>,
}

impl PathTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    /// Number of retained points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when no points are retained.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &PathPoint> {
        self.points.iter()
    }

    /// Newest point.
    pub fn tail(&self) -> Option<&PathPoint> {
        self.points.back()
    }

    /// Drop all points.
    pub fn clear(&mut self) {
        if !self.points.is_empty() {
            tracing::debug!(dropped = self.points.len(), "path trail cleared");
        }
        self.points.clear();
    }

    /// Evict expired points, then possibly append the current center. Returns `true` if a point
    /// was appended.
    pub fn advance(&mut self, step: &TrailStep) -> bool {
        let lifetime_ns = secs_to_nanos(step.lifetime_secs);
        self.evict_expired(step.now, lifetime_ns);
        if !step.pointer_moved {
            return false;
        }
        self.maybe_insert(step.center, step.now, step.spacing_px)
    }

    /// Remove every point older than `lifetime_ns`. Returns the number removed.
    ///
    /// Timestamps are non-decreasing front to back, so expiry is a prefix trim.
    pub fn evict_expired(&mut self, now: Timestamp, lifetime_ns: u64) -> usize {
        let keep_from = self
            .points
            .iter()
            .position(|p| p.age_ns(now) <= lifetime_ns)
            .unwrap_or(self.points.len());
        self.points.drain(..keep_from);
        keep_from
    }

    /// Append `center` if the trail is empty or the tail is at least `spacing_px` away, and the
    /// cap has not been reached.
    pub fn maybe_insert(&mut self, center: Point, now: Timestamp, spacing_px: f64) -> bool {
        let far_enough = match self.points.back() {
            None => true,
            Some(tail) => tail.position.distance(center) >= spacing_px,
        };
        if !far_enough || self.points.len() >= MAX_PATH_POINTS {
            return false;
        }

        // A host clock that steps backwards must not break the ordering invariant.
        let created_at = match self.points.back() {
            Some(tail) if tail.created_at > now => tail.created_at,
            _ => now,
        };
        self.points.push_back(PathPoint {
            position: center,
            created_at,
        });
        true
    }
}

/// Fade-ramp bucket for a point of the given age.
///
/// `fade = 1 - age / lifetime` clamped to `[0, 1]` (zero lifetime fades fully), mapped to the
/// nearest of [`FADE_BUCKETS`] levels.
pub fn fade_bucket(age_ns: u64, lifetime_ns: u64) -> usize {
    let ratio = if lifetime_ns > 0 {
        age_ns as f64 / lifetime_ns as f64
    } else {
        1.0
    };
    fade_bucket_for_ratio(ratio)
}

/// Bucket for an arbitrary age/lifetime ratio; out-of-range and non-finite ratios clamp.
pub fn fade_bucket_for_ratio(age_ratio: f64) -> usize {
    let ratio = if age_ratio.is_nan() {
        1.0
    } else {
        age_ratio.clamp(0.0, 1.0)
    };
    let fade = 1.0 - ratio;
    let last = (FADE_BUCKETS - 1) as f64;
    (fade * last).round().clamp(0.0, last) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/trail/path.rs"]
mod tests;
