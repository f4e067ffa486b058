use crate::foundation::error::{SceneError, SceneResult};

pub use glam::{DQuat as Quat, DVec3 as Vec3, EulerRot};

/// Closed time range `[start, end]` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Inclusive range start.
    pub start: f64,
    /// Inclusive range end.
    pub end: f64,
}

impl TimeRange {
    /// Create a validated range with finite bounds and `start <= end`.
    pub fn new(start: f64, end: f64) -> SceneResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SceneError::validation("TimeRange bounds must be finite"));
        }
        if start > end {
            return Err(SceneError::validation("TimeRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Range starting at `start` and lasting `duration` seconds.
    pub fn starting_at(start: f64, duration: f64) -> SceneResult<Self> {
        Self::new(start, start + duration)
    }

    /// Length of the range in seconds.
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when `t` is inside `[start, end]`.
    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    /// Clamp `t` into the range.
    pub fn clamp(self, t: f64) -> f64 {
        t.clamp(self.start, self.end)
    }

    /// Shift both bounds by `delta` seconds.
    pub fn shift(self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
