use crate::eval::evaluator::EvalCtx;

/// Timeline transport: current time, play state and the camera-override latch.
///
/// The latch is set when the user starts orbiting the viewport and survives continuous playback;
/// any explicit seek clears it so timeline cameras take over again.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackClock {
    time: f64,
    duration: f64,
    playing: bool,
    looping: bool,
    camera_override: bool,
}

impl PlaybackClock {
    /// Paused clock at time zero over `[0, duration]`.
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration: duration.max(0.0),
            playing: false,
            looping: false,
            camera_override: false,
        }
    }

    /// Wrap around at the end instead of stopping.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Current absolute time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Timeline length.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Return `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start playback; a clock parked at the end restarts from zero.
    pub fn play(&mut self) {
        if self.time >= self.duration {
            self.time = 0.0;
        }
        self.playing = true;
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Jump to `time` (clamped to the timeline). Clears the camera-override latch.
    pub fn seek(&mut self, time: f64) {
        self.time = if time.is_finite() {
            time.clamp(0.0, self.duration)
        } else {
            0.0
        };
        self.camera_override = false;
        tracing::trace!(time = self.time, "seek");
    }

    /// Advance by `dt` seconds of continuous playback. Keeps the camera-override latch.
    ///
    /// Returns the new time.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !self.playing || !dt.is_finite() || dt <= 0.0 {
            return self.time;
        }
        let next = self.time + dt;
        if next < self.duration {
            self.time = next;
        } else if self.looping && self.duration > 0.0 {
            self.time = next % self.duration;
        } else {
            self.time = self.duration;
            self.playing = false;
        }
        self.time
    }

    /// The user started steering the viewport camera.
    pub fn begin_camera_override(&mut self) {
        self.camera_override = true;
    }

    /// Return `true` while the camera-override latch is set.
    pub fn camera_override_active(&self) -> bool {
        self.camera_override
    }

    /// Context to pass to [`crate::Evaluator::evaluate_scene`].
    pub fn eval_ctx(&self) -> EvalCtx {
        EvalCtx {
            camera_override_active: self.camera_override,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/playback.rs"]
mod tests;
