use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::Vec3,
    foundation::error::{SceneError, SceneResult},
};

/// Whether an intro/outro is applied at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// No transition.
    #[default]
    None,
    /// Offsets and fade described by the effect fields.
    Custom,
}

/// Intro or outro effect of a scene object.
///
/// Offsets describe the state at the far end of the transition: where an intro starts from, or
/// where an outro ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionEffect {
    /// Effect kind; `none` disables the other fields.
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Seconds between the clip edge and the effect window.
    pub delay: f64,
    /// Effect window length in seconds.
    pub duration: f64,
    /// Fade opacity along with the motion.
    pub fade: bool,
    /// Scale multiplier at the far end.
    pub scale: f64,
    /// Position offset at the far end.
    pub position: Vec3,
    /// Rotation offset at the far end, in degrees.
    pub rotation: Vec3,
    /// Easing of the effect progress.
    pub easing: Ease,
}

impl Default for TransitionEffect {
    fn default() -> Self {
        Self {
            kind: TransitionKind::None,
            delay: 0.0,
            duration: 0.0,
            fade: false,
            scale: 1.0,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            easing: Ease::Linear,
        }
    }
}

impl TransitionEffect {
    /// Custom effect with the given window length and no offsets.
    pub fn custom(duration: f64) -> Self {
        Self {
            kind: TransitionKind::Custom,
            duration,
            ..Self::default()
        }
    }

    /// Set the delay.
    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Enable fading.
    pub fn fading(mut self) -> Self {
        self.fade = true;
        self
    }

    /// Set the far-end scale multiplier.
    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the far-end position offset.
    pub fn offset(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the far-end rotation offset in degrees.
    pub fn rotated(mut self, rotation_deg: Vec3) -> Self {
        self.rotation = rotation_deg;
        self
    }

    /// Set the easing.
    pub fn eased(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }

    /// Return `true` when the effect contributes anything.
    pub fn is_active(&self) -> bool {
        self.kind == TransitionKind::Custom && self.duration > 0.0
    }

    /// Reject negative or non-finite timing and offsets.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(SceneError::validation("transition delay must be finite and >= 0"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SceneError::validation(
                "transition duration must be finite and >= 0",
            ));
        }
        if !self.scale.is_finite() || !self.position.is_finite() || !self.rotation.is_finite() {
            return Err(SceneError::validation("transition offsets must be finite"));
        }
        self.easing.validate()
    }
}
