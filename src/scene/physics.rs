use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::{Ease, EaseDir},
    foundation::core::Vec3,
    foundation::error::{SceneError, SceneResult},
    foundation::math::normalize_or_none,
};

/// Whether a body moves under simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// Moves under gravity, contacts and forces.
    #[default]
    Dynamic,
    /// Immovable collider.
    Static,
}

/// Force applied to a body during a bake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForcePreset {
    /// One-shot impulse along +Y.
    Up,
    /// One-shot impulse along -Y.
    Down,
    /// One-shot impulse along -Z.
    Forward,
    /// One-shot impulse along +Z.
    Backward,
    /// One-shot impulse toward the world origin.
    PullToCenter,
    /// One-shot impulse away from the world origin.
    PushFromCenter,
    /// Continuous force drawing other dynamic bodies toward this one.
    PullTowardSource,
    /// Continuous force pushing other dynamic bodies away from this one.
    PushFromSource,
}

impl ForcePreset {
    /// Return `true` for presets that act on other bodies every step.
    pub fn is_source_relative(self) -> bool {
        matches!(self, Self::PullTowardSource | Self::PushFromSource)
    }

    /// Unit direction of the one-shot impulse for a body at `position`.
    ///
    /// Radial presets yield `None` at the origin; source-relative presets always yield `None`.
    pub fn impulse_direction(self, position: Vec3) -> Option<Vec3> {
        match self {
            Self::Up => Some(Vec3::Y),
            Self::Down => Some(Vec3::NEG_Y),
            Self::Forward => Some(Vec3::NEG_Z),
            Self::Backward => Some(Vec3::Z),
            Self::PullToCenter => normalize_or_none(-position),
            Self::PushFromCenter => normalize_or_none(position),
            Self::PullTowardSource | Self::PushFromSource => None,
        }
    }
}

/// Force preset plus magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceSettings {
    /// Direction rule.
    pub preset: ForcePreset,
    /// Impulse magnitude (N·s) or continuous force magnitude (N).
    #[serde(default = "default_strength")]
    pub strength: f64,
}

fn default_strength() -> f64 {
    5.0
}

/// Per-object physics parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Include this object in bakes.
    pub enabled: bool,
    /// Dynamic or static.
    pub body_type: BodyType,
    /// Mass in kilograms; ignored for static bodies.
    pub mass: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Bounciness in `[0, 1]`.
    pub restitution: f64,
    /// Optional force preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<ForceSettings>,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            body_type: BodyType::Dynamic,
            mass: 1.0,
            friction: 0.3,
            restitution: 0.3,
            force: None,
        }
    }
}

impl PhysicsSettings {
    /// Enabled dynamic body with default parameters.
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// Enabled static collider with default parameters.
    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Static,
            ..Self::default()
        }
    }

    /// Set the force preset.
    pub fn with_force(mut self, preset: ForcePreset, strength: f64) -> Self {
        self.force = Some(ForceSettings { preset, strength });
        self
    }

    /// Return `true` for enabled dynamic bodies.
    pub fn is_dynamic(&self) -> bool {
        self.enabled && self.body_type == BodyType::Dynamic
    }

    /// Reject non-physical parameters.
    pub fn validate(&self) -> SceneResult<()> {
        if self.body_type == BodyType::Dynamic && (!self.mass.is_finite() || self.mass <= 0.0) {
            return Err(SceneError::validation("physics mass must be finite and > 0"));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(SceneError::validation(
                "physics friction must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SceneError::validation(
                "physics restitution must be in [0, 1]",
            ));
        }
        if let Some(force) = self.force
            && !force.strength.is_finite()
        {
            return Err(SceneError::validation("force strength must be finite"));
        }
        Ok(())
    }
}

/// Easing applied to baked keyframe times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostEasing {
    /// Keep simulated timing.
    #[default]
    None,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
}

impl PostEasing {
    /// Easing curve used for retiming, if any.
    pub fn to_ease(self) -> Option<Ease> {
        let dir = match self {
            Self::None => return None,
            Self::EaseIn => EaseDir::In,
            Self::EaseOut => EaseDir::Out,
            Self::EaseInOut => EaseDir::InOut,
        };
        Some(Ease::Power { power: 1, dir })
    }
}

/// Upper bound on `ceil(duration * fps)`; one sample per step is kept for every dynamic body.
pub const MAX_SIMULATION_STEPS: u32 = 1_000_000;

/// Parameters of one bake run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulated span in seconds.
    pub duration: f64,
    /// Recording rate in frames per second.
    pub fps: f64,
    /// Vertical gravity in m/s² (negative pulls down).
    pub gravity: f64,
    /// Multiplier on the integration step; recorded times are unaffected.
    pub time_scale: f64,
    /// Maximum deviation allowed when simplifying; `0` keeps every sample.
    pub simplification_tolerance: f64,
    /// Optional retiming curve.
    pub post_easing: PostEasing,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration: 3.0,
            fps: 60.0,
            gravity: -9.81,
            time_scale: 1.0,
            simplification_tolerance: 0.0,
            post_easing: PostEasing::None,
        }
    }
}

impl SimulationSettings {
    /// Reject settings that cannot drive a simulation.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SceneError::simulation("duration must be finite and > 0"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(SceneError::simulation("fps must be finite and > 0"));
        }
        if !self.gravity.is_finite() {
            return Err(SceneError::simulation("gravity must be finite"));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(SceneError::simulation("time_scale must be finite and > 0"));
        }
        if !self.simplification_tolerance.is_finite() || self.simplification_tolerance < 0.0 {
            return Err(SceneError::simulation(
                "simplification_tolerance must be finite and >= 0",
            ));
        }
        if self.raw_step_count() > f64::from(MAX_SIMULATION_STEPS) {
            return Err(SceneError::simulation(format!(
                "duration * fps exceeds {MAX_SIMULATION_STEPS} simulation steps"
            )));
        }
        Ok(())
    }

    fn raw_step_count(&self) -> f64 {
        // Guards against 0.1 * 30 = 3.0000000000000004.
        (self.duration * self.fps - 1e-9).ceil().max(0.0)
    }

    /// Number of simulation steps, `ceil(duration * fps)`.
    ///
    /// Exact for settings that pass [`validate`](Self::validate).
    pub fn step_count(&self) -> u32 {
        self.raw_step_count().min(f64::from(MAX_SIMULATION_STEPS)) as u32
    }

    /// Recorded time between steps.
    pub fn frame_interval(&self) -> f64 {
        1.0 / self.fps
    }

    /// Integration step fed to the simulator.
    pub fn step_dt(&self) -> f64 {
        self.frame_interval() * self.time_scale
    }

    /// Gravity vector.
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::new(0.0, self.gravity, 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/physics.rs"]
mod tests;
