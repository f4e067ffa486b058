//! sceneline is the timeline core of a 3D scene editor.
//!
//! It turns a declarative scene (objects, keyframes, intro/outro transitions, physics settings)
//! into per-frame resolved state, and bakes rigid-body simulations back into keyframes.
//!
//! # Pipeline overview
//!
//! 1. **Interpolate**: `SceneObject + Property + local time -> PropertyValue` ([`resolve`])
//! 2. **Blend transitions**: intro then outro overlays on the resolved transform and opacity
//! 3. **Evaluate**: `Scene + absolute time -> ResolvedFrame` ([`Evaluator`]), including the active
//!    camera
//! 4. **Bake** (on demand): simulate physics-enabled objects, record, simplify, retime and merge
//!    keyframes back into the scene ([`BakeSession`], [`bake_scene`])
//!
//! Evaluation is pure and never fails for a validated scene. Bakes are deterministic for a given
//! scene and [`SimulationSettings`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod bake;
mod effects;
mod eval;
mod foundation;
mod scene;

pub use animation::ease::{Ease, EaseDir};
pub use animation::interpolate::{Lerp, resolve};
pub use bake::forces::{BakeBody, apply_initial_impulses, apply_source_forces};
pub use bake::pipeline::{
    BakeOutput, BakeReport, BakeSession, BakeStage, BakedObjectReport, BakedTrack, CancelToken,
    bake_scene,
};
pub use bake::retime::retime;
pub use bake::simplify::simplify_indices;
pub use bake::world::{BodyDesc, BodyId, RigidBodySimulator, World};
pub use effects::transitions::{
    TransitionPhase, apply_intro, apply_outro, apply_transitions, window_progress,
};
pub use eval::evaluator::{ActiveCamera, EvalCtx, Evaluator, ResolvedFrame, ResolvedState};
pub use eval::playback::PlaybackClock;
pub use foundation::color::{Color, blend};
pub use foundation::core::{EulerRot, Quat, TimeRange, Vec3};
pub use foundation::error::{SceneError, SceneResult};
pub use scene::dsl::{ObjectBuilder, SceneBuilder};
pub use scene::keyframe::{Keyframe, KeyframeTrack, TIME_EPSILON};
pub use scene::model::Scene;
pub use scene::object::{BaseTransform, ObjectKind, SceneObject};
pub use scene::physics::{
    BodyType, ForcePreset, ForceSettings, MAX_SIMULATION_STEPS, PhysicsSettings, PostEasing,
    SimulationSettings,
};
pub use scene::property::{Property, PropertyMap, PropertyValue, ValueKind};
pub use scene::transition::{TransitionEffect, TransitionKind};
