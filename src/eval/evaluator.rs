use rayon::prelude::*;

use crate::{
    animation::interpolate::resolve,
    effects::transitions::apply_transitions,
    foundation::core::{Quat, Vec3},
    foundation::math::{deg_to_rad, quat_from_euler_rad, rad_to_deg},
    scene::model::Scene,
    scene::object::{ObjectKind, SceneObject},
    scene::property::{Property, PropertyMap, PropertyValue},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully resolved state of one object at one instant.
pub struct ResolvedState {
    /// Object identifier.
    pub id: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Object-local time the state was resolved at.
    pub local_time: f64,
    /// Resolved position.
    pub position: Vec3,
    /// Resolved Euler rotation in radians.
    pub rotation: Vec3,
    /// Resolved scale.
    pub scale: Vec3,
    /// Every non-transform property the kind animates.
    pub values: PropertyMap,
}

impl ResolvedState {
    /// Resolved value of `property`, including transform properties.
    ///
    /// Rotation is reported in degrees, like authored values.
    pub fn value(&self, property: Property) -> Option<PropertyValue> {
        match property {
            Property::Position => Some(PropertyValue::Vec3(self.position)),
            Property::Rotation => Some(PropertyValue::Vec3(self.rotation_deg())),
            Property::Scale => Some(PropertyValue::Vec3(self.scale)),
            _ => self.values.get(&property).copied(),
        }
    }

    /// Resolved scalar property.
    pub fn scalar(&self, property: Property) -> Option<f64> {
        self.value(property).and_then(PropertyValue::as_scalar)
    }

    /// Resolved opacity, if the kind has one.
    pub fn opacity(&self) -> Option<f64> {
        self.scalar(Property::Opacity)
    }

    /// Rotation in degrees.
    pub fn rotation_deg(&self) -> Vec3 {
        rad_to_deg(self.rotation)
    }

    /// Rotation as a quaternion.
    pub fn orientation(&self) -> Quat {
        quat_from_euler_rad(self.rotation)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Camera that drives the viewport for a frame.
pub struct ActiveCamera {
    /// Camera object identifier.
    pub id: String,
    /// Resolved position.
    pub position: Vec3,
    /// Resolved Euler rotation in radians.
    pub rotation: Vec3,
    /// Resolved vertical field of view in degrees.
    pub fov: f64,
}

impl ActiveCamera {
    fn from_state(state: &ResolvedState) -> Self {
        Self {
            id: state.id.clone(),
            position: state.position,
            rotation: state.rotation,
            fov: state
                .scalar(Property::Fov)
                .or_else(|| Property::Fov.default_value().as_scalar())
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Caller-owned evaluation context.
pub struct EvalCtx {
    /// The user is steering the viewport camera; timeline cameras must not take it over.
    pub camera_override_active: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Every visible object of a scene at one absolute time.
pub struct ResolvedFrame {
    /// Absolute time of the frame.
    pub time: f64,
    /// Visible objects in scene order.
    pub states: Vec<ResolvedState>,
    /// Camera that should drive the viewport, if any.
    pub active_camera: Option<ActiveCamera>,
}

impl ResolvedFrame {
    /// State of object `id`, if it is visible in this frame.
    pub fn state(&self, id: &str) -> Option<&ResolvedState> {
        self.states.iter().find(|s| s.id == id)
    }
}

/// Stateless evaluator from the declarative scene to resolved states.
pub struct Evaluator;

impl Evaluator {
    /// Resolve `object` at absolute time `absolute_time`.
    ///
    /// Returns `None` when the object is hidden or `absolute_time` is outside
    /// `[start_time, start_time + duration]`.
    pub fn evaluate(object: &SceneObject, absolute_time: f64) -> Option<ResolvedState> {
        if !object.visible || !object.time_range().contains(absolute_time) {
            return None;
        }
        Some(Self::resolve_at(object, object.local_time(absolute_time)))
    }

    /// Resolve `object` at object-local time, skipping the visibility gate.
    pub fn resolve_at(object: &SceneObject, local_time: f64) -> ResolvedState {
        let vec3 = |property: Property, fallback: Vec3| {
            resolve(object, property, local_time)
                .as_vec3()
                .unwrap_or(fallback)
        };
        let values = object
            .kind
            .animatable()
            .iter()
            .map(|&p| (p, resolve(object, p, local_time)))
            .collect();

        let mut state = ResolvedState {
            id: object.id.clone(),
            kind: object.kind,
            local_time,
            position: vec3(Property::Position, object.transform.position),
            rotation: deg_to_rad(vec3(Property::Rotation, object.transform.rotation)),
            scale: vec3(Property::Scale, object.transform.scale),
            values,
        };
        apply_transitions(&mut state, object, local_time);
        state
    }

    #[tracing::instrument(skip(scene), fields(objects = scene.objects.len()))]
    /// Resolve every object of `scene` at `absolute_time`.
    ///
    /// Objects are evaluated in parallel against the same snapshot and reported in scene order.
    /// The last visible camera becomes the active camera unless `ctx` says the user is steering
    /// the viewport.
    pub fn evaluate_scene(scene: &Scene, absolute_time: f64, ctx: EvalCtx) -> ResolvedFrame {
        let states: Vec<ResolvedState> = scene
            .objects
            .par_iter()
            .filter_map(|o| Self::evaluate(o, absolute_time))
            .collect();

        let active_camera = if ctx.camera_override_active {
            None
        } else {
            states
                .iter()
                .rev()
                .find(|s| s.kind == ObjectKind::Camera)
                .map(ActiveCamera::from_state)
        };

        ResolvedFrame {
            time: absolute_time,
            states,
            active_camera,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
