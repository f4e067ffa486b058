use std::collections::BTreeSet;

use crate::{
    foundation::core::Vec3,
    foundation::error::{SceneError, SceneResult},
    scene::keyframe::Keyframe,
    scene::model::Scene,
    scene::object::{ObjectKind, SceneObject},
    scene::physics::PhysicsSettings,
    scene::property::{Property, PropertyValue},
    scene::transition::TransitionEffect,
};

/// Fluent builder for [`Scene`].
pub struct SceneBuilder {
    name: String,
    duration: f64,
    ids: BTreeSet<String>,
    objects: Vec<SceneObject>,
}

impl SceneBuilder {
    /// Start an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: 0.0,
            ids: BTreeSet::new(),
            objects: Vec::new(),
        }
    }

    /// Set the authored duration.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Append an object.
    pub fn object(mut self, object: SceneObject) -> SceneResult<Self> {
        if !self.ids.insert(object.id.clone()) {
            return Err(SceneError::validation(format!(
                "duplicate object id '{}'",
                object.id
            )));
        }
        self.objects.push(object);
        Ok(self)
    }

    /// Finish and validate.
    pub fn build(self) -> SceneResult<Scene> {
        let scene = Scene {
            name: self.name,
            duration: self.duration,
            objects: self.objects,
        };
        scene.validate()?;
        Ok(scene)
    }
}

/// Fluent builder for [`SceneObject`].
pub struct ObjectBuilder {
    object: SceneObject,
    base: Vec<(Property, PropertyValue)>,
    keys: Vec<Keyframe>,
}

impl ObjectBuilder {
    /// Start an object of `kind` lasting `duration` seconds.
    pub fn new(id: impl Into<String>, kind: ObjectKind, duration: f64) -> Self {
        Self {
            object: SceneObject::new(id, kind, duration),
            base: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.object.name = name.into();
        self
    }

    /// Set the timeline start.
    pub fn start(mut self, start_time: f64) -> Self {
        self.object.start_time = start_time;
        self
    }

    /// Hide the object.
    pub fn hidden(mut self) -> Self {
        self.object.visible = false;
        self
    }

    /// Set the base position.
    pub fn position(mut self, position: Vec3) -> Self {
        self.object.transform.position = position;
        self
    }

    /// Set the base rotation in degrees.
    pub fn rotation(mut self, rotation_deg: Vec3) -> Self {
        self.object.transform.rotation = rotation_deg;
        self
    }

    /// Set the base scale.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.object.transform.scale = scale;
        self
    }

    /// Set a base property value.
    pub fn base(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.base.push((property, value.into()));
        self
    }

    /// Add a keyframe.
    pub fn keyframe(mut self, key: Keyframe) -> Self {
        self.keys.push(key);
        self
    }

    /// Set the intro effect.
    pub fn intro(mut self, effect: TransitionEffect) -> Self {
        self.object.intro = effect;
        self
    }

    /// Set the outro effect.
    pub fn outro(mut self, effect: TransitionEffect) -> Self {
        self.object.outro = effect;
        self
    }

    /// Attach physics parameters.
    pub fn physics(mut self, physics: PhysicsSettings) -> Self {
        self.object.physics = Some(physics);
        self
    }

    /// Finish and validate.
    pub fn build(self) -> SceneResult<SceneObject> {
        let mut object = self.object;
        for (property, value) in self.base {
            object.set_base_value(property, value)?;
        }
        object.import_keyframes(self.keys)?;
        object.validate()?;
        Ok(object)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
