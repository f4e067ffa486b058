use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{TimeRange, Vec3},
    foundation::error::{SceneError, SceneResult},
    scene::keyframe::{Keyframe, KeyframeTrack},
    scene::physics::PhysicsSettings,
    scene::property::{Property, PropertyMap, PropertyValue},
    scene::transition::TransitionEffect,
};

/// Kind of scene object; decides which properties are animatable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Generic PBR mesh.
    Mesh,
    /// Flat or curved image plane.
    ImagePlane,
    /// Flat or curved video plane.
    VideoPlane,
    /// Imported 3D model.
    Model,
    /// Extruded 2D vector shape.
    VectorShape,
    /// Positional audio source.
    PointAudio,
    /// Camera.
    Camera,
    /// Light source.
    Light,
}

impl ObjectKind {
    /// Non-transform properties this kind can animate.
    pub fn animatable(self) -> &'static [Property] {
        use Property::*;
        match self {
            Self::Mesh => &[
                Opacity,
                Color,
                Metalness,
                Roughness,
                Transmission,
                Ior,
                Thickness,
                Clearcoat,
                ClearcoatRoughness,
            ],
            Self::ImagePlane => &[Opacity, Curvature],
            Self::VideoPlane => &[Opacity, Curvature, Volume],
            Self::Model => &[Opacity, Metalness, Roughness],
            Self::VectorShape => &[Opacity, Color, Extrusion, PathLength, Metalness, Roughness],
            Self::PointAudio => &[Volume],
            Self::Camera => &[Fov],
            Self::Light => &[Color, LightIntensity],
        }
    }

    /// Return `true` when `property` applies to this kind.
    pub fn supports(self, property: Property) -> bool {
        property.is_transform() || self.animatable().contains(&property)
    }
}

/// Base (un-keyframed) transform of an object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseTransform {
    /// World position.
    pub position: Vec3,
    /// Euler rotation in degrees.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for BaseTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

fn default_visible() -> bool {
    true
}

/// An entity on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Author-controlled visibility toggle.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Timeline start in seconds.
    #[serde(default)]
    pub start_time: f64,
    /// Timeline duration in seconds.
    pub duration: f64,
    /// Base transform.
    #[serde(default)]
    pub transform: BaseTransform,
    /// Base values of non-transform properties.
    #[serde(default)]
    pub properties: PropertyMap,
    /// Keyframes in object-local time.
    #[serde(default)]
    pub keyframes: KeyframeTrack,
    /// Intro effect.
    #[serde(default)]
    pub intro: TransitionEffect,
    /// Outro effect.
    #[serde(default)]
    pub outro: TransitionEffect,
    /// Physics parameters; `None` excludes the object from bakes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsSettings>,
}

impl SceneObject {
    /// Visible object of `kind` starting at zero.
    pub fn new(id: impl Into<String>, kind: ObjectKind, duration: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            visible: true,
            start_time: 0.0,
            duration,
            transform: BaseTransform::default(),
            properties: PropertyMap::new(),
            keyframes: KeyframeTrack::new(),
            intro: TransitionEffect::default(),
            outro: TransitionEffect::default(),
            physics: None,
        }
    }

    /// Absolute `[start, start + duration]` window.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.start_time + self.duration,
        }
    }

    /// Convert absolute time into object-local time.
    pub fn local_time(&self, absolute: f64) -> f64 {
        absolute - self.start_time
    }

    /// Base value of `property`, falling back to the property default.
    pub fn base_value(&self, property: Property) -> PropertyValue {
        match property {
            Property::Position => PropertyValue::Vec3(self.transform.position),
            Property::Rotation => PropertyValue::Vec3(self.transform.rotation),
            Property::Scale => PropertyValue::Vec3(self.transform.scale),
            _ => self
                .properties
                .get(&property)
                .copied()
                .and_then(|v| v.conform(property))
                .unwrap_or_else(|| property.default_value()),
        }
    }

    /// Set a base value, checking it against the kind and property shape.
    pub fn set_base_value(
        &mut self,
        property: Property,
        value: impl Into<PropertyValue>,
    ) -> SceneResult<()> {
        let value = self.conform(property, value.into())?;
        match (property, value) {
            (Property::Position, PropertyValue::Vec3(v)) => self.transform.position = v,
            (Property::Rotation, PropertyValue::Vec3(v)) => self.transform.rotation = v,
            (Property::Scale, PropertyValue::Vec3(v)) => self.transform.scale = v,
            _ => {
                self.properties.insert(property, value);
            }
        }
        Ok(())
    }

    fn conform(&self, property: Property, value: PropertyValue) -> SceneResult<PropertyValue> {
        if !self.kind.supports(property) {
            return Err(SceneError::validation(format!(
                "object '{}' ({:?}) has no '{property}' property",
                self.id, self.kind
            )));
        }
        match value.conform(property) {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(SceneError::validation(format!(
                "object '{}': invalid value for '{property}'",
                self.id
            ))),
        }
    }

    fn check_keyframe(&self, key: &Keyframe) -> SceneResult<()> {
        if let Some(p) = key.values.keys().find(|p| !self.kind.supports(**p)) {
            return Err(SceneError::validation(format!(
                "object '{}' ({:?}): keyframe at t={} sets unsupported property '{p}'",
                self.id, self.kind, key.time
            )));
        }
        Ok(())
    }

    /// Insert or replace the keyframe at its time.
    pub fn upsert_keyframe(&mut self, key: Keyframe) -> SceneResult<()> {
        self.check_keyframe(&key)?;
        self.keyframes.upsert(key)
    }

    /// Merge a batch of keyframes; nothing changes when any of them is rejected.
    ///
    /// Keyframes at times already on the track replace the existing ones. Returns the number of
    /// keyframes merged.
    pub fn import_keyframes(&mut self, keys: Vec<Keyframe>) -> SceneResult<usize> {
        let batch = KeyframeTrack::from_keyframes(keys)?;
        for key in &batch {
            self.check_keyframe(key)?;
        }
        let count = batch.len();
        let mut track = self.keyframes.clone();
        for key in Vec::from(batch) {
            track.upsert(key)?;
        }
        self.keyframes = track;
        Ok(count)
    }

    /// Parse a JSON keyframe list and merge it with [`Self::import_keyframes`].
    pub fn import_keyframes_json(&mut self, json: &str) -> SceneResult<usize> {
        let keys: Vec<Keyframe> = serde_json::from_str(json)?;
        self.import_keyframes(keys)
    }

    /// Validate timing, base values, keyframes, transitions and physics.
    pub fn validate(&self) -> SceneResult<()> {
        if self.id.trim().is_empty() {
            return Err(SceneError::validation("object id must be non-empty"));
        }
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            return Err(SceneError::validation(format!(
                "object '{}': start_time must be finite and >= 0",
                self.id
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SceneError::validation(format!(
                "object '{}': duration must be finite and >= 0",
                self.id
            )));
        }
        let t = &self.transform;
        if !t.position.is_finite() || !t.rotation.is_finite() || !t.scale.is_finite() {
            return Err(SceneError::validation(format!(
                "object '{}': transform must be finite",
                self.id
            )));
        }
        for (property, value) in &self.properties {
            if property.is_transform() {
                return Err(SceneError::validation(format!(
                    "object '{}': '{property}' belongs in the transform",
                    self.id
                )));
            }
            self.conform(*property, *value)?;
        }
        for key in &self.keyframes {
            self.check_keyframe(key)?;
        }
        self.intro.validate()?;
        self.outro.validate()?;
        if let Some(physics) = &self.physics {
            physics.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
