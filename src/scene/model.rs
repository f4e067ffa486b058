use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{SceneError, SceneResult},
    scene::object::SceneObject,
};

/// Timeline of scene objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Authored timeline length in seconds; `0` means "up to the last object".
    #[serde(default)]
    pub duration: f64,
    /// Objects in scene order.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Parse and validate a scene document.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the scene and every object; object ids must be unique.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SceneError::validation(
                "scene duration must be finite and >= 0",
            ));
        }
        let mut seen = BTreeSet::new();
        for obj in &self.objects {
            obj.validate()?;
            if !seen.insert(obj.id.as_str()) {
                return Err(SceneError::validation(format!(
                    "duplicate object id '{}'",
                    obj.id
                )));
            }
        }
        Ok(())
    }

    /// Timeline end: the authored duration or the last object end, whichever is later.
    pub fn end_time(&self) -> f64 {
        self.objects
            .iter()
            .map(|o| o.time_range().end)
            .fold(self.duration, f64::max)
    }

    /// Object with `id`.
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Mutable object with `id`.
    pub fn object_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Object with `id`, or a validation error naming it.
    pub fn require(&self, id: &str) -> SceneResult<&SceneObject> {
        self.object(id)
            .ok_or_else(|| SceneError::validation(format!("unknown object id '{id}'")))
    }

    /// Mutable variant of [`Self::require`].
    pub fn require_mut(&mut self, id: &str) -> SceneResult<&mut SceneObject> {
        self.object_mut(id)
            .ok_or_else(|| SceneError::validation(format!("unknown object id '{id}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
