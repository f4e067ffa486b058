use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::TimeRange,
    foundation::error::{SceneError, SceneResult},
    scene::property::{Property, PropertyMap, PropertyValue},
};

/// Two keyframe times closer than this are the same time.
pub const TIME_EPSILON: f64 = 1e-9;

/// Snapshot of a subset of properties at one object-local time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Object-local time in seconds (`>= 0`).
    pub time: f64,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Easing applied to the segment that arrives at this keyframe.
    #[serde(default)]
    pub easing: Ease,
    /// Authored values; properties not listed here fall back to the object's base value.
    #[serde(default)]
    pub values: PropertyMap,
}

impl Keyframe {
    /// Empty linear keyframe at `time`.
    pub fn new(time: f64) -> Self {
        Self {
            time,
            name: None,
            easing: Ease::Linear,
            values: PropertyMap::new(),
        }
    }

    /// Set one property value.
    pub fn with(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.values.insert(property, value.into());
        self
    }

    /// Set the arrival easing.
    pub fn eased(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }

    /// Set the display label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Coerce values into their property's shape and reject anything malformed.
    pub fn normalized(mut self) -> SceneResult<Self> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(SceneError::validation(format!(
                "keyframe time must be finite and >= 0, got {}",
                self.time
            )));
        }
        self.easing.validate()?;
        let time = self.time;
        for (property, value) in self.values.iter_mut() {
            let kind = value.kind();
            *value = value.conform(*property).ok_or_else(|| {
                SceneError::validation(format!(
                    "keyframe at t={time} has a {kind:?} value for '{property}', expected {:?}",
                    property.value_kind()
                ))
            })?;
            if !value.is_finite() {
                return Err(SceneError::validation(format!(
                    "keyframe at t={time} has a non-finite '{property}' value"
                )));
            }
        }
        Ok(self)
    }
}

/// Keyframes of one object, kept sorted by time with no two keys at the same time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeTrack {
    keys: Vec<Keyframe>,
}

impl KeyframeTrack {
    /// Empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from keyframes in any order.
    ///
    /// Fails when a keyframe is malformed or two keyframes share a time.
    pub fn from_keyframes(keys: Vec<Keyframe>) -> SceneResult<Self> {
        let mut keys = keys
            .into_iter()
            .map(Keyframe::normalized)
            .collect::<SceneResult<Vec<_>>>()?;
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        if let Some(w) = keys
            .windows(2)
            .find(|w| (w[1].time - w[0].time).abs() <= TIME_EPSILON)
        {
            return Err(SceneError::validation(format!(
                "duplicate keyframe time {}",
                w[0].time
            )));
        }
        Ok(Self { keys })
    }

    /// Keyframes in time order.
    pub fn as_slice(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Iterate keyframes in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keys.iter()
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Return `true` when the track has no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn position_of(&self, time: f64) -> Result<usize, usize> {
        let idx = self.keys.partition_point(|k| k.time < time - TIME_EPSILON);
        match self.keys.get(idx) {
            Some(k) if (k.time - time).abs() <= TIME_EPSILON => Ok(idx),
            _ => Err(idx),
        }
    }

    /// Keyframe at `time`, if one exists.
    pub fn get_at(&self, time: f64) -> Option<&Keyframe> {
        self.position_of(time).ok().map(|i| &self.keys[i])
    }

    /// Departure and arrival keyframes around `time`.
    ///
    /// The departure is the latest keyframe at or before `time`; the arrival is the first one
    /// strictly after it.
    pub fn bracket(&self, time: f64) -> (Option<&Keyframe>, Option<&Keyframe>) {
        let idx = self.keys.partition_point(|k| k.time <= time);
        let departure = idx.checked_sub(1).map(|i| &self.keys[i]);
        (departure, self.keys.get(idx))
    }

    /// Insert a keyframe, replacing the one already at its time.
    ///
    /// A replaced keyframe keeps its label unless the new one carries its own.
    pub fn upsert(&mut self, key: Keyframe) -> SceneResult<()> {
        let key = key.normalized()?;
        match self.position_of(key.time) {
            Ok(i) => {
                let existing = &mut self.keys[i];
                existing.name = key.name.or_else(|| existing.name.take());
                existing.easing = key.easing;
                existing.values = key.values;
            }
            Err(i) => self.keys.insert(i, key),
        }
        Ok(())
    }

    /// Set one property at `time`, creating a linear keyframe when none exists there.
    pub fn set_value(
        &mut self,
        time: f64,
        property: Property,
        value: impl Into<PropertyValue>,
    ) -> SceneResult<()> {
        match self.position_of(time) {
            Ok(i) => {
                let key = self.keys[i].clone().with(property, value).normalized()?;
                self.keys[i] = key;
                Ok(())
            }
            Err(_) => self.upsert(Keyframe::new(time).with(property, value)),
        }
    }

    /// Remove and return the keyframe at `time`.
    pub fn remove_at(&mut self, time: f64) -> Option<Keyframe> {
        self.position_of(time).ok().map(|i| self.keys.remove(i))
    }

    /// Drop every keyframe inside `range` (inclusive) and insert `replacement`.
    ///
    /// Replacement keyframes are checked before anything is removed. Returns the number of
    /// keyframes removed.
    pub fn splice_range(
        &mut self,
        range: TimeRange,
        replacement: Vec<Keyframe>,
    ) -> SceneResult<usize> {
        let replacement = Self::from_keyframes(replacement)?;
        let before = self.keys.len();
        self.keys
            .retain(|k| !(range.start - TIME_EPSILON..=range.end + TIME_EPSILON).contains(&k.time));
        let removed = before - self.keys.len();
        for key in replacement.keys {
            self.upsert(key)?;
        }
        Ok(removed)
    }
}

impl TryFrom<Vec<Keyframe>> for KeyframeTrack {
    type Error = SceneError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::from_keyframes(keys)
    }
}

impl From<KeyframeTrack> for Vec<Keyframe> {
    fn from(track: KeyframeTrack) -> Self {
        track.keys
    }
}

impl<'a> IntoIterator for &'a KeyframeTrack {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/keyframe.rs"]
mod tests;
