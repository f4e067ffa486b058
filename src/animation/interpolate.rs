use crate::{
    animation::ease::Ease,
    foundation::color::{self, Color},
    foundation::core::Vec3,
    scene::keyframe::Keyframe,
    scene::object::SceneObject,
    scene::property::{Property, PropertyValue},
};

/// Linear blend between two values of the same type.
pub trait Lerp: Sized {
    /// Blend `a` toward `b` by `t` (`0` yields `a`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        *a + (*b - *a) * t
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        color::blend(*a, *b, t)
    }
}

impl PropertyValue {
    /// Blend two values of the same kind; `None` when the kinds differ.
    pub fn lerp(a: Self, b: Self, t: f64) -> Option<Self> {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Some(Self::Scalar(Lerp::lerp(&a, &b, t))),
            (Self::Vec3(a), Self::Vec3(b)) => Some(Self::Vec3(Lerp::lerp(&a, &b, t))),
            (Self::Color(a), Self::Color(b)) => Some(Self::Color(Lerp::lerp(&a, &b, t))),
            _ => None,
        }
    }
}

/// Value of `property` on `object` at object-local time `local_time`.
///
/// Keyframes are walked as segments: the latest keyframe at or before `local_time` is the
/// departure, the first keyframe after it the arrival. Before the first keyframe an implicit
/// keyframe at time zero holding the base values departs. A side that does not author the
/// property contributes the base value. Progress is shaped by the arrival keyframe's easing.
///
/// With no keyframes, or when the two sides disagree on the value kind, the base value is
/// returned.
pub fn resolve(object: &SceneObject, property: Property, local_time: f64) -> PropertyValue {
    let base = object.base_value(property);
    if object.keyframes.is_empty() {
        return base;
    }

    let (departure, arrival) = object.keyframes.bracket(local_time);
    let arrival = arrival.or(departure);
    let side = |key: Option<&Keyframe>| {
        key.and_then(|k| k.values.get(&property))
            .copied()
            .unwrap_or(base)
    };

    let from = side(departure);
    let to = side(arrival);
    let from_time = departure.map_or(0.0, |k| k.time);
    let (to_time, easing) = arrival.map_or((from_time, Ease::Linear), |k| (k.time, k.easing));

    let span = to_time - from_time;
    let progress = if span > 0.0 {
        (local_time - from_time) / span
    } else {
        1.0
    };

    PropertyValue::lerp(from, to, easing.apply(progress)).unwrap_or(base)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
