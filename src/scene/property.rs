use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::foundation::{color::Color, core::Vec3};

/// Identifier of an animatable property.
///
/// Transform properties (`position`, `rotation`, `scale`) apply to every object kind; the rest are
/// gated per kind by [`crate::ObjectKind::animatable`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// World position.
    Position,
    /// Euler rotation in degrees.
    Rotation,
    /// Per-axis scale.
    Scale,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// PBR metalness.
    Metalness,
    /// PBR roughness.
    Roughness,
    /// PBR transmission.
    Transmission,
    /// Index of refraction.
    Ior,
    /// Transmission thickness.
    Thickness,
    /// Clearcoat layer intensity.
    Clearcoat,
    /// Clearcoat layer roughness.
    #[serde(alias = "clearcoatRoughness")]
    ClearcoatRoughness,
    /// Curvature of image/video planes.
    Curvature,
    /// Audio volume.
    Volume,
    /// Extrusion depth of vector shapes.
    Extrusion,
    /// Visible fraction of a vector path.
    #[serde(alias = "pathLength")]
    PathLength,
    /// Base color.
    Color,
    /// Light intensity.
    #[serde(alias = "lightIntensity", alias = "intensity")]
    LightIntensity,
    /// Camera vertical field of view in degrees.
    Fov,
}

/// Shape of the value stored for a [`Property`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// One number.
    Scalar,
    /// Three numbers.
    Vec3,
    /// A color.
    Color,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Position,
        Self::Rotation,
        Self::Scale,
        Self::Opacity,
        Self::Metalness,
        Self::Roughness,
        Self::Transmission,
        Self::Ior,
        Self::Thickness,
        Self::Clearcoat,
        Self::ClearcoatRoughness,
        Self::Curvature,
        Self::Volume,
        Self::Extrusion,
        Self::PathLength,
        Self::Color,
        Self::LightIntensity,
        Self::Fov,
    ];

    /// Transform properties shared by every kind.
    pub const TRANSFORM: [Self; 3] = [Self::Position, Self::Rotation, Self::Scale];

    /// Return `true` for position, rotation and scale.
    pub fn is_transform(self) -> bool {
        matches!(self, Self::Position | Self::Rotation | Self::Scale)
    }

    /// Value shape expected for this property.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Position | Self::Rotation | Self::Scale => ValueKind::Vec3,
            Self::Color => ValueKind::Color,
            _ => ValueKind::Scalar,
        }
    }

    /// Value used when an object does not author this property.
    pub fn default_value(self) -> PropertyValue {
        use PropertyValue::Scalar;
        match self {
            Self::Position | Self::Rotation => PropertyValue::Vec3(Vec3::ZERO),
            Self::Scale => PropertyValue::Vec3(Vec3::ONE),
            Self::Color => PropertyValue::Color(Color::WHITE),
            Self::Opacity => Scalar(1.0),
            Self::Metalness => Scalar(0.2),
            Self::Roughness => Scalar(0.5),
            Self::Transmission => Scalar(0.0),
            Self::Ior => Scalar(1.5),
            Self::Thickness => Scalar(0.0),
            Self::Clearcoat => Scalar(0.0),
            Self::ClearcoatRoughness => Scalar(0.0),
            Self::Curvature => Scalar(0.0),
            Self::Volume => Scalar(1.0),
            Self::Extrusion => Scalar(0.0),
            Self::PathLength => Scalar(1.0),
            Self::LightIntensity => Scalar(1.0),
            Self::Fov => Scalar(50.0),
        }
    }

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
            Self::Opacity => "opacity",
            Self::Metalness => "metalness",
            Self::Roughness => "roughness",
            Self::Transmission => "transmission",
            Self::Ior => "ior",
            Self::Thickness => "thickness",
            Self::Clearcoat => "clearcoat",
            Self::ClearcoatRoughness => "clearcoat_roughness",
            Self::Curvature => "curvature",
            Self::Volume => "volume",
            Self::Extrusion => "extrusion",
            Self::PathLength => "path_length",
            Self::Color => "color",
            Self::LightIntensity => "light_intensity",
            Self::Fov => "fov",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property value: number, 3-vector, or color.
///
/// JSON form: a number, a `[x, y, z]` array, or a color (`"#rrggbb"` / `{r, g, b}`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Scalar value.
    Scalar(f64),
    /// Vector value.
    Vec3(Vec3),
    /// Color value.
    Color(Color),
}

impl PropertyValue {
    /// Shape of this value.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vec3(_) => ValueKind::Vec3,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Return `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Vec3(v) => v.is_finite(),
            Self::Color(c) => c.r.is_finite() && c.g.is_finite() && c.b.is_finite(),
        }
    }

    /// Coerce this value into the shape `property` expects.
    ///
    /// A `[r, g, b]` array reads as a vector in JSON, so vectors are accepted for color
    /// properties. Any other mismatch yields `None`.
    pub fn conform(self, property: Property) -> Option<Self> {
        match (property.value_kind(), self) {
            (ValueKind::Color, Self::Vec3(v)) => Some(Self::Color(Color::rgb(v.x, v.y, v.z))),
            (kind, v) if kind == v.kind() => Some(v),
            _ => None,
        }
    }

    /// Scalar payload, if this is a scalar.
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Vector payload, if this is a vector.
    pub fn as_vec3(self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(v),
            _ => None,
        }
    }

    /// Color payload, if this is a color.
    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec3> for PropertyValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<[f64; 3]> for PropertyValue {
    fn from(v: [f64; 3]) -> Self {
        Self::Vec3(Vec3::from_array(v))
    }
}

impl From<Color> for PropertyValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

/// Partial map of authored property values.
pub type PropertyMap = BTreeMap<Property, PropertyValue>;

#[cfg(test)]
#[path = "../../tests/unit/scene/property.rs"]
mod tests;
