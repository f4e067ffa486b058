use crate::foundation::core::{EulerRot, Quat, Vec3};

/// Euler order shared by the model (degrees) and the simulator (quaternions).
pub(crate) const EULER_ORDER: EulerRot = EulerRot::XYZ;

/// Below this length a vector or chord is treated as degenerate.
pub(crate) const DEGENERATE_LEN: f64 = 1e-12;

pub(crate) fn deg_to_rad(v: Vec3) -> Vec3 {
    Vec3::new(v.x.to_radians(), v.y.to_radians(), v.z.to_radians())
}

pub(crate) fn rad_to_deg(v: Vec3) -> Vec3 {
    Vec3::new(v.x.to_degrees(), v.y.to_degrees(), v.z.to_degrees())
}

/// Orientation from Euler angles in radians.
pub(crate) fn quat_from_euler_rad(euler: Vec3) -> Quat {
    Quat::from_euler(EULER_ORDER, euler.x, euler.y, euler.z)
}

/// Euler angles in degrees from an orientation.
pub(crate) fn quat_to_euler_deg(q: Quat) -> Vec3 {
    let (x, y, z) = q.to_euler(EULER_ORDER);
    rad_to_deg(Vec3::new(x, y, z))
}

/// Unit vector along `v`, or `None` when `v` is (near) zero length.
pub(crate) fn normalize_or_none(v: Vec3) -> Option<Vec3> {
    let len = v.length();
    if !len.is_finite() || len <= DEGENERATE_LEN {
        return None;
    }
    Some(v / len)
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Returns `None` when `a` and `b` coincide.
pub(crate) fn distance_to_line(p: Vec3, a: Vec3, b: Vec3) -> Option<f64> {
    let chord = b - a;
    let len = chord.length();
    if len <= DEGENERATE_LEN {
        return None;
    }
    Some((p - a).cross(chord).length() / len)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
