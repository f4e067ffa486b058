use super::*;
use crate::animation::ease::{Ease, EaseDir};
use crate::scene::keyframe::Keyframe;
use crate::scene::object::ObjectKind;

fn mesh() -> SceneObject {
    SceneObject::new("m", ObjectKind::Mesh, 10.0)
}

fn scalar(v: PropertyValue) -> f64 {
    v.as_scalar().unwrap()
}

#[test]
fn no_keyframes_yields_base() {
    let mut obj = mesh();
    obj.set_base_value(Property::Roughness, 0.8).unwrap();
    for t in [0.0, 3.0, 100.0] {
        assert_eq!(scalar(resolve(&obj, Property::Roughness, t)), 0.8);
    }
}

#[test]
fn opacity_ramps_and_holds() {
    let mut obj = mesh();
    obj.upsert_keyframe(Keyframe::new(0.0).with(Property::Opacity, 0.0))
        .unwrap();
    obj.upsert_keyframe(Keyframe::new(2.0).with(Property::Opacity, 1.0))
        .unwrap();
    assert!((scalar(resolve(&obj, Property::Opacity, 1.0)) - 0.5).abs() < 1e-12);
    assert_eq!(scalar(resolve(&obj, Property::Opacity, 3.0)), 1.0);
}

#[test]
fn endpoints_are_exact() {
    let mut obj = mesh();
    let ease = Ease::Elastic {
        dir: EaseDir::Out,
        amplitude: 1.0,
        period: 0.3,
    };
    obj.upsert_keyframe(Keyframe::new(1.0).with(Property::Metalness, 0.123))
        .unwrap();
    obj.upsert_keyframe(
        Keyframe::new(2.5)
            .with(Property::Metalness, 0.987)
            .eased(ease),
    )
    .unwrap();
    assert_eq!(scalar(resolve(&obj, Property::Metalness, 1.0)), 0.123);
    assert_eq!(scalar(resolve(&obj, Property::Metalness, 2.5)), 0.987);
}

#[test]
fn before_first_keyframe_departs_from_base_at_zero() {
    let mut obj = mesh();
    obj.transform.position = Vec3::ZERO;
    obj.upsert_keyframe(Keyframe::new(2.0).with(Property::Position, Vec3::new(4.0, 0.0, 0.0)))
        .unwrap();
    let p = resolve(&obj, Property::Position, 1.0).as_vec3().unwrap();
    assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
    assert_eq!(
        resolve(&obj, Property::Position, 0.0).as_vec3().unwrap(),
        Vec3::ZERO
    );
}

#[test]
fn unauthored_side_falls_back_to_base() {
    let mut obj = mesh();
    obj.set_base_value(Property::Roughness, 0.5).unwrap();
    obj.upsert_keyframe(Keyframe::new(0.0).with(Property::Roughness, 1.0))
        .unwrap();
    obj.upsert_keyframe(Keyframe::new(2.0).with(Property::Opacity, 0.0))
        .unwrap();
    // Arrival does not author roughness: blend toward the base value.
    assert!((scalar(resolve(&obj, Property::Roughness, 1.0)) - 0.75).abs() < 1e-12);
    // An untouched property stays at its base value.
    assert_eq!(scalar(resolve(&obj, Property::Metalness, 1.0)), 0.2);
}

#[test]
fn arrival_easing_shapes_segment() {
    let mut obj = mesh();
    obj.upsert_keyframe(Keyframe::new(0.0).with(Property::Opacity, 0.0))
        .unwrap();
    obj.upsert_keyframe(
        Keyframe::new(1.0)
            .with(Property::Opacity, 1.0)
            .eased(Ease::Power {
                power: 1,
                dir: EaseDir::In,
            }),
    )
    .unwrap();
    assert!((scalar(resolve(&obj, Property::Opacity, 0.5)) - 0.25).abs() < 1e-12);
}

#[test]
fn colors_blend_with_exact_endpoints() {
    let mut obj = mesh();
    let red = Color::rgb(1.0, 0.0, 0.0);
    let blue = Color::rgb(0.0, 0.0, 1.0);
    obj.upsert_keyframe(Keyframe::new(0.0).with(Property::Color, red))
        .unwrap();
    obj.upsert_keyframe(Keyframe::new(1.0).with(Property::Color, blue))
        .unwrap();
    assert_eq!(resolve(&obj, Property::Color, 0.0).as_color(), Some(red));
    assert_eq!(resolve(&obj, Property::Color, 1.0).as_color(), Some(blue));
    let mid = resolve(&obj, Property::Color, 0.5).as_color().unwrap();
    assert!(mid.r > 0.0 && mid.b > 0.0);
}

#[test]
fn resolve_is_idempotent() {
    let mut obj = mesh();
    obj.upsert_keyframe(Keyframe::new(0.3).with(Property::Opacity, 0.1))
        .unwrap();
    obj.upsert_keyframe(Keyframe::new(1.7).with(Property::Opacity, 0.9))
        .unwrap();
    let a = resolve(&obj, Property::Opacity, 1.1);
    let b = resolve(&obj, Property::Opacity, 1.1);
    assert_eq!(a, b);
}

#[test]
fn lerp_rejects_mismatched_kinds() {
    assert_eq!(
        PropertyValue::lerp(PropertyValue::Scalar(1.0), PropertyValue::Vec3(Vec3::ONE), 0.5),
        None
    );
}
