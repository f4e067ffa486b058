use super::*;

#[test]
fn builds_valid_scene() {
    let cube = ObjectBuilder::new("cube", ObjectKind::Mesh, 3.0)
        .name("Cube")
        .start(1.0)
        .position(Vec3::new(0.0, 2.0, 0.0))
        .base(Property::Roughness, 0.1)
        .keyframe(Keyframe::new(0.0).with(Property::Opacity, 0.0))
        .keyframe(Keyframe::new(1.0).with(Property::Opacity, 1.0))
        .build()
        .unwrap();
    assert_eq!(cube.keyframes.len(), 2);
    assert_eq!(cube.base_value(Property::Roughness), PropertyValue::Scalar(0.1));

    let scene = SceneBuilder::new("demo")
        .duration(5.0)
        .object(cube)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(scene.objects.len(), 1);
}

#[test]
fn duplicate_ids_are_rejected_early() {
    let a = ObjectBuilder::new("a", ObjectKind::Light, 1.0).build().unwrap();
    let res = SceneBuilder::new("demo")
        .object(a.clone())
        .unwrap()
        .object(a);
    assert!(res.is_err());
}

#[test]
fn unsupported_keyframe_property_fails_build() {
    let res = ObjectBuilder::new("cam", ObjectKind::Camera, 1.0)
        .keyframe(Keyframe::new(0.0).with(Property::Opacity, 0.5))
        .build();
    assert!(res.is_err());
}
