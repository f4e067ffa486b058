use super::*;
use crate::foundation::core::Vec3;
use crate::scene::object::ObjectKind;
use crate::scene::property::PropertyMap;

fn state(scale: f64, opacity: f64) -> ResolvedState {
    let mut values = PropertyMap::new();
    values.insert(Property::Opacity, PropertyValue::Scalar(opacity));
    ResolvedState {
        id: "s".into(),
        kind: ObjectKind::Mesh,
        local_time: 0.0,
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::splat(scale),
        values,
    }
}

fn opacity(s: &ResolvedState) -> f64 {
    s.values[&Property::Opacity].as_scalar().unwrap()
}

#[test]
fn intro_scale_multiplies_resolved_scale() {
    let effect = TransitionEffect::custom(1.0).fading().scaled(0.5);
    let mut s = state(2.0, 1.0);
    apply_intro(&mut s, &effect, 0.5);
    assert!((s.scale - Vec3::splat(1.5)).length() < 1e-12);
    assert!((opacity(&s) - 0.5).abs() < 1e-12);
}

#[test]
fn intro_window_is_half_open() {
    let effect = TransitionEffect::custom(1.0).delayed(0.5).offset(Vec3::X);
    assert_eq!(
        window_progress(&effect, TransitionPhase::Intro, 0.4, 5.0),
        None
    );
    assert_eq!(
        window_progress(&effect, TransitionPhase::Intro, 0.5, 5.0),
        Some(0.0)
    );
    assert_eq!(
        window_progress(&effect, TransitionPhase::Intro, 1.5, 5.0),
        None
    );

    let mut s = state(1.0, 1.0);
    apply_intro(&mut s, &effect, 0.5);
    assert_eq!(s.position, Vec3::X);
}

#[test]
fn outro_window_mirrors_from_clip_end() {
    let effect = TransitionEffect::custom(1.0).delayed(0.5);
    assert_eq!(
        window_progress(&effect, TransitionPhase::Outro, 3.4, 5.0),
        None
    );
    assert_eq!(
        window_progress(&effect, TransitionPhase::Outro, 3.5, 5.0),
        Some(0.0)
    );
    assert!(window_progress(&effect, TransitionPhase::Outro, 4.0, 5.0).is_some());
    assert_eq!(
        window_progress(&effect, TransitionPhase::Outro, 4.5, 5.0),
        None
    );
}

#[test]
fn outro_moves_toward_offset() {
    let effect = TransitionEffect::custom(2.0)
        .fading()
        .scaled(0.0)
        .offset(Vec3::new(0.0, 4.0, 0.0))
        .rotated(Vec3::new(0.0, 90.0, 0.0));
    let mut s = state(1.0, 0.8);
    apply_outro(&mut s, &effect, 9.0, 10.0);
    assert!((s.position.y - 2.0).abs() < 1e-12);
    assert!((s.rotation.y - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    assert!((s.scale.x - 0.5).abs() < 1e-12);
    assert!((opacity(&s) - 0.4).abs() < 1e-12);
}

#[test]
fn none_kind_is_inert() {
    let mut effect = TransitionEffect::custom(1.0).fading().scaled(0.0);
    effect.kind = crate::scene::transition::TransitionKind::None;
    let mut s = state(1.0, 1.0);
    apply_intro(&mut s, &effect, 0.2);
    assert_eq!(s, state(1.0, 1.0));
}

#[test]
fn intro_and_outro_compose_on_short_clips() {
    let mut obj = SceneObject::new("a", ObjectKind::Mesh, 0.3);
    obj.intro = TransitionEffect::custom(0.4).fading().scaled(0.5);
    obj.outro = TransitionEffect::custom(0.4).fading().scaled(0.5);

    let t = 0.2;
    let e_in = window_progress(&obj.intro, TransitionPhase::Intro, t, 0.3).unwrap();
    let e_out = window_progress(&obj.outro, TransitionPhase::Outro, t, 0.3).unwrap();

    let mut s = state(1.0, 1.0);
    apply_transitions(&mut s, &obj, t);

    let scale_in = (1.0 - e_in) * 0.5 + e_in;
    let scale_out = (1.0 - e_out) + e_out * 0.5;
    assert!((s.scale.x - scale_in * scale_out).abs() < 1e-12);
    assert!((opacity(&s) - e_in * (1.0 - e_out)).abs() < 1e-12);
}
