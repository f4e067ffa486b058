use super::*;
use crate::animation::ease::EaseDir;
use crate::foundation::core::Vec3;

fn track(times: &[f64]) -> KeyframeTrack {
    KeyframeTrack::from_keyframes(
        times
            .iter()
            .map(|&t| Keyframe::new(t).with(Property::Opacity, t))
            .collect(),
    )
    .unwrap()
}

fn times(track: &KeyframeTrack) -> Vec<f64> {
    track.iter().map(|k| k.time).collect()
}

#[test]
fn from_keyframes_sorts() {
    let t = track(&[2.0, 0.5, 1.0]);
    assert_eq!(times(&t), vec![0.5, 1.0, 2.0]);
}

#[test]
fn from_keyframes_rejects_duplicates_and_bad_times() {
    let dup = vec![Keyframe::new(1.0), Keyframe::new(1.0)];
    assert!(KeyframeTrack::from_keyframes(dup).is_err());
    assert!(KeyframeTrack::from_keyframes(vec![Keyframe::new(-0.1)]).is_err());
    assert!(KeyframeTrack::from_keyframes(vec![Keyframe::new(f64::NAN)]).is_err());
}

#[test]
fn from_keyframes_rejects_wrong_value_shape() {
    let bad = Keyframe::new(0.0).with(Property::Opacity, Vec3::ONE);
    assert!(KeyframeTrack::from_keyframes(vec![bad]).is_err());
}

#[test]
fn bracket_finds_departure_and_arrival() {
    let t = track(&[0.0, 1.0, 2.0]);
    let (d, a) = t.bracket(0.5);
    assert_eq!(d.unwrap().time, 0.0);
    assert_eq!(a.unwrap().time, 1.0);

    let (d, a) = t.bracket(1.0);
    assert_eq!(d.unwrap().time, 1.0);
    assert_eq!(a.unwrap().time, 2.0);

    let (d, a) = t.bracket(5.0);
    assert_eq!(d.unwrap().time, 2.0);
    assert!(a.is_none());

    let t = track(&[1.0]);
    let (d, a) = t.bracket(0.2);
    assert!(d.is_none());
    assert_eq!(a.unwrap().time, 1.0);
}

#[test]
fn upsert_replaces_value_map_at_same_time() {
    let mut t = track(&[0.0, 1.0]);
    t.upsert(
        Keyframe::new(1.0)
            .with(Property::Metalness, 0.9)
            .eased(Ease::Power {
                power: 2,
                dir: EaseDir::In,
            }),
    )
    .unwrap();
    assert_eq!(t.len(), 2);
    let k = t.get_at(1.0).unwrap();
    assert!(!k.values.contains_key(&Property::Opacity));
    assert_eq!(k.values[&Property::Metalness], PropertyValue::Scalar(0.9));
    assert!(matches!(k.easing, Ease::Power { power: 2, .. }));
}

#[test]
fn set_value_merges_into_existing_keyframe() {
    let mut t = track(&[1.0]);
    t.set_value(1.0, Property::Roughness, 0.25).unwrap();
    t.set_value(3.0, Property::Roughness, 0.75).unwrap();
    let k = t.get_at(1.0).unwrap();
    assert_eq!(k.values.len(), 2);
    assert_eq!(times(&t), vec![1.0, 3.0]);
}

#[test]
fn remove_at_drops_only_that_time() {
    let mut t = track(&[0.0, 1.0, 2.0]);
    assert!(t.remove_at(1.0).is_some());
    assert!(t.remove_at(1.0).is_none());
    assert_eq!(times(&t), vec![0.0, 2.0]);
}

#[test]
fn splice_range_replaces_closed_interval() {
    let mut t = track(&[0.0, 1.0, 1.5, 2.0, 3.0]);
    let range = TimeRange::new(1.0, 2.0).unwrap();
    let removed = t
        .splice_range(range, vec![Keyframe::new(1.25), Keyframe::new(1.75)])
        .unwrap();
    assert_eq!(removed, 3);
    assert_eq!(times(&t), vec![0.0, 1.25, 1.75, 3.0]);
}

#[test]
fn splice_range_is_untouched_on_bad_replacement() {
    let mut t = track(&[0.0, 1.0]);
    let range = TimeRange::new(0.0, 1.0).unwrap();
    let err = t.splice_range(range, vec![Keyframe::new(0.5), Keyframe::new(0.5)]);
    assert!(err.is_err());
    assert_eq!(times(&t), vec![0.0, 1.0]);
}

#[test]
fn serde_uses_plain_list() {
    let t = track(&[1.0, 0.0]);
    let json = serde_json::to_value(&t).unwrap();
    assert!(json.is_array());
    let back: KeyframeTrack = serde_json::from_value(json).unwrap();
    assert_eq!(back, t);

    let dup = serde_json::json!([{ "time": 1.0 }, { "time": 1.0 }]);
    assert!(serde_json::from_value::<KeyframeTrack>(dup).is_err());
}

#[test]
fn upsert_keeps_label_unless_replaced() {
    let mut t = KeyframeTrack::new();
    t.upsert(Keyframe::new(1.0).with(Property::Opacity, 0.0).named("fade"))
        .unwrap();
    t.upsert(Keyframe::new(1.0).with(Property::Opacity, 0.5))
        .unwrap();
    assert_eq!(t.get_at(1.0).unwrap().name.as_deref(), Some("fade"));

    t.upsert(Keyframe::new(1.0).with(Property::Opacity, 1.0).named("peak"))
        .unwrap();
    let key = t.get_at(1.0).unwrap();
    assert_eq!(key.name.as_deref(), Some("peak"));
    assert_eq!(key.values[&Property::Opacity], PropertyValue::Scalar(1.0));
}
