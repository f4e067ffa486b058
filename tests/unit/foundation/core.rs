use super::*;

#[test]
fn time_range_validation() {
    assert!(TimeRange::new(0.0, 1.0).is_ok());
    assert!(TimeRange::new(1.0, 0.0).is_err());
    assert!(TimeRange::new(f64::NAN, 1.0).is_err());
}

#[test]
fn time_range_is_closed_on_both_ends() {
    let r = TimeRange::starting_at(2.0, 3.0).unwrap();
    assert!(!r.contains(1.999));
    assert!(r.contains(2.0));
    assert!(r.contains(5.0));
    assert!(!r.contains(5.001));
    assert_eq!(r.duration(), 3.0);
}

#[test]
fn time_range_shift_and_clamp() {
    let r = TimeRange::new(1.0, 2.0).unwrap().shift(-1.0);
    assert_eq!(r, TimeRange::new(0.0, 1.0).unwrap());
    assert_eq!(r.clamp(4.0), 1.0);
    assert_eq!(r.clamp(-4.0), 0.0);
}
