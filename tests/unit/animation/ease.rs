use super::*;

fn all_families() -> Vec<Ease> {
    let mut out = vec![Ease::Linear, Ease::Steps(4)];
    for dir in [EaseDir::In, EaseDir::Out, EaseDir::InOut] {
        for power in 1..=4 {
            out.push(Ease::Power { power, dir });
        }
        out.push(Ease::Sine(dir));
        out.push(Ease::Expo(dir));
        out.push(Ease::Circ(dir));
        out.push(Ease::Back {
            dir,
            overshoot: BACK_OVERSHOOT,
        });
        out.push(Ease::Bounce(dir));
        out.push(Ease::Elastic {
            dir,
            amplitude: 1.0,
            period: 0.3,
        });
    }
    out.push("ease-in-out".parse().unwrap());
    out
}

#[test]
fn endpoints_are_exact() {
    for ease in all_families() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in [
        Ease::Linear,
        Ease::Power {
            power: 1,
            dir: EaseDir::In,
        },
        Ease::Power {
            power: 2,
            dir: EaseDir::Out,
        },
        Ease::Sine(EaseDir::InOut),
        Ease::Expo(EaseDir::In),
        Ease::Circ(EaseDir::Out),
    ] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease}");
        assert!(b < c, "{ease}");
    }
}

#[test]
fn polynomial_shapes() {
    let quad_in: Ease = "power1.in".parse().unwrap();
    assert!((quad_in.apply(0.5) - 0.25).abs() < 1e-12);

    let cubic_out: Ease = "cubic.out".parse().unwrap();
    assert!((cubic_out.apply(0.5) - 0.875).abs() < 1e-12);

    let in_out: Ease = "power1.inOut".parse().unwrap();
    assert!((in_out.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((in_out.apply(0.25) - 0.125).abs() < 1e-12);
}

#[test]
fn back_and_elastic_overshoot() {
    let back: Ease = "back.out(1.7)".parse().unwrap();
    let peak = (1..100)
        .map(|i| back.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let elastic: Ease = "elastic.out(1, 0.75)".parse().unwrap();
    assert_eq!(
        elastic,
        Ease::Elastic {
            dir: EaseDir::Out,
            amplitude: 1.0,
            period: 0.75
        }
    );
    let peak = (1..100)
        .map(|i| elastic.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn bounce_stays_in_unit_range() {
    let bounce: Ease = "bounce.out".parse().unwrap();
    for i in 0..=100 {
        let v = bounce.apply(f64::from(i) / 100.0);
        assert!((0.0..=1.0 + 1e-12).contains(&v));
    }
}

#[test]
fn steps_are_discrete() {
    let steps: Ease = "steps(4)".parse().unwrap();
    assert_eq!(steps.apply(0.2), 0.0);
    assert_eq!(steps.apply(0.3), 0.25);
    assert_eq!(steps.apply(0.99), 0.75);
}

#[test]
fn missing_direction_defaults_to_out() {
    let e: Ease = "sine".parse().unwrap();
    assert_eq!(e, Ease::Sine(EaseDir::Out));
    let e: Ease = "none".parse().unwrap();
    assert_eq!(e, Ease::Linear);
}

#[test]
fn css_aliases_parse_to_bezier() {
    let e: Ease = "ease-in".parse().unwrap();
    assert!(matches!(e, Ease::CubicBezier { x1, .. } if x1 == 0.42));
    let e: Ease = "cubic-bezier(0.25, 0.1, 0.25, 1)".parse().unwrap();
    assert!((e.apply(0.5) - 0.8024).abs() < 1e-3);
}

#[test]
fn rejects_malformed_names() {
    for bad in [
        "",
        "wobble",
        "power1.sideways",
        "elastic.out(1, x)",
        "elastic.out(0, 0.3)",
        "steps(0)",
        "steps(1.5)",
        "cubic-bezier(2, 0, 0.5, 1)",
        "cubic-bezier(0.1, 0.2)",
        "back.out(1.7",
    ] {
        assert!(bad.parse::<Ease>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn display_round_trips() {
    for ease in all_families() {
        let s = ease.to_string();
        let back: Ease = s.parse().unwrap();
        assert_eq!(back, ease, "{s}");
    }
}

#[test]
fn serde_uses_canonical_names() {
    let v = serde_json::to_value(Ease::Power {
        power: 2,
        dir: EaseDir::InOut,
    })
    .unwrap();
    assert_eq!(v, serde_json::json!("power2.inOut"));
    let e: Ease = serde_json::from_value(serde_json::json!("Power2.InOut")).unwrap();
    assert_eq!(
        e,
        Ease::Power {
            power: 2,
            dir: EaseDir::InOut
        }
    );
    assert!(serde_json::from_value::<Ease>(serde_json::json!("nope")).is_err());
}
