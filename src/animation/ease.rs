use std::{f64::consts::PI, fmt, str::FromStr};

use crate::foundation::error::{SceneError, SceneResult};

/// Which end of the curve the easing shape is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseDir {
    /// Slow start.
    In,
    /// Slow end.
    Out,
    /// Slow start and end.
    InOut,
}

/// Easing curve mapping normalized progress `[0, 1]` to eased progress.
///
/// Curves are parsed from names such as `"linear"`, `"power2.inOut"`, `"back.out(1.7)"` or
/// `"elastic.out(1, 0.75)"` and serialize back to their canonical name.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Ease {
    /// Identity curve.
    #[default]
    Linear,
    /// Polynomial curve `t^(power + 1)` (`power1` is quadratic, `power4` quintic).
    Power {
        /// Polynomial strength, `1..=4`.
        power: u8,
        /// Curve direction.
        dir: EaseDir,
    },
    /// Sinusoidal curve.
    Sine(EaseDir),
    /// Exponential curve.
    Expo(EaseDir),
    /// Circular curve.
    Circ(EaseDir),
    /// Overshooting curve.
    Back {
        /// Curve direction.
        dir: EaseDir,
        /// Overshoot amount (`1.70158` by default).
        overshoot: f64,
    },
    /// Bouncing curve.
    Bounce(EaseDir),
    /// Spring-like oscillating curve.
    Elastic {
        /// Curve direction.
        dir: EaseDir,
        /// Oscillation amplitude, `> 0`.
        amplitude: f64,
        /// Oscillation period, `> 0`.
        period: f64,
    },
    /// Stepped curve with `n` equal jumps.
    Steps(u32),
    /// CSS-style cubic Bézier timing function.
    CubicBezier {
        /// First control point x, in `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, in `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

const BACK_OVERSHOOT: f64 = 1.70158;
const ELASTIC_AMPLITUDE: f64 = 1.0;
const ELASTIC_PERIOD: f64 = 0.3;

impl Ease {
    /// Apply this curve to normalized progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints map to exactly `0` and `1`.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Steps(n) => {
                let n = f64::from(n.max(1));
                (t * n).floor() / n
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
            Self::Power { dir, .. }
            | Self::Sine(dir)
            | Self::Expo(dir)
            | Self::Circ(dir)
            | Self::Back { dir, .. }
            | Self::Bounce(dir)
            | Self::Elastic { dir, .. } => match dir {
                EaseDir::In => self.shape_in(t),
                EaseDir::Out => 1.0 - self.shape_in(1.0 - t),
                EaseDir::InOut => {
                    if t < 0.5 {
                        self.shape_in(2.0 * t) / 2.0
                    } else {
                        1.0 - self.shape_in(2.0 - 2.0 * t) / 2.0
                    }
                }
            },
        }
    }

    /// The "in" shape of a directional family.
    fn shape_in(self, t: f64) -> f64 {
        match self {
            Self::Power { power, .. } => t.powi(i32::from(power) + 1),
            Self::Sine(_) => 1.0 - (t * PI / 2.0).cos(),
            Self::Expo(_) => {
                if t <= 0.0 {
                    0.0
                } else {
                    (2f64).powf(10.0 * (t - 1.0))
                }
            }
            Self::Circ(_) => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::Back { overshoot: s, .. } => t * t * ((s + 1.0) * t - s),
            Self::Bounce(_) => 1.0 - bounce_out(1.0 - t),
            Self::Elastic {
                amplitude, period, ..
            } => 1.0 - elastic_out(1.0 - t, amplitude, period),
            Self::Linear | Self::Steps(_) | Self::CubicBezier { .. } => t,
        }
    }

    /// Validate curve parameters.
    pub fn validate(self) -> SceneResult<()> {
        match self {
            Self::Power { power, .. } if !(1..=4).contains(&power) => Err(
                SceneError::validation(format!("power ease strength must be 1..=4, got {power}")),
            ),
            Self::Back { overshoot, .. } if !overshoot.is_finite() => Err(
                SceneError::validation("back ease overshoot must be finite"),
            ),
            Self::Elastic {
                amplitude, period, ..
            } if !(amplitude.is_finite() && amplitude > 0.0 && period.is_finite() && period > 0.0) => {
                Err(SceneError::validation(
                    "elastic ease amplitude and period must be finite and > 0",
                ))
            }
            Self::Steps(0) => Err(SceneError::validation("steps ease needs at least one step")),
            Self::CubicBezier { x1, y1, x2, y2 }
                if !([x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)) =>
            {
                Err(SceneError::validation(
                    "cubic-bezier control x values must be in [0, 1] and all values finite",
                ))
            }
            _ => Ok(()),
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    // Amplitudes below 1 stretch the period instead of shrinking the swing.
    let a = amplitude.max(1.0);
    let p = period / amplitude.min(1.0);
    let shift = p / (2.0 * PI) * (1.0 / a).asin();
    a * (2f64).powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / p).sin() + 1.0
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Solve u such that bx(u) = x, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    if (sample_curve(x1, x2, t) - x).abs() > 1e-9 {
        // Newton stalled on a flat stretch; fall back to bisection.
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = x;
        for _ in 0..40 {
            if sample_curve(x1, x2, t) < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample_curve(y1, y2, t)
}

impl fmt::Display for EaseDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inOut",
        })
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Linear => f.write_str("linear"),
            Self::Power { power, dir } => write!(f, "power{power}.{dir}"),
            Self::Sine(dir) => write!(f, "sine.{dir}"),
            Self::Expo(dir) => write!(f, "expo.{dir}"),
            Self::Circ(dir) => write!(f, "circ.{dir}"),
            Self::Back { dir, overshoot } => write!(f, "back.{dir}({overshoot})"),
            Self::Bounce(dir) => write!(f, "bounce.{dir}"),
            Self::Elastic {
                dir,
                amplitude,
                period,
            } => write!(f, "elastic.{dir}({amplitude}, {period})"),
            Self::Steps(n) => write!(f, "steps({n})"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl FromStr for Ease {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SceneError::validation("ease name must be non-empty"));
        }

        let (head, args) = match s.split_once('(') {
            None => (s, Vec::new()),
            Some((head, rest)) => {
                let inner = rest.strip_suffix(')').ok_or_else(|| {
                    SceneError::validation(format!("ease '{s}' has an unclosed argument list"))
                })?;
                (head.trim(), parse_args(s, inner)?)
            }
        };

        let head = head.to_ascii_lowercase();
        let (family, dir) = match head.split_once('.') {
            None => (head.as_str(), None),
            Some((family, dir)) => (family, Some(parse_dir(s, dir)?)),
        };
        let dir_or_out = dir.unwrap_or(EaseDir::Out);
        let arg = |i: usize, default: f64| args.get(i).copied().unwrap_or(default);

        let ease = match family {
            "linear" | "none" | "power0" => Self::Linear,
            "power1" | "quad" => Self::Power {
                power: 1,
                dir: dir_or_out,
            },
            "power2" | "cubic" => Self::Power {
                power: 2,
                dir: dir_or_out,
            },
            "power3" | "quart" => Self::Power {
                power: 3,
                dir: dir_or_out,
            },
            "power4" | "quint" | "strong" => Self::Power {
                power: 4,
                dir: dir_or_out,
            },
            "sine" => Self::Sine(dir_or_out),
            "expo" => Self::Expo(dir_or_out),
            "circ" => Self::Circ(dir_or_out),
            "back" => Self::Back {
                dir: dir_or_out,
                overshoot: arg(0, BACK_OVERSHOOT),
            },
            "bounce" => Self::Bounce(dir_or_out),
            "elastic" => Self::Elastic {
                dir: dir_or_out,
                amplitude: arg(0, ELASTIC_AMPLITUDE),
                period: arg(1, ELASTIC_PERIOD),
            },
            "steps" => {
                let n = arg(0, 1.0);
                if n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
                    return Err(SceneError::validation(format!(
                        "steps count must be a positive integer in '{s}'"
                    )));
                }
                Self::Steps(n as u32)
            }
            "cubic-bezier" => {
                if args.len() != 4 {
                    return Err(SceneError::validation(format!(
                        "cubic-bezier needs 4 arguments in '{s}'"
                    )));
                }
                Self::CubicBezier {
                    x1: args[0],
                    y1: args[1],
                    x2: args[2],
                    y2: args[3],
                }
            }
            "ease" if dir.is_none() => css_bezier(0.25, 0.1, 0.25, 1.0),
            "ease-in" | "ease_in" | "easein" => css_bezier(0.42, 0.0, 1.0, 1.0),
            "ease-out" | "ease_out" | "easeout" => css_bezier(0.0, 0.0, 0.58, 1.0),
            "ease-in-out" | "ease_in_out" | "easeinout" => css_bezier(0.42, 0.0, 0.58, 1.0),
            other => {
                return Err(SceneError::validation(format!(
                    "unknown ease family '{other}'"
                )));
            }
        };
        ease.validate()?;
        Ok(ease)
    }
}

fn css_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Ease {
    Ease::CubicBezier { x1, y1, x2, y2 }
}

fn parse_dir(full: &str, dir: &str) -> SceneResult<EaseDir> {
    match dir {
        "in" => Ok(EaseDir::In),
        "out" => Ok(EaseDir::Out),
        "inout" | "in-out" | "in_out" => Ok(EaseDir::InOut),
        other => Err(SceneError::validation(format!(
            "unknown ease direction '{other}' in '{full}'"
        ))),
    }
}

fn parse_args(full: &str, inner: &str) -> SceneResult<Vec<f64>> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|a| {
            let a = a.trim();
            a.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    SceneError::validation(format!("invalid ease argument '{a}' in '{full}'"))
                })
        })
        .collect()
}

impl serde::Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
