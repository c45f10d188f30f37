//! Easing functions applied to motion progress.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bezier::BezierCurve;
use crate::error::EasingError;

/// Monotonic remapping of a progress fraction.
///
/// Every variant maps `0` to `0` and `1` to `1`, so an eased move still ends
/// on its exact target.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,

    /// f(x) = x^exponent. Values above 1 start slowly.
    Exponential { exponent: f32 },

    /// f(x) = log_base(1 + x*(base-1)). Starts quickly and settles.
    Logarithmic { base: f32 },

    Bezier(BezierCurve),
}

impl Easing {
    /// # Errors
    ///
    /// Returns [`EasingError::InvalidParameter`] unless `exponent` is finite and > 0.
    pub fn exponential(exponent: f32) -> Result<Self, EasingError> {
        if !exponent.is_finite() {
            return Err(EasingError::InvalidParameter(
                "Exponential exponent must be finite".to_string(),
            ));
        }
        if exponent <= 0.0 {
            return Err(EasingError::InvalidParameter(format!(
                "Exponential exponent must be > 0, got {exponent}"
            )));
        }
        Ok(Easing::Exponential { exponent })
    }

    /// # Errors
    ///
    /// Returns [`EasingError::InvalidParameter`] unless `base` is finite and > 1.
    pub fn logarithmic(base: f32) -> Result<Self, EasingError> {
        if !base.is_finite() {
            return Err(EasingError::InvalidParameter(
                "Logarithmic base must be finite".to_string(),
            ));
        }
        if base <= 1.0 {
            return Err(EasingError::InvalidParameter(format!(
                "Logarithmic base must be > 1, got {base}"
            )));
        }
        Ok(Easing::Logarithmic { base })
    }

    pub fn ease_in() -> Self {
        Easing::Bezier(BezierCurve::ease_in())
    }

    pub fn ease_out() -> Self {
        Easing::Bezier(BezierCurve::ease_out())
    }

    pub fn ease_in_out() -> Self {
        Easing::Bezier(BezierCurve::ease_in_out())
    }

    /// Remap `input` (clamped to `[0,1]`).
    pub fn evaluate(&self, input: f32) -> f32 {
        let input = input.clamp(0.0, 1.0);

        match self {
            Easing::Linear => input,
            Easing::Exponential { exponent } => input.powf(*exponent).clamp(0.0, 1.0),
            Easing::Logarithmic { base } => {
                if input <= 0.0 {
                    return 0.0;
                }
                if input >= 1.0 {
                    return 1.0;
                }
                let value = 1.0 + input * (base - 1.0);
                (value.ln() / base.ln()).clamp(0.0, 1.0)
            }
            Easing::Bezier(curve) => curve.map(input),
        }
    }

    /// # Errors
    ///
    /// Returns the first parameter problem found, if any.
    pub fn validate(&self) -> Result<(), EasingError> {
        match self {
            Easing::Linear => Ok(()),
            Easing::Exponential { exponent } => Self::exponential(*exponent).map(|_| ()),
            Easing::Logarithmic { base } => Self::logarithmic(*base).map(|_| ()),
            Easing::Bezier(curve) => curve.validate(),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::Exponential { exponent } => write!(f, "exponential:{exponent}"),
            Easing::Logarithmic { base } => write!(f, "logarithmic:{base}"),
            Easing::Bezier(curve) if *curve == BezierCurve::ease_in() => write!(f, "ease-in"),
            Easing::Bezier(curve) if *curve == BezierCurve::ease_out() => write!(f, "ease-out"),
            Easing::Bezier(curve) if *curve == BezierCurve::ease_in_out() => {
                write!(f, "ease-in-out")
            }
            Easing::Bezier(curve) => {
                let [_, (x1, y1), (x2, y2), _] = curve.control_points;
                write!(f, "bezier:{x1},{y1},{x2},{y2}")
            }
        }
    }
}

/// Parses `linear`, `ease-in`, `ease-out`, `ease-in-out`, `exponential:<exp>`,
/// `logarithmic:<base>` and `bezier:<x1>,<y1>,<x2>,<y2>`.
impl FromStr for Easing {
    type Err = EasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (name, arg) = match lowered.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lowered.as_str(), None),
        };

        let parse_f32 = |value: &str| {
            value
                .trim()
                .parse::<f32>()
                .map_err(|e| EasingError::InvalidParameter(format!("'{value}': {e}")))
        };

        match (name, arg) {
            ("linear", None) => Ok(Easing::Linear),
            ("ease-in", None) => Ok(Easing::ease_in()),
            ("ease-out", None) => Ok(Easing::ease_out()),
            ("ease-in-out", None) => Ok(Easing::ease_in_out()),
            ("exponential", Some(arg)) => Easing::exponential(parse_f32(arg)?),
            ("logarithmic", Some(arg)) => Easing::logarithmic(parse_f32(arg)?),
            ("bezier", Some(arg)) => {
                let values = arg.split(',').map(parse_f32).collect::<Result<Vec<_>, _>>()?;
                match values.as_slice() {
                    [x1, y1, x2, y2] => BezierCurve::new([
                        (0.0, 0.0),
                        (*x1, *y1),
                        (*x2, *y2),
                        (1.0, 1.0),
                    ])
                    .map(Easing::Bezier),
                    _ => Err(EasingError::InvalidParameter(format!(
                        "bezier needs 4 control values, got {}",
                        values.len()
                    ))),
                }
            }
            _ => Err(EasingError::Unknown(s.to_string())),
        }
    }
}
