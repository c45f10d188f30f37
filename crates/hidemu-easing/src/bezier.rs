//! Cubic Bezier timing curves.

use serde::{Deserialize, Serialize};

use crate::error::EasingError;

/// Cubic Bezier timing curve with control points P0..P3.
///
/// Maps an elapsed-time fraction `x` in `[0,1]` to a distance fraction `y`,
/// the same way CSS `cubic-bezier()` timing functions do. P0 is normally
/// `(0,0)` and P3 `(1,1)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BezierCurve {
    pub control_points: [(f32, f32); 4],
}

impl BezierCurve {
    /// # Errors
    ///
    /// Returns [`EasingError::ControlPointOutOfRange`] if any coordinate is
    /// non-finite or outside `[0,1]`.
    pub fn new(control_points: [(f32, f32); 4]) -> Result<Self, EasingError> {
        let curve = Self { control_points };
        curve.validate()?;
        Ok(curve)
    }

    pub fn linear() -> Self {
        Self {
            control_points: [(0.0, 0.0), (0.33, 0.33), (0.67, 0.67), (1.0, 1.0)],
        }
    }

    /// Slow start, fast end.
    pub fn ease_in() -> Self {
        Self {
            control_points: [(0.0, 0.0), (0.42, 0.0), (1.0, 1.0), (1.0, 1.0)],
        }
    }

    /// Fast start, slow end.
    pub fn ease_out() -> Self {
        Self {
            control_points: [(0.0, 0.0), (0.0, 0.0), (0.58, 1.0), (1.0, 1.0)],
        }
    }

    pub fn ease_in_out() -> Self {
        Self {
            control_points: [(0.0, 0.0), (0.42, 0.0), (0.58, 1.0), (1.0, 1.0)],
        }
    }

    #[inline]
    fn is_valid_coordinate(value: f32) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    /// # Errors
    ///
    /// Returns [`EasingError::ControlPointOutOfRange`] for the first bad coordinate.
    pub fn validate(&self) -> Result<(), EasingError> {
        for (i, (x, y)) in self.control_points.iter().enumerate() {
            if !Self::is_valid_coordinate(*x) {
                return Err(EasingError::ControlPointOutOfRange {
                    point_index: i,
                    coordinate: "x",
                    value: *x,
                });
            }
            if !Self::is_valid_coordinate(*y) {
                return Err(EasingError::ControlPointOutOfRange {
                    point_index: i,
                    coordinate: "y",
                    value: *y,
                });
            }
        }
        Ok(())
    }

    /// Point on the curve at parameter `t`.
    ///
    /// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
    #[inline]
    pub fn evaluate(&self, t: f32) -> (f32, f32) {
        let t = t.clamp(0.0, 1.0);
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = self.control_points;

        let x = mt3 * x0 + 3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3 * x3;
        let y = mt3 * y0 + 3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3 * y3;

        (x, y)
    }

    #[inline]
    fn x_derivative(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;

        let [(x0, _), (x1, _), (x2, _), (x3, _)] = self.control_points;

        3.0 * (mt * mt * (x1 - x0) + 2.0 * mt * t * (x2 - x1) + t * t * (x3 - x2))
    }

    /// Solve for `t` where the curve's x equals `target_x`.
    ///
    /// Newton-Raphson with a bisection fallback where the slope flattens out.
    fn solve_t(&self, target_x: f32) -> f32 {
        const NEWTON_ITERATIONS: usize = 8;
        const BISECTION_ITERATIONS: usize = 32;
        const EPSILON: f32 = 1e-6;

        let target_x = target_x.clamp(0.0, 1.0);

        let mut t = target_x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = self.evaluate(t).0 - target_x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.x_derivative(t);
            if slope.abs() < EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = target_x;
        for _ in 0..BISECTION_ITERATIONS {
            let x = self.evaluate(t).0;
            if (x - target_x).abs() < EPSILON {
                break;
            }
            if x < target_x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }

    /// Map an input fraction to an output fraction, both in `[0,1]`.
    pub fn map(&self, input: f32) -> f32 {
        let t = self.solve_t(input);
        self.evaluate(t).1.clamp(0.0, 1.0)
    }
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self::linear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_creation_valid() -> Result<(), EasingError> {
        let curve = BezierCurve::new([(0.0, 0.0), (0.25, 0.5), (0.75, 0.5), (1.0, 1.0)])?;
        assert_eq!(curve.control_points[3], (1.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_bezier_creation_invalid_y() {
        let result = BezierCurve::new([(0.0, 0.0), (0.5, 0.5), (0.75, f32::NAN), (1.0, 1.0)]);
        match result {
            Err(EasingError::ControlPointOutOfRange {
                point_index,
                coordinate,
                ..
            }) => {
                assert_eq!(point_index, 2);
                assert_eq!(coordinate, "y");
            }
            other => panic!("Expected ControlPointOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_presets_hit_endpoints() {
        for curve in [
            BezierCurve::linear(),
            BezierCurve::ease_in(),
            BezierCurve::ease_out(),
            BezierCurve::ease_in_out(),
        ] {
            assert!(curve.map(0.0).abs() < 1e-3, "{curve:?} at 0");
            assert!((curve.map(1.0) - 1.0).abs() < 1e-3, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_ease_in_lags_and_ease_out_leads() {
        assert!(BezierCurve::ease_in().map(0.3) < 0.3);
        assert!(BezierCurve::ease_out().map(0.3) > 0.3);
    }

    #[test]
    fn test_ease_in_out_is_symmetric_at_half() {
        assert!((BezierCurve::ease_in_out().map(0.5) - 0.5).abs() < 1e-3);
    }
}
