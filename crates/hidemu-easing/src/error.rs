//! Error types for easing curves.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EasingError {
    /// Bezier control points must lie in `[0,1]²`.
    #[error("Control point {point_index} {coordinate} coordinate {value} is outside valid range [0,1]")]
    ControlPointOutOfRange {
        point_index: usize,
        coordinate: &'static str,
        value: f32,
    },

    #[error("Invalid easing parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown easing '{0}' (expected linear, ease-in, ease-out, ease-in-out, exponential:<exp> or logarithmic:<base>)")]
    Unknown(String),
}
