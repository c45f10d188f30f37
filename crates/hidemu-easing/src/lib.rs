//! Easing curves for paced pointer motion
//!
//! A paced mouse move is driven by a [`Progress`] sampler: it reads a clock,
//! turns elapsed time into a fraction of the requested duration, remaps that
//! fraction through an [`Easing`] curve and always finishes with exactly one
//! sample of `1.0` so the caller can land on the exact target.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use hidemu_easing::{Easing, Progress};
//!
//! let easing = Easing::exponential(2.0)?;
//! assert!((easing.evaluate(0.5) - 0.25).abs() < 1e-6);
//!
//! // A zero duration yields only the final sample.
//! let samples: Vec<f32> = Progress::new(Duration::ZERO, Easing::Linear).collect();
//! assert_eq!(samples.len(), 1);
//! # Ok::<(), hidemu_easing::EasingError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod bezier;
pub mod easing;
pub mod error;
pub mod progress;

pub use bezier::BezierCurve;
pub use easing::Easing;
pub use error::EasingError;
pub use progress::{Clock, MonotonicClock, Progress};
