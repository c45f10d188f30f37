//! Property-based tests for easing curves and the progress sampler.

use std::time::Duration;

use hidemu_easing::{BezierCurve, Easing, Progress};
use quickcheck_macros::quickcheck;

const ENDPOINT_TOLERANCE: f32 = 1e-3;
const MONOTONIC_SLACK: f32 = 1e-4;

fn sanitize_f32(v: f32) -> f32 {
    if v.is_nan() {
        0.5
    } else if v.is_infinite() {
        if v > 0.0 { 1.0 } else { 0.0 }
    } else {
        v
    }
}

fn sample_curves(exponent: f32, base: f32) -> Vec<Easing> {
    let exponent = sanitize_f32(exponent).abs().clamp(0.1, 10.0);
    let base = sanitize_f32(base).abs().clamp(1.1, 100.0);
    vec![
        Easing::Linear,
        Easing::exponential(exponent).unwrap_or(Easing::Linear),
        Easing::logarithmic(base).unwrap_or(Easing::Linear),
        Easing::ease_in(),
        Easing::ease_out(),
        Easing::ease_in_out(),
        Easing::Bezier(BezierCurve::linear()),
    ]
}

#[quickcheck]
fn prop_output_stays_in_unit_range(input: f32, exponent: f32, base: f32) -> bool {
    let input = sanitize_f32(input);
    sample_curves(exponent, base)
        .iter()
        .all(|curve| (0.0..=1.0).contains(&curve.evaluate(input)))
}

#[quickcheck]
fn prop_endpoints_are_fixed(exponent: f32, base: f32) -> bool {
    sample_curves(exponent, base).iter().all(|curve| {
        curve.evaluate(0.0).abs() < ENDPOINT_TOLERANCE
            && (curve.evaluate(1.0) - 1.0).abs() < ENDPOINT_TOLERANCE
    })
}

#[quickcheck]
fn prop_curves_are_monotonic(a: f32, b: f32, exponent: f32, base: f32) -> bool {
    let a = sanitize_f32(a).clamp(0.0, 1.0);
    let b = sanitize_f32(b).clamp(0.0, 1.0);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    sample_curves(exponent, base)
        .iter()
        .all(|curve| curve.evaluate(lo) <= curve.evaluate(hi) + MONOTONIC_SLACK)
}

#[quickcheck]
fn prop_progress_ends_with_exactly_one_final_sample(steps: Vec<u8>) -> bool {
    let mut now = Duration::ZERO;
    let mut deltas = steps.into_iter();
    let clock = move || {
        let current = now;
        now += Duration::from_millis(u64::from(deltas.next().unwrap_or(50)));
        current
    };

    let samples: Vec<f32> =
        Progress::with_clock(Duration::from_millis(200), Easing::Linear, clock).collect();

    let finals = samples.iter().filter(|s| **s >= 1.0).count();
    finals == 1
        && samples.last().is_some_and(|s| *s >= 1.0)
        && samples.windows(2).all(|w| w[0] <= w[1])
}
