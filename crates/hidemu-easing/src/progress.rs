//! Wall-clock progress sampling.

use std::time::{Duration, Instant};

use crate::easing::Easing;

/// Source of elapsed time for [`Progress`].
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn elapsed(&mut self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

impl<F: FnMut() -> Duration> Clock for F {
    fn elapsed(&mut self) -> Duration {
        self()
    }
}

/// Iterator over eased progress fractions for a move lasting `duration`.
///
/// Yields `easing(elapsed / duration)` for every sample taken before the
/// deadline, then exactly one `1.0`, then ends. The start time is taken on
/// the first call to `next`.
#[derive(Debug)]
pub struct Progress<C = MonotonicClock> {
    clock: C,
    duration: Duration,
    easing: Easing,
    start: Option<Duration>,
    finished: bool,
}

impl Progress {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self::with_clock(duration, easing, MonotonicClock::new())
    }
}

impl<C: Clock> Progress<C> {
    pub fn with_clock(duration: Duration, easing: Easing, clock: C) -> Self {
        Self {
            clock,
            duration,
            easing,
            start: None,
            finished: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<C: Clock> Iterator for Progress<C> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.finished {
            return None;
        }

        let now = self.clock.elapsed();
        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_sub(start);

        if elapsed < self.duration {
            let fraction = elapsed.as_secs_f64() / self.duration.as_secs_f64();
            #[allow(
                clippy::cast_possible_truncation,
                reason = "fraction is in [0,1)"
            )]
            let fraction = fraction as f32;
            Some(self.easing.evaluate(fraction))
        } else {
            self.finished = true;
            Some(1.0)
        }
    }
}

impl<C: Clock> std::iter::FusedIterator for Progress<C> {}
