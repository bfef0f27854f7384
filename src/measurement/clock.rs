//! Monotonic clock and the timer that brackets a single call.

use std::time::Instant;

pub use std::hint::black_box;

/// Source of monotonic timestamps in nanoseconds.
///
/// The engine only ever subtracts two readings, so the origin is arbitrary.
pub trait Clock {
    /// Current reading in nanoseconds.
    fn now_ns(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}

/// Wall-clock monotonic time from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
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
    #[inline]
    fn now_ns(&self) -> u64 {
        // u64 nanoseconds cover ~584 years of uptime
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Times closures against a [`Clock`].
#[derive(Debug, Clone, Default)]
pub struct Timer<C = MonotonicClock> {
    clock: C,
}

impl<C: Clock> Timer<C> {
    /// Create a timer reading from `clock`.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// The underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run `f` between two clock readings.
    ///
    /// Returns the closure's output and the elapsed nanoseconds. The result
    /// passes through [`black_box`] so the call cannot be reordered out of the
    /// bracket. A clock that goes backwards yields zero, never a negative delta.
    #[inline]
    pub fn measure_ns<F, T>(&self, f: F) -> (T, u64)
    where
        F: FnOnce() -> T,
    {
        let start = self.clock.now_ns();
        let out = black_box(f());
        let end = self.clock.now_ns();
        (out, end.saturating_sub(start))
    }
}
