//! Measurement infrastructure for per-position timing.
//!
//! This module provides:
//! - A monotonic nanosecond clock and a timer that brackets one oracle call
//! - Warm-up with random, discardable oracle calls
//! - The trial scheduler: randomized candidate order per round, one timed
//!   oracle call per (candidate, round)
//!
//! Everything here runs on the calling thread. Measurement rounds must stay
//! strictly sequential: interleaving other work with a timed call injects
//! scheduling jitter into the comparison.

mod clock;
mod scheduler;
mod warmup;

pub use clock::{black_box, Clock, MonotonicClock, Timer};
pub use scheduler::{derive_seed, TrialScheduler};
pub use warmup::warm_up;
