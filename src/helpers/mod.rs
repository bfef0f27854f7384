//! Stand-in oracles for exercising the engine without a real verifier.
//!
//! - [`SimulatedOracle`] with a [`VirtualClock`]: deterministic durations,
//!   for tests and reproducible experiments
//! - [`LeakyVerifier`]: a real early-exit comparison that burns wall-clock
//!   time per matched byte, for runs against [`MonotonicClock`](crate::measurement::MonotonicClock)

mod leaky;
mod simulated;

pub use leaky::{busy_wait_ns, LeakyVerifier};
pub use simulated::{SimulatedOracle, VirtualClock};
