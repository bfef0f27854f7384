//! # sigleak
//!
//! Recover a secret signature byte by byte from a verifier whose running time
//! leaks how many leading bytes are correct.
//!
//! For each position the engine times all 256 candidate values over many
//! shuffled rounds, keeps the per-candidate median, and commits the slowest
//! candidate. A trend detector watches the per-position averages: when a
//! position stops adding the expected extra comparison time, the previous
//! commit is treated as a mis-guess and both positions are measured again.
//!
//! ## Common Pitfall: Noisy Oracles
//!
//! The timing difference per byte is often a few nanoseconds. Run on an idle
//! machine, pin the process if you can, and raise `rounds` before trusting a
//! result. A [`Verdict::Rejected`] report is the engine's best guess, not a
//! valid signature.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sigleak::{Config, FnOracle, RecoveryEngine};
//!
//! let oracle = FnOracle::new(|msg: &[u8], sig: &[u8]| verifier.verify(msg, sig));
//! let mut engine = RecoveryEngine::new(oracle, Config::balanced().seed(7));
//!
//! let report = engine.run(b"Hello world")?;
//! if report.is_accepted() {
//!     println!("signature: {}", report.signature_hex());
//! }
//! ```
//!
//! See the `helpers` module for simulated oracles that make this reproducible.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod engine;
mod error;
mod oracle;
mod result;
mod signature;

// Functional modules
pub mod helpers;
pub mod measurement;
pub mod output;

// Re-exports for public API
pub use config::Config;
pub use engine::RecoveryEngine;
pub use error::{ConfigError, RecoveryError};
pub use measurement::{Clock, MonotonicClock, Timer, TrialScheduler};
pub use oracle::{FnOracle, TryFnOracle, VerifyOracle};
pub use output::{NullReporter, ProgressReporter, TerminalReporter};
pub use result::{PassRecord, RecoveryReport, Verdict};
pub use signature::SignatureAssembler;

// Statistics and layout from the no_std core
pub use sigleak_core::constants;
pub use sigleak_core::statistics;
pub use sigleak_core::trend;
pub use sigleak_core::{
    aggregate, check_trend, median, DurationMatrix, PositionStats, SignatureLayout, TrendVerdict,
};
