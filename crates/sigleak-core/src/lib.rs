//! Core statistics for byte-wise timing recovery of a secret signature.
//!
//! This crate holds the pure, measurement-free half of `sigleak`:
//! - Median reduction of per-candidate trial durations
//! - The candidate × round duration matrix
//! - Per-position aggregation and candidate selection
//! - Trend detection over per-position averages (the rollback signal)
//!
//! It works in `no_std` environments with only an allocator. Timing, the
//! oracle boundary and the recovery state machine live in the `sigleak` crate.
//!
//! ```ignore
//! use sigleak_core::statistics::{aggregate, DurationMatrix};
//! use sigleak_core::trend::check_trend;
//!
//! let mut matrix = DurationMatrix::new(50);
//! // ... record durations ...
//! let stats = aggregate(&matrix);
//! println!("best candidate: {}", stats.selected);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

pub mod constants;
pub mod statistics;
pub mod trend;
pub mod types;

pub use statistics::{aggregate, median, DurationMatrix, PositionStats};
pub use trend::{baseline_delta, check_trend, TrendVerdict};
pub use types::SignatureLayout;
