//! Statistical reduction of raw trial durations.
//!
//! This module provides:
//! - Median computation over integer nanosecond durations
//! - The candidate × round duration matrix filled by the trial scheduler
//! - Per-position aggregation: one median per candidate, their mean, and the
//!   selected (slowest) candidate

mod aggregate;
mod matrix;
mod median;

pub use aggregate::{aggregate, aggregate_with_buffer, PositionStats};
pub use matrix::DurationMatrix;
pub use median::{median, median_sorted, median_with_buffer};
