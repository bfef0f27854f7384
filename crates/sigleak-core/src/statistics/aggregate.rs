//! Reduce a duration matrix to per-candidate medians and a position average.
//!
//! The selected candidate is the one with the largest median: a byte that
//! matches the secret makes the verifier compare one byte further, so it is
//! the slowest to be rejected. The position average is not used for selection;
//! it feeds the trend detector in [`crate::trend`].

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::matrix::DurationMatrix;
use super::median::median_with_buffer;
use crate::constants::CANDIDATE_COUNT;

/// Aggregate statistics for one measured position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    /// Median duration per candidate, indexed by candidate value (256 entries).
    pub medians: Vec<u64>,
    /// Arithmetic mean of the 256 medians, in nanoseconds.
    pub average: f64,
    /// Candidate with the largest median (first one wins ties).
    pub selected: u8,
    /// Median duration of the selected candidate.
    pub selected_median: u64,
}

impl PositionStats {
    /// Median duration of `candidate`.
    pub fn median_of(&self, candidate: u8) -> u64 {
        self.medians[usize::from(candidate)]
    }
}

/// Aggregate `matrix` into per-candidate medians, their mean and the selection.
pub fn aggregate(matrix: &DurationMatrix) -> PositionStats {
    let mut buffer = Vec::with_capacity(matrix.rounds());
    aggregate_with_buffer(matrix, &mut buffer)
}

/// Same as [`aggregate`], reusing `buffer` for the per-row sort.
pub fn aggregate_with_buffer(matrix: &DurationMatrix, buffer: &mut Vec<u64>) -> PositionStats {
    let mut medians = Vec::with_capacity(CANDIDATE_COUNT);
    let mut sum: u128 = 0;
    let mut selected = 0u8;
    let mut selected_median = 0u64;

    for candidate in 0..=u8::MAX {
        // rounds > 0 is guaranteed by DurationMatrix::new
        let m = median_with_buffer(matrix.durations(candidate), buffer).unwrap_or(0);
        sum += u128::from(m);

        // Strict comparison keeps the first maximum
        if candidate == 0 || m > selected_median {
            selected = candidate;
            selected_median = m;
        }
        medians.push(m);
    }

    PositionStats {
        medians,
        average: sum as f64 / CANDIDATE_COUNT as f64,
        selected,
        selected_median,
    }
}
