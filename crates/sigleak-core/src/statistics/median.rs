//! Median of integer durations.
//!
//! For a sorted sample `x` of length `n`:
//! ```text
//! n odd:  median = x[n / 2]
//! n even: median = floor((x[n/2 - 1] + x[n/2]) / 2)
//! ```
//!
//! The even branch averages the two middle elements with integer division, so
//! `[1, 2, 3, 4]` yields `2`. The odd branch returns the middle element itself,
//! never an index-derived value.

use alloc::vec::Vec;

/// Compute the median of a mutable slice, sorting it in place.
///
/// Returns `None` for an empty slice.
pub fn median(data: &mut [u64]) -> Option<u64> {
    data.sort_unstable();
    median_sorted(data)
}

/// Compute the median of an already sorted slice.
///
/// Returns `None` for an empty slice.
pub fn median_sorted(sorted: &[u64]) -> Option<u64> {
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "median_sorted requires ascending input"
    );

    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let upper = sorted[n / 2];
    if n % 2 == 1 {
        return Some(upper);
    }

    // lower <= upper, so this cannot overflow
    let lower = sorted[n / 2 - 1];
    Some(lower + (upper - lower) / 2)
}

/// Compute the median of `data` through a reusable buffer, leaving `data` untouched.
///
/// Used in the aggregation loop where 256 rows are reduced back to back.
pub fn median_with_buffer(data: &[u64], buffer: &mut Vec<u64>) -> Option<u64> {
    buffer.clear();
    buffer.extend_from_slice(data);
    median(buffer)
}
