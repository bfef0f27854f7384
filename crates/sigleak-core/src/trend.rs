//! Trend detection over per-position average durations.
//!
//! When the first `i` bytes of the working signature are correct, every
//! candidate at position `i` lets the verifier compare at least `i` bytes, so
//! the position average climbs by roughly one byte-comparison per position. A
//! wrong commit breaks that climb: the next position's average stops rising.
//!
//! [`check_trend`] compares the latest step `avg[i] - avg[i-1]` against the
//! mean step over the trailing window `[i-4, i-2)`. A step smaller than half
//! of that baseline marks the latest commit (and the one before it) as suspect.

use serde::{Deserialize, Serialize};

use crate::constants::{
    TREND_MIN_POSITION, TREND_SUSPECT_DIVISOR, TREND_WINDOW_END_LAG, TREND_WINDOW_START_LAG,
};

/// Result of checking one committed position against the trailing trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendVerdict {
    /// Position too early (or averages missing) for a check.
    Skipped,
    /// The trailing window held no usable steps; the check is suppressed.
    NoBaseline {
        /// Latest step `avg[i] - avg[i-1]`.
        delta: f64,
    },
    /// The latest step kept up with the baseline.
    Ok {
        /// Latest step `avg[i] - avg[i-1]`.
        delta: f64,
        /// Mean step over the trailing window.
        baseline: f64,
    },
    /// The latest step fell below half the baseline.
    Suspect {
        /// Latest step `avg[i] - avg[i-1]`.
        delta: f64,
        /// Mean step over the trailing window.
        baseline: f64,
    },
}

impl TrendVerdict {
    /// True when the verdict asks for a rollback.
    pub fn is_suspect(&self) -> bool {
        matches!(self, TrendVerdict::Suspect { .. })
    }
}

/// Mean of consecutive steps `avg[j+1] - avg[j]` for `j` in `[start, end)`.
///
/// The scan stops at the first `avg[j+1]` that is unpopulated, non-positive or
/// past the end of the slice. Returns `None` when no step qualified, instead of
/// dividing by zero.
pub fn baseline_delta(averages: &[Option<f64>], start: usize, end: usize) -> Option<f64> {
    let mut sum = 0.0;
    let mut counted = 0usize;

    for j in start..end {
        let (Some(Some(lo)), Some(Some(hi))) = (averages.get(j), averages.get(j + 1)) else {
            break;
        };
        if *hi <= 0.0 {
            break;
        }
        sum += hi - lo;
        counted += 1;
    }

    if counted == 0 {
        None
    } else {
        Some(sum / counted as f64)
    }
}

/// Check whether the average committed at `position` follows the trend.
pub fn check_trend(averages: &[Option<f64>], position: usize) -> TrendVerdict {
    if position < TREND_MIN_POSITION {
        return TrendVerdict::Skipped;
    }

    let (Some(Some(current)), Some(Some(previous))) =
        (averages.get(position), averages.get(position - 1))
    else {
        return TrendVerdict::Skipped;
    };
    let delta = current - previous;

    let start = position.saturating_sub(TREND_WINDOW_START_LAG);
    let end = position.saturating_sub(TREND_WINDOW_END_LAG);

    match baseline_delta(averages, start, end) {
        None => TrendVerdict::NoBaseline { delta },
        Some(baseline) if delta < baseline / TREND_SUSPECT_DIVISOR => {
            TrendVerdict::Suspect { delta, baseline }
        }
        Some(baseline) => TrendVerdict::Ok { delta, baseline },
    }
}
