//! Progress reporting and output formatting for recovery runs.
//!
//! This module provides:
//! - [`ProgressReporter`]: hooks the engine calls while it runs
//! - Terminal: per-candidate and per-position lines plus a boxed summary
//! - JSON: machine-readable serialization of the final report

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{
    format_candidate_line, format_final_line, format_prefix_line, format_report, is_debug,
    is_verbose, TerminalReporter,
};

use crate::result::PassRecord;

/// Receives progress from a running [`RecoveryEngine`](crate::RecoveryEngine).
///
/// All methods default to doing nothing. They are called between measurement
/// batches, never inside a timed call.
pub trait ProgressReporter {
    /// Median duration of one candidate after a position was measured.
    fn on_candidate(&mut self, _position: usize, _attempt: usize, _candidate: u8, _median_ns: u64) {
    }

    /// A position was committed; `prefix` holds bytes `0..=position`.
    fn on_commit(&mut self, _record: &PassRecord, _prefix: &[u8]) {}

    /// A suspect trend rewound the cursor from `from` to `to`.
    fn on_rollback(&mut self, _from: usize, _to: usize) {}

    /// The oracle judged the complete signature.
    fn on_final_check(&mut self, _accepted: bool, _full_signature: &[u8]) {}
}

/// Reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {}
