//! Result types for a recovery run.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sigleak_core::TrendVerdict;

/// Final verdict of the oracle on the recovered signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The oracle accepted the composed signature.
    Accepted,
    /// The oracle still rejected it after the last-byte retries ran out.
    ///
    /// The reported bytes are the best guess, not a valid signature.
    Rejected,
}

/// One measurement pass over one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    /// Position that was measured.
    pub position: usize,
    /// How many times this position has been measured, including this pass.
    pub attempt: usize,
    /// Committed candidate (largest median).
    pub selected: u8,
    /// Median duration of the committed candidate.
    pub selected_median_ns: u64,
    /// Mean of the 256 candidate medians.
    pub average_ns: f64,
    /// Trend check outcome for this position.
    pub trend: TrendVerdict,
    /// Whether this pass triggered a rollback.
    pub rolled_back: bool,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryReport {
    /// Oracle verdict on the final signature.
    pub verdict: Verdict,
    /// Recovered secret bytes (without preamble).
    pub signature: Vec<u8>,
    /// Preamble followed by the recovered bytes, as sent to the oracle.
    pub full_signature: Vec<u8>,
    /// Position measurement passes performed.
    pub passes: usize,
    /// Rollbacks performed after a suspect trend.
    pub rollbacks: usize,
    /// Rollbacks skipped because the attempt budget was spent.
    pub suppressed_rollbacks: usize,
    /// Last-byte retries used after a rejected final check.
    pub final_retries_used: usize,
    /// Total oracle calls, warm-up included.
    pub oracle_calls: u64,
    /// Seed that reproduces the run's random choices.
    pub seed: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Every pass in execution order.
    pub history: Vec<PassRecord>,
}

impl RecoveryReport {
    /// True when the oracle accepted the recovered signature.
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Recovered bytes as lowercase hex.
    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    /// Full signature (preamble included) as lowercase hex.
    pub fn full_signature_hex(&self) -> String {
        hex::encode(&self.full_signature)
    }
}
