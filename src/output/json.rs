//! JSON serialization for recovery reports.

use crate::result::RecoveryReport;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RecoveryReport).
pub fn to_json(report: &RecoveryReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RecoveryReport).
pub fn to_json_pretty(report: &RecoveryReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
