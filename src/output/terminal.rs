//! Terminal output formatting with colors and box drawing.

use std::io::Write;

use colored::Colorize;

use super::ProgressReporter;
use crate::result::{PassRecord, RecoveryReport, Verdict};
use sigleak_core::TrendVerdict;

/// One line per measured candidate.
pub fn format_candidate_line(position: usize, attempt: usize, candidate: u8, median_ns: u64) -> String {
    format!(
        "Byte {} - try {} - input ({}) - duration {}",
        position, attempt, candidate, median_ns
    )
}

/// The recovered prefix after committing `position`.
pub fn format_prefix_line(position: usize, prefix: &[u8]) -> String {
    format!("Byte {} - output {:?}", position, prefix)
}

/// Final acceptance and the full byte sequence sent to the oracle.
pub fn format_final_line(accepted: bool, full_signature: &[u8]) -> String {
    format!("{}\n{:?}", accepted, full_signature)
}

/// Format a report for human-readable terminal output.
pub fn format_report(report: &RecoveryReport) -> String {
    let mut output = String::new();

    let header = match report.verdict {
        Verdict::Accepted => format!(
            "{} {}",
            "\u{2713}".green().bold(),
            "SIGNATURE ACCEPTED".green().bold()
        ),
        Verdict::Rejected => format!(
            "{} {}",
            "\u{2717}".red().bold(),
            "SIGNATURE REJECTED".red().bold()
        ),
    };

    output.push_str(&format_box_top());
    output.push_str(&format_box_line(&header));
    output.push_str(&format_box_separator());

    output.push_str(&format_box_line(&format!(
        "Signature: {}",
        report.signature_hex().bold()
    )));
    output.push_str(&format_box_line(&format!(
        "Passes: {} ({} rollbacks, {} suppressed)",
        report.passes, report.rollbacks, report.suppressed_rollbacks
    )));
    if report.final_retries_used > 0 {
        output.push_str(&format_box_line(&format!(
            "Last-byte retries: {}",
            report.final_retries_used
        )));
    }
    output.push_str(&format_box_line(&format!(
        "Oracle calls: {}",
        report.oracle_calls
    )));
    output.push_str(&format_box_line(&format!(
        "Elapsed: {:.2} s",
        report.elapsed.as_secs_f64()
    )));
    output.push_str(&format_box_line(&format!("Seed: {:#x}", report.seed)));

    if is_verbose() || is_debug() {
        output.push_str(&format_box_separator());
        output.push_str(&format_box_line(&"History:".bold().to_string()));
        for record in &report.history {
            output.push_str(&format_box_line(&format_history_entry(record)));
        }
    }

    output.push_str(&format_box_bottom());

    if report.verdict == Verdict::Rejected {
        output.push_str(&format!(
            "\n{}\n",
            "The bytes above are a best guess and were not accepted by the oracle."
                .dimmed()
                .italic()
        ));
    }

    output
}

fn format_history_entry(record: &PassRecord) -> String {
    let trend = match record.trend {
        TrendVerdict::Skipped => "-".dimmed().to_string(),
        TrendVerdict::NoBaseline { .. } => "no baseline".dimmed().to_string(),
        TrendVerdict::Ok { delta, .. } => format!("ok (+{:.0} ns)", delta).green().to_string(),
        TrendVerdict::Suspect { delta, baseline } => {
            format!("suspect ({:.0} < {:.0}/2)", delta, baseline)
                .yellow()
                .to_string()
        }
    };
    let marker = if record.rolled_back { " \u{21A9}" } else { "" };
    format!(
        "  #{:<2} try {} -> {:#04x} avg {:.0} ns {}{}",
        record.position, record.attempt, record.selected, record.average_ns, trend, marker
    )
}

/// Check if an environment variable is set to a truthy value.
///
/// Returns true if the variable is set to "1", "true", or "yes" (case-insensitive).
fn env_is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Check if verbose output is enabled via environment variable.
pub fn is_verbose() -> bool {
    env_is_truthy("SIGLEAK_VERBOSE")
}

/// Check if debug output is enabled via environment variable.
pub fn is_debug() -> bool {
    env_is_truthy("SIGLEAK_DEBUG")
}

/// Prints engine progress to stderr.
///
/// Committed prefixes, rollbacks and the final verdict are always printed.
/// Per-candidate lines (256 per pass) only appear when `verbose` is set.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    /// Create a reporter; `verbose` also prints every candidate median.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose: verbose || is_verbose() || is_debug(),
        }
    }

    fn emit(&self, line: &str) {
        let mut err = std::io::stderr().lock();
        // A closed stderr must not abort the run
        let _ = writeln!(err, "{}", line);
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ProgressReporter for TerminalReporter {
    fn on_candidate(&mut self, position: usize, attempt: usize, candidate: u8, median_ns: u64) {
        if self.verbose {
            self.emit(&format_candidate_line(position, attempt, candidate, median_ns));
        }
    }

    fn on_commit(&mut self, record: &PassRecord, prefix: &[u8]) {
        self.emit(&format_prefix_line(record.position, prefix));
    }

    fn on_rollback(&mut self, from: usize, to: usize) {
        self.emit(
            &format!("Byte {} - trend broken, re-measuring from byte {}", from, to)
                .yellow()
                .to_string(),
        );
    }

    fn on_final_check(&mut self, accepted: bool, full_signature: &[u8]) {
        self.emit(&format_final_line(accepted, full_signature));
    }
}

// Box drawing helpers

const BOX_WIDTH: usize = 60;

fn format_box_top() -> String {
    format!("\u{250C}{}\u{2510}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_bottom() -> String {
    format!("\u{2514}{}\u{2518}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_separator() -> String {
    format!("\u{251C}{}\u{2524}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_line(content: &str) -> String {
    // Strip ANSI codes for length calculation
    let visible_len = strip_ansi_codes(content).chars().count();
    let padding = (BOX_WIDTH - 2).saturating_sub(visible_len);
    format!("\u{2502} {}{} \u{2502}\n", content, " ".repeat(padding))
}

/// Strip ANSI escape codes for accurate length calculation.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of ANSI sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
