//! Constants shared by the statistics and the recovery engine.

/// Default deterministic seed for RNG operations.
///
/// The value `0x7369676C65616B` is "sigleak" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x7369676C65616B;

/// Number of candidate values for one byte position.
pub const CANDIDATE_COUNT: usize = 256;

/// Default length of the secret signature in bytes.
pub const DEFAULT_SIGNATURE_LENGTH: usize = 20;

/// Default preamble prepended to every candidate signature.
///
/// As signed bytes this is `[0, 92, 17, -97, -123]`.
pub const DEFAULT_PREAMBLE: [u8; 5] = [0x00, 0x5C, 0x11, 0x9F, 0x85];

/// Value every working-buffer byte holds before its position is guessed.
pub const SENTINEL_BYTE: u8 = u8::MIN;

// =============================================================================
// Measurement defaults
// =============================================================================

/// Default number of measurement rounds per position.
pub const DEFAULT_ROUNDS: usize = 50;

/// Default warm-up call count issued once before the first position.
pub const DEFAULT_INITIAL_WARMUP: usize = 250_000;

/// Default number of times a single position may be measured.
pub const DEFAULT_MAX_ATTEMPTS_PER_POSITION: usize = 8;

/// Default number of last-byte re-measurements after a rejected final check.
pub const DEFAULT_FINAL_RETRIES: usize = 1;

// =============================================================================
// Trend detection
// =============================================================================

/// First position whose average is checked against the trailing baseline.
///
/// Positions 0, 1 and 2 lack the history needed for a baseline.
pub const TREND_MIN_POSITION: usize = 3;

/// Distance from the current position to the start of the baseline window.
pub const TREND_WINDOW_START_LAG: usize = 4;

/// Distance from the current position to the (exclusive) end of the baseline window.
pub const TREND_WINDOW_END_LAG: usize = 2;

/// A delta below `baseline / TREND_SUSPECT_DIVISOR` marks the guess as suspect.
pub const TREND_SUSPECT_DIVISOR: f64 = 2.0;
