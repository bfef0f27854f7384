//! Configuration for a signature recovery run.

use sigleak_core::constants::{
    DEFAULT_FINAL_RETRIES, DEFAULT_INITIAL_WARMUP, DEFAULT_MAX_ATTEMPTS_PER_POSITION,
    DEFAULT_ROUNDS,
};
use sigleak_core::SignatureLayout;

use crate::error::ConfigError;

/// Configuration options for [`RecoveryEngine`](crate::RecoveryEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // =========================================================================
    // Signature shape
    // =========================================================================
    /// Preamble and secret length of the signature presented to the oracle.
    ///
    /// Default: 5-byte preamble `[0x00, 0x5C, 0x11, 0x9F, 0x85]`, 20 secret bytes.
    pub layout: SignatureLayout,

    // =========================================================================
    // Measurement
    // =========================================================================
    /// Measurement rounds per position. Each round times all 256 candidates once.
    ///
    /// More rounds make the per-candidate median more robust to noise at a
    /// linear cost. Default: 50.
    pub rounds: usize,

    /// Warm-up calls issued once before the first position.
    ///
    /// Default: 250,000.
    pub initial_warmup: usize,

    /// Warm-up calls issued before every position batch.
    ///
    /// Default: 50 (same as `rounds`).
    pub position_warmup: usize,

    /// Shuffle candidate order independently in every round.
    ///
    /// Disabling this tries candidates in ascending order, which lets
    /// order-dependent effects bias the later candidates. Default: true.
    pub shuffle_candidates: bool,

    // =========================================================================
    // Backtracking budgets
    // =========================================================================
    /// Maximum number of times a single position may be measured.
    ///
    /// A rollback that would exceed this budget is suppressed and the run
    /// moves on, which bounds the run to
    /// `signature_length * max_attempts_per_position + final_retries` passes.
    /// Default: 8.
    pub max_attempts_per_position: usize,

    /// Re-measurements of the last position after the final check rejects.
    ///
    /// Default: 1.
    pub final_retries: usize,

    // =========================================================================
    // Reproducibility
    // =========================================================================
    /// Seed for warm-up bytes and candidate shuffling.
    ///
    /// When unset a random seed is drawn and recorded in the report.
    /// Default: None.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: SignatureLayout::default(),
            rounds: DEFAULT_ROUNDS,
            initial_warmup: DEFAULT_INITIAL_WARMUP,
            position_warmup: DEFAULT_ROUNDS,
            shuffle_candidates: true,
            max_attempts_per_position: DEFAULT_MAX_ATTEMPTS_PER_POSITION,
            final_retries: DEFAULT_FINAL_RETRIES,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a quick configuration for development against fast, low-noise oracles.
    ///
    /// - 15 rounds per position
    /// - 10,000 initial warm-up calls
    pub fn quick() -> Self {
        Self {
            rounds: 15,
            initial_warmup: 10_000,
            position_warmup: 15,
            ..Default::default()
        }
    }

    /// Create the default balanced configuration.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create a thorough configuration for noisy machines.
    ///
    /// - 101 rounds per position
    /// - 1,000,000 initial warm-up calls
    /// - 16 attempts per position
    pub fn thorough() -> Self {
        Self {
            rounds: 101,
            initial_warmup: 1_000_000,
            position_warmup: 200,
            max_attempts_per_position: 16,
            final_retries: 2,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the signature layout.
    pub fn layout(mut self, layout: SignatureLayout) -> Self {
        assert!(layout.signature_length > 0, "signature_length must be positive");
        self.layout = layout;
        self
    }

    /// Set the number of measurement rounds per position.
    pub fn rounds(mut self, rounds: usize) -> Self {
        assert!(rounds > 0, "rounds must be positive");
        self.rounds = rounds;
        self
    }

    /// Set the initial warm-up call count.
    pub fn initial_warmup(mut self, calls: usize) -> Self {
        self.initial_warmup = calls;
        self
    }

    /// Set the per-position warm-up call count.
    pub fn position_warmup(mut self, calls: usize) -> Self {
        self.position_warmup = calls;
        self
    }

    /// Enable or disable per-round candidate shuffling.
    pub fn shuffle_candidates(mut self, shuffle: bool) -> Self {
        self.shuffle_candidates = shuffle;
        self
    }

    /// Set the per-position attempt budget.
    pub fn max_attempts_per_position(mut self, attempts: usize) -> Self {
        assert!(attempts > 0, "max_attempts_per_position must be positive");
        self.max_attempts_per_position = attempts;
        self
    }

    /// Set the number of last-byte retries after a rejected final check.
    pub fn final_retries(mut self, retries: usize) -> Self {
        self.final_retries = retries;
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration can drive a run.
    ///
    /// Builder methods already reject these values; this catches
    /// configurations assembled through the public fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.layout.signature_length == 0 {
            return Err(ConfigError::EmptySignature);
        }
        if self.max_attempts_per_position == 0 {
            return Err(ConfigError::ZeroAttemptBudget);
        }
        Ok(())
    }

    /// Upper bound on position measurement passes for one run.
    pub fn max_passes(&self) -> usize {
        self.layout.signature_length * self.max_attempts_per_position + self.final_retries
    }
}
