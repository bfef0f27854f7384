//! Error types for signature recovery.

use thiserror::Error;

/// Fatal error that aborts a recovery run.
///
/// A statistical mis-guess is never an error: it is handled by the rollback
/// mechanism inside the engine. Only a broken oracle or an unusable
/// configuration stops the run.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The oracle raised an error. Without the oracle there is nothing to measure.
    #[error("oracle call failed: {0}")]
    Oracle(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The configuration cannot drive a run.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl RecoveryError {
    /// Wrap an oracle error.
    pub fn oracle<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RecoveryError::Oracle(Box::new(err))
    }
}

/// Reason a [`Config`](crate::Config) was rejected by `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one measurement round is needed to compute a median.
    #[error("rounds must be at least 1")]
    ZeroRounds,

    /// There is no byte to recover.
    #[error("signature length must be at least 1")]
    EmptySignature,

    /// Every position must be measurable at least once.
    #[error("max attempts per position must be at least 1")]
    ZeroAttemptBudget,
}
