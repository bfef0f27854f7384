//! Discardable oracle calls issued before measuring.

use rand::Rng;
use sigleak_core::SignatureLayout;

use super::clock::black_box;
use crate::error::RecoveryError;
use crate::oracle::VerifyOracle;

/// Call the oracle `count` times with the preamble and uniformly random bytes.
///
/// Both the verdict and the timing are thrown away. This amortizes first-call
/// costs (cold caches, untrained branch predictors, lazy initialization inside
/// the verifier) so they do not bias the first candidates of a batch.
///
/// The signature bodies are independent random bytes, never a partial guess,
/// and live in a scratch buffer: the working signature is not touched.
///
/// Returns the number of oracle calls made. Oracle errors abort.
pub fn warm_up<O, R>(
    oracle: &mut O,
    message: &[u8],
    layout: &SignatureLayout,
    count: usize,
    rng: &mut R,
) -> Result<usize, RecoveryError>
where
    O: VerifyOracle,
    R: Rng,
{
    if count == 0 {
        return Ok(0);
    }

    let body_start = layout.preamble_length();
    let mut scratch = vec![0u8; layout.full_length()];
    scratch[..body_start].copy_from_slice(&layout.preamble);

    for _ in 0..count {
        rng.fill(&mut scratch[body_start..]);
        let accepted = oracle
            .verify(message, &scratch)
            .map_err(RecoveryError::oracle)?;
        black_box(accepted);
    }

    tracing::debug!(calls = count, "warm-up finished");
    Ok(count)
}
