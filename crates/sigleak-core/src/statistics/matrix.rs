//! Candidate × round storage for one byte position.

use alloc::vec;
use alloc::vec::Vec;

use crate::constants::CANDIDATE_COUNT;

/// Durations for every (candidate, round) pair of one position, in nanoseconds.
///
/// Stored candidate-major in a single allocation so a row can be handed to the
/// median without copying. The matrix is allocated once and reset between
/// positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationMatrix {
    rounds: usize,
    data: Vec<u64>,
}

impl DurationMatrix {
    /// Create a zeroed matrix for `rounds` measurement rounds.
    ///
    /// # Panics
    ///
    /// Panics if `rounds` is zero.
    pub fn new(rounds: usize) -> Self {
        assert!(rounds > 0, "rounds must be positive");
        Self {
            rounds,
            data: vec![0; CANDIDATE_COUNT * rounds],
        }
    }

    /// Number of rounds per candidate.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Store the duration of `candidate` in `round`.
    #[inline]
    pub fn record(&mut self, candidate: u8, round: usize, duration_ns: u64) {
        debug_assert!(round < self.rounds, "round out of range");
        self.data[usize::from(candidate) * self.rounds + round] = duration_ns;
    }

    /// All round durations recorded for `candidate`, in round order.
    pub fn durations(&self, candidate: u8) -> &[u64] {
        let start = usize::from(candidate) * self.rounds;
        &self.data[start..start + self.rounds]
    }

    /// Duration of `candidate` in `round`.
    pub fn get(&self, candidate: u8, round: usize) -> u64 {
        self.durations(candidate)[round]
    }

    /// Zero every entry, keeping the allocation.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }
}
