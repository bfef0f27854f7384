//! Deterministic oracle on a virtual clock.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sigleak_core::constants::DEFAULT_SEED;
use sigleak_core::SignatureLayout;

use crate::measurement::Clock;
use crate::oracle::VerifyOracle;

/// A clock that only moves when told to.
///
/// Clones share the same reading, so an oracle can advance the clock the
/// engine's timer reads from.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Rc<Cell<u64>>,
}

impl VirtualClock {
    /// Create a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `ns`.
    pub fn advance(&self, ns: u64) {
        self.now.set(self.now.get().saturating_add(ns));
    }

    /// Current reading.
    pub fn now(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for VirtualClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        self.now.get()
    }
}

/// Oracle whose every call costs `base + per_byte * matched + noise` virtual ns.
///
/// `matched` is the number of leading secret bytes the signature gets right,
/// counted only when the preamble is intact. Noise is uniform in
/// `[0, noise_ns]` and drawn from a seeded generator.
///
/// ```ignore
/// let clock = VirtualClock::new();
/// let oracle = SimulatedOracle::new(clock.clone(), &layout, &secret).noise_ns(20);
/// let mut engine = RecoveryEngine::with_clock(oracle, clock, config);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedOracle {
    clock: VirtualClock,
    expected: Vec<u8>,
    preamble_length: usize,
    base_ns: u64,
    per_byte_ns: u64,
    noise_ns: u64,
    rng: Xoshiro256PlusPlus,
    calls: u64,
}

impl SimulatedOracle {
    /// Create an oracle accepting `layout.preamble ‖ secret`.
    ///
    /// Defaults: 1,000 ns base cost, 100 ns per matched byte, no noise.
    ///
    /// # Panics
    ///
    /// Panics if `secret` does not have `layout.signature_length` bytes.
    pub fn new(clock: VirtualClock, layout: &SignatureLayout, secret: &[u8]) -> Self {
        assert_eq!(
            secret.len(),
            layout.signature_length,
            "secret length must match the layout"
        );
        let mut expected = layout.preamble.clone();
        expected.extend_from_slice(secret);
        Self {
            clock,
            expected,
            preamble_length: layout.preamble_length(),
            base_ns: 1_000,
            per_byte_ns: 100,
            noise_ns: 0,
            rng: Xoshiro256PlusPlus::seed_from_u64(DEFAULT_SEED),
            calls: 0,
        }
    }

    /// Set the fixed cost of every call.
    pub fn base_ns(mut self, ns: u64) -> Self {
        self.base_ns = ns;
        self
    }

    /// Set the extra cost per matched secret byte.
    pub fn per_byte_ns(mut self, ns: u64) -> Self {
        self.per_byte_ns = ns;
        self
    }

    /// Set the upper bound of the uniform noise added to every call.
    pub fn noise_ns(mut self, ns: u64) -> Self {
        self.noise_ns = ns;
        self
    }

    /// Reseed the noise generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self
    }

    /// Oracle calls so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// The clock this oracle advances.
    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    /// Leading secret bytes `signature` gets right; zero on a bad preamble.
    pub fn matched_prefix(&self, signature: &[u8]) -> usize {
        let p = self.preamble_length;
        if signature.len() < p || signature[..p] != self.expected[..p] {
            return 0;
        }
        signature[p..]
            .iter()
            .zip(&self.expected[p..])
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl VerifyOracle for SimulatedOracle {
    type Error = Infallible;

    fn verify(&mut self, _message: &[u8], signature: &[u8]) -> Result<bool, Infallible> {
        self.calls += 1;

        let matched = self.matched_prefix(signature) as u64;
        let noise = if self.noise_ns > 0 {
            self.rng.random_range(0..=self.noise_ns)
        } else {
            0
        };
        self.clock
            .advance(self.base_ns + self.per_byte_ns * matched + noise);

        Ok(signature == self.expected.as_slice())
    }
}
