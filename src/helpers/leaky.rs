//! A real verifier with an early-exit comparison.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use sigleak_core::SignatureLayout;

use crate::oracle::VerifyOracle;

/// Spin for at least `ns` nanoseconds of wall-clock time.
#[inline(never)]
pub fn busy_wait_ns(ns: u64) {
    let start = Instant::now();
    let target = Duration::from_nanos(ns);
    while start.elapsed() < target {
        std::hint::spin_loop();
    }
}

/// Compares byte by byte, stops at the first mismatch, and busy-waits
/// `per_byte_ns` after every byte that matched.
///
/// This is the leak the engine exploits: the call takes longer the more
/// leading bytes are right.
#[derive(Debug, Clone)]
pub struct LeakyVerifier {
    message: Vec<u8>,
    expected: Vec<u8>,
    preamble_length: usize,
    per_byte_ns: u64,
}

impl LeakyVerifier {
    /// Create a verifier that accepts `layout.preamble ‖ secret` over `message`.
    ///
    /// # Panics
    ///
    /// Panics if `secret` does not have `layout.signature_length` bytes.
    pub fn new(message: &[u8], layout: &SignatureLayout, secret: &[u8], per_byte_ns: u64) -> Self {
        assert_eq!(
            secret.len(),
            layout.signature_length,
            "secret length must match the layout"
        );
        let mut expected = layout.preamble.clone();
        expected.extend_from_slice(secret);
        Self {
            message: message.to_vec(),
            expected,
            preamble_length: layout.preamble_length(),
            per_byte_ns,
        }
    }

    /// The secret bytes, preamble excluded.
    pub fn secret(&self) -> &[u8] {
        &self.expected[self.preamble_length..]
    }
}

impl VerifyOracle for LeakyVerifier {
    type Error = Infallible;

    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Infallible> {
        if message != self.message.as_slice() || signature.len() != self.expected.len() {
            return Ok(false);
        }
        for (a, b) in signature.iter().zip(&self.expected) {
            if a != b {
                return Ok(false);
            }
            busy_wait_ns(self.per_byte_ns);
        }
        Ok(true)
    }
}
