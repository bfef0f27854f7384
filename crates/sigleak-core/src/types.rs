//! Layout of the signature presented to the oracle.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PREAMBLE, DEFAULT_SIGNATURE_LENGTH};

/// Fixed shape of every candidate signature: a constant preamble followed by
/// `signature_length` guessed bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureLayout {
    /// Constant prefix sent before the guessed bytes. Never mutated.
    pub preamble: Vec<u8>,
    /// Number of secret bytes to recover.
    pub signature_length: usize,
}

impl SignatureLayout {
    /// Create a layout from a preamble and a secret length.
    pub fn new(preamble: impl Into<Vec<u8>>, signature_length: usize) -> Self {
        Self {
            preamble: preamble.into(),
            signature_length,
        }
    }

    /// Length of the preamble in bytes.
    pub fn preamble_length(&self) -> usize {
        self.preamble.len()
    }

    /// Total length of the signature handed to the oracle.
    pub fn full_length(&self) -> usize {
        self.preamble.len() + self.signature_length
    }
}

impl Default for SignatureLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE.to_vec(), DEFAULT_SIGNATURE_LENGTH)
    }
}
