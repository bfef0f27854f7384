//! Working signature buffer and composition with the preamble.

use sigleak_core::constants::SENTINEL_BYTE;
use sigleak_core::SignatureLayout;

use crate::error::RecoveryError;
use crate::oracle::VerifyOracle;

/// Owns the guessed bytes and composes them with the constant preamble.
///
/// The buffer always holds exactly `layout.signature_length` bytes. Positions
/// that have not been guessed yet hold [`SENTINEL_BYTE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAssembler {
    layout: SignatureLayout,
    buffer: Vec<u8>,
}

impl SignatureAssembler {
    /// Create a buffer of sentinel bytes for `layout`.
    pub fn new(layout: SignatureLayout) -> Self {
        let buffer = vec![SENTINEL_BYTE; layout.signature_length];
        Self { layout, buffer }
    }

    /// The layout this buffer was built for.
    pub fn layout(&self) -> &SignatureLayout {
        &self.layout
    }

    /// The guessed bytes, without preamble.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of guessed bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when the layout has no secret bytes.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Byte at `position`.
    pub fn get(&self, position: usize) -> u8 {
        self.buffer[position]
    }

    /// Overwrite the byte at `position`.
    #[inline]
    pub fn set(&mut self, position: usize, byte: u8) {
        self.buffer[position] = byte;
    }

    /// Preamble followed by the working buffer.
    pub fn compose_full(&self) -> Vec<u8> {
        let mut full = vec![0u8; self.layout.full_length()];
        self.compose_into(&mut full);
        full
    }

    /// Write preamble ‖ buffer into `out` without allocating.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` differs from `layout.full_length()`.
    #[inline]
    pub fn compose_into(&self, out: &mut [u8]) {
        assert_eq!(
            out.len(),
            self.layout.full_length(),
            "output slice must hold preamble and signature"
        );
        let (head, tail) = out.split_at_mut(self.layout.preamble_length());
        head.copy_from_slice(&self.layout.preamble);
        tail.copy_from_slice(&self.buffer);
    }

    /// Ask the oracle whether the composed signature is valid for `message`.
    pub fn is_accepted<O: VerifyOracle>(
        &self,
        oracle: &mut O,
        message: &[u8],
    ) -> Result<bool, RecoveryError> {
        oracle
            .verify(message, &self.compose_full())
            .map_err(RecoveryError::oracle)
    }
}
