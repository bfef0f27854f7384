//! Boundary to the external verifier whose timing is being measured.
//!
//! The engine only ever calls [`VerifyOracle::verify`]. The boolean result is
//! used once, for the final acceptance check; everything else relies on how
//! long the call took.

use std::convert::Infallible;
use std::marker::PhantomData;

/// A signature verifier treated as a black box.
///
/// Implementations must not retain state that changes the boolean outcome
/// between calls. Timing is the side effect of interest, not something the
/// implementation controls.
pub trait VerifyOracle {
    /// Error raised by the verifier. Any error aborts the run.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Verify `signature` over `message`.
    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Self::Error>;
}

impl<O: VerifyOracle + ?Sized> VerifyOracle for &mut O {
    type Error = O::Error;

    #[inline]
    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Self::Error> {
        (**self).verify(message, signature)
    }
}

impl<O: VerifyOracle + ?Sized> VerifyOracle for Box<O> {
    type Error = O::Error;

    #[inline]
    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Self::Error> {
        (**self).verify(message, signature)
    }
}

/// Adapts an infallible closure into a [`VerifyOracle`].
///
/// ```ignore
/// use sigleak::FnOracle;
///
/// let oracle = FnOracle::new(|msg: &[u8], sig: &[u8]| verifier.verify(msg, sig));
/// ```
#[derive(Debug, Clone)]
pub struct FnOracle<F> {
    f: F,
}

impl<F> FnOracle<F>
where
    F: FnMut(&[u8], &[u8]) -> bool,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Return the wrapped closure.
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F> VerifyOracle for FnOracle<F>
where
    F: FnMut(&[u8], &[u8]) -> bool,
{
    type Error = Infallible;

    #[inline]
    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Infallible> {
        Ok((self.f)(message, signature))
    }
}

/// Adapts a fallible closure into a [`VerifyOracle`].
pub struct TryFnOracle<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> TryFnOracle<F, E>
where
    F: FnMut(&[u8], &[u8]) -> Result<bool, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _error: PhantomData,
        }
    }
}

impl<F, E> VerifyOracle for TryFnOracle<F, E>
where
    F: FnMut(&[u8], &[u8]) -> Result<bool, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    #[inline]
    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, E> {
        (self.f)(message, signature)
    }
}
