//! Random source capability for pad generation.
//!
//! Pads are only as good as the randomness behind them, so every pad sequence
//! is generated through an [`EntropySource`]. Sources are expected to be
//! cryptographically secure; the crate never falls back to a weaker source on
//! its own.
//!
//! # Sources
//! - [`rng::RngSource`]: adapts any `rand_core` CSPRNG (e.g. a seeded ChaCha20).
//! - [`os::OsEntropy`]: the operating system generator (requires `std`).
//! - [`custom::CustomSource`]: caller-injected bytes, for pre-shared material and tests.

use core::fmt;

pub mod custom;
pub mod rng;

#[cfg(feature = "std")]
pub mod os;

pub use custom::CustomSource;
pub use rng::RngSource;

#[cfg(feature = "std")]
pub use os::OsEntropy;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// Failed to collect sufficient entropy bytes.
    CollectionFailed,
    /// Source is exhausted (e.g., fixed buffer).
    Exhausted,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::CollectionFailed => write!(f, "entropy collection failed"),
            EntropyError::Exhausted => write!(f, "entropy source exhausted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntropyError {}

/// A trait for entropy sources.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with random bytes from the source.
    ///
    /// On error the contents of `dest` are unspecified and must not be used.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
