//! Pad sequence management.
//!
//! This module holds the pre-shared pad material and the bookkeeping that
//! keeps each pad strictly one-time.
//!
//! # Components
//! - `sequence`: the immutable, indexed [`PadSequence`].
//! - `usage_stats`: per-party consumption counters and the secrecy-gap check.
//!
//! # Security Guarantees
//! - **Zeroization**: pad bytes are zeroized when the sequence is dropped.
//! - **Immutability**: a sequence is never written after generation, so one
//!   `Arc<PadSequence>` may back any number of engines.

use core::fmt;

use crate::entropy::EntropyError;

pub mod sequence;
pub mod usage_stats;

pub use sequence::PadSequence;
pub use usage_stats::UsageTracker;

/// Errors related to pad material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadError {
    /// Zero-bit pads, or a size that does not fit in memory.
    InvalidGeometry { count: usize, pad_bits: usize },
    /// Raw material does not match the declared geometry.
    LengthMismatch { expected: usize, actual: usize },
    /// The sequence does not have the shape an engine was configured for.
    ConfigMismatch,
    /// Entropy source failed during generation.
    Entropy(EntropyError),
}

impl fmt::Display for PadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PadError::InvalidGeometry { count, pad_bits } => {
                write!(f, "invalid pad geometry: {} pads of {} bits", count, pad_bits)
            }
            PadError::LengthMismatch { expected, actual } => {
                write!(f, "pad material is {} bytes, expected {}", actual, expected)
            }
            PadError::ConfigMismatch => write!(f, "pad sequence does not match engine configuration"),
            PadError::Entropy(e) => write!(f, "pad generation failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PadError {}

impl From<EntropyError> for PadError {
    fn from(e: EntropyError) -> Self {
        PadError::Entropy(e)
    }
}
