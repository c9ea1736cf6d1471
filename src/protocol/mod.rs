//! Protocol Layer.
//!
//! This module implements the four-party pad discipline:
//! - Party identities and their lane/direction bindings (`party`)
//! - Lane allocation over the pad index space (`lanes`)
//! - Issuance, the secrecy-gap check and OTP encryption (`engine`)
//! - A single-lock wrapper for multi-threaded callers (`shared`, `std` only)

use core::fmt;

use crate::cipher::otp::OtpError;
use crate::config::ConfigError;
use crate::entropy::EntropyError;
use crate::pad::PadError;

pub mod engine;
pub mod lanes;
pub mod party;

#[cfg(feature = "std")]
pub mod shared;

pub use engine::{new_engine, ProtocolEngine};
pub use lanes::{allocate, Allocation, PartyCursor};
pub use party::{Direction, Lane, ParsePartyError, Party};

/// Errors related to protocol execution.
///
/// `SecrecyConstraintViolated` and `PadsExhausted` are the runtime outcomes of
/// a send; every other variant is a rejected input. None of them leave the
/// engine partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Issuing the next pad would put `sender` more than `d` pads ahead of `conflicting`.
    SecrecyConstraintViolated { sender: Party, conflicting: Party },
    /// `party`'s lane has no unissued pads left. Permanent for this engine.
    PadsExhausted(Party),
    /// Message or ciphertext longer than a pad.
    MessageTooLong { bits: usize, max: usize },
    /// Index outside `0..n`.
    PadIndexOutOfRange(usize),
    InvalidConfig(ConfigError),
    Pad(PadError),
    Entropy(EntropyError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::SecrecyConstraintViolated { sender, conflicting } => write!(
                f,
                "secrecy constraint violated: {} would run too far ahead of {}",
                sender, conflicting
            ),
            ProtocolError::PadsExhausted(party) => write!(f, "no available pads for {}", party),
            ProtocolError::MessageTooLong { bits, max } => {
                write!(f, "message is {} bits, pads hold {}", bits, max)
            }
            ProtocolError::PadIndexOutOfRange(index) => write!(f, "pad index {} out of range", index),
            ProtocolError::InvalidConfig(e) => write!(f, "invalid configuration: {}", e),
            ProtocolError::Pad(e) => write!(f, "{}", e),
            ProtocolError::Entropy(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

impl From<ConfigError> for ProtocolError {
    fn from(e: ConfigError) -> Self {
        ProtocolError::InvalidConfig(e)
    }
}

impl From<PadError> for ProtocolError {
    fn from(e: PadError) -> Self {
        ProtocolError::Pad(e)
    }
}

impl From<EntropyError> for ProtocolError {
    fn from(e: EntropyError) -> Self {
        ProtocolError::Entropy(e)
    }
}

impl From<OtpError> for ProtocolError {
    fn from(e: OtpError) -> Self {
        match e {
            OtpError::KeystreamTooShort { needed_bits, pad_bits } => ProtocolError::MessageTooLong {
                bits: needed_bits,
                max: pad_bits,
            },
        }
    }
}
