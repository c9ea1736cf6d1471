//! One-time pad primitives.
//!
//! - `bits`: fixed-length bit strings used for messages, ciphertexts and pads.
//! - `xor`: word-at-a-time XOR.
//! - `otp`: encrypt/decrypt a [`bits::BitString`] against pad bytes.

pub mod bits;
pub mod otp;
pub mod xor;
