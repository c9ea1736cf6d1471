//! Fixed-length bit strings.
//!
//! Bits are packed MSB-first into bytes. When the length is not a multiple of
//! eight, the unused low bits of the last byte are always zero, so two bit
//! strings of the same length compare equal exactly when their bits do.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use zeroize::Zeroize;

/// An opaque string of `len_bits()` bits.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitString {
    bytes: Vec<u8>,
    bits: usize,
}

/// Wire form of a [`BitString`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBitString {
    bytes: Vec<u8>,
    bits: usize,
}

/// Rejected wire form: the byte count does not match the bit length.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LengthMismatch {
    bits: usize,
    bytes: usize,
}

#[cfg(feature = "serde")]
impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bits need {} bytes, got {}",
            self.bits,
            byte_len(self.bits),
            self.bytes
        )
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BitString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::Deserialize;

        let raw = RawBitString::deserialize(deserializer)?;
        if raw.bytes.len() != byte_len(raw.bits) {
            return Err(serde::de::Error::custom(LengthMismatch {
                bits: raw.bits,
                bytes: raw.bytes.len(),
            }));
        }
        Ok(Self::from_masked_vec(raw.bytes, raw.bits))
    }
}

/// Number of bytes needed to hold `bits` bits.
#[inline]
pub const fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Clears the unused low bits of the final byte of a `bits`-bit buffer.
#[inline]
pub(crate) fn mask_tail(bytes: &mut [u8], bits: usize) {
    let rem = bits % 8;
    if rem != 0 {
        if let Some(last) = bytes.last_mut() {
            *last &= 0xFFu8 << (8 - rem);
        }
    }
}

impl BitString {
    /// A bit string holding every bit of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            bits: bytes.len() * 8,
        }
    }

    /// The first `bits` bits of `bytes`.
    ///
    /// Returns `None` when `bytes` holds fewer than `bits` bits.
    pub fn from_bytes_with_len(bytes: &[u8], bits: usize) -> Option<Self> {
        let needed = byte_len(bits);
        if bytes.len() < needed {
            return None;
        }
        let mut owned = bytes[..needed].to_vec();
        mask_tail(&mut owned, bits);
        Some(Self { bytes: owned, bits })
    }

    /// `bits` zero bits.
    pub fn zeros(bits: usize) -> Self {
        Self {
            bytes: vec![0u8; byte_len(bits)],
            bits,
        }
    }

    /// Takes ownership of an already-masked buffer.
    pub(crate) fn from_masked_vec(mut bytes: Vec<u8>, bits: usize) -> Self {
        bytes.truncate(byte_len(bits));
        mask_tail(&mut bytes, bits);
        Self { bytes, bits }
    }

    /// Length in bits.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Packed bytes; the unused tail bits are zero.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the string, returning the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Value of bit `i` (0 is the most significant bit of the first byte).
    pub fn bit(&self, i: usize) -> Option<bool> {
        if i >= self.bits {
            return None;
        }
        Some(self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }

    /// Lowercase hex of the packed bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({} bits, 0x{})", self.bits, self.to_hex())
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<&[u8]> for BitString {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for BitString {
    fn from(bytes: Vec<u8>) -> Self {
        let bits = bytes.len() * 8;
        Self { bytes, bits }
    }
}
