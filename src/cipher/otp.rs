#![forbid(unsafe_code)]

use alloc::vec;
use core::fmt;

use super::bits::{byte_len, BitString};
use super::xor::xor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpError {
    /// The pad holds fewer bits than the input.
    KeystreamTooShort { needed_bits: usize, pad_bits: usize },
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpError::KeystreamTooShort { needed_bits, pad_bits } => {
                write!(f, "keystream too short: need {} bits, pad has {}", needed_bits, pad_bits)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OtpError {}

/// OTP encryption of `plaintext` with the leading bits of a `pad_bits`-bit pad.
/// Requires `plaintext.len_bits() <= pad_bits`.
#[inline(always)]
pub fn encrypt(plaintext: &BitString, pad: &[u8], pad_bits: usize) -> Result<BitString, OtpError> {
    let bits = plaintext.len_bits();
    let len = byte_len(bits);
    if bits > pad_bits || pad.len() < len {
        return Err(OtpError::KeystreamTooShort { needed_bits: bits, pad_bits });
    }
    let mut out = vec![0u8; len];
    xor(plaintext.as_bytes(), &pad[..len], &mut out);
    // The pad's bits past `bits` must not leak into the last byte.
    Ok(BitString::from_masked_vec(out, bits))
}

/// OTP decryption via the same `xor()` path as encryption.
#[inline(always)]
pub fn decrypt(ciphertext: &BitString, pad: &[u8], pad_bits: usize) -> Result<BitString, OtpError> {
    encrypt(ciphertext, pad, pad_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let p = BitString::from_bytes(&[1u8, 2, 3, 4, 5, 6]);
        let k = [6u8, 5, 4, 3, 2, 1, 0xFF];
        let ct = encrypt(&p, &k, 56).unwrap();
        assert_eq!(ct.as_bytes(), &[7, 7, 7, 7, 7, 7]);
        let pt = decrypt(&ct, &k, 56).unwrap();
        assert_eq!(pt, p);
    }

    #[test]
    fn test_partial_byte_does_not_leak_pad() {
        let p = BitString::from_bytes_with_len(&[0x00], 3).unwrap();
        let ct = encrypt(&p, &[0xFF], 8).unwrap();
        assert_eq!(ct.len_bits(), 3);
        assert_eq!(ct.as_bytes(), &[0xE0]);
    }

    #[test]
    fn test_message_longer_than_pad() {
        let p = BitString::from_bytes(&[0u8; 2]);
        let err = encrypt(&p, &[0u8; 2], 12).unwrap_err();
        assert_eq!(err, OtpError::KeystreamTooShort { needed_bits: 16, pad_bits: 12 });
    }
}
