//! The pre-shared pad sequence.
//!
//! `n` pads of `L` bits each, stored back to back in one zeroizing buffer.
//! Each pad occupies `ceil(L / 8)` bytes; when `L` is not a multiple of eight
//! the unused low bits of a pad's last byte are cleared, so a pad is exactly
//! `L` random bits.
//!
//! # Security
//! - **Zeroization**: all key material is stored in a `Zeroizing` container.
//! - **Read-only**: there is no API that mutates pad bytes after construction.

use alloc::vec;
use alloc::vec::Vec;
use zeroize::Zeroizing;

use super::PadError;
use crate::cipher::bits::{byte_len, mask_tail};
use crate::entropy::EntropySource;

const FINGERPRINT_DOMAIN: &[u8] = b"lanepad.pad-sequence.v1";

/// An immutable, indexed array of random pads.
pub struct PadSequence {
    data: Zeroizing<Vec<u8>>,
    count: usize,
    pad_bits: usize,
    stride: usize,
}

impl PadSequence {
    /// Generates `count` pads of `pad_bits` bits from `entropy`.
    ///
    /// # Errors
    /// * `PadError::InvalidGeometry` if `pad_bits == 0` or the total size overflows.
    /// * `PadError::Entropy` if the source fails.
    pub fn generate(count: usize, pad_bits: usize, entropy: &mut dyn EntropySource) -> Result<Self, PadError> {
        let (stride, total) = Self::geometry(count, pad_bits)?;

        let mut data = Zeroizing::new(vec![0u8; total]);
        entropy.fill(&mut data)?;
        Self::mask_pads(&mut data, stride, pad_bits);

        log::debug!(
            "Generated {} pads of {} bits from {}",
            count,
            pad_bits,
            entropy.name()
        );

        Ok(Self { data, count, pad_bits, stride })
    }

    /// Wraps pad material that was generated and shared out of band.
    ///
    /// `bytes` must hold exactly `count * ceil(pad_bits / 8)` bytes.
    pub fn from_raw(count: usize, pad_bits: usize, bytes: Vec<u8>) -> Result<Self, PadError> {
        let mut data = Zeroizing::new(bytes);
        let (stride, total) = Self::geometry(count, pad_bits)?;
        if data.len() != total {
            return Err(PadError::LengthMismatch { expected: total, actual: data.len() });
        }
        Self::mask_pads(&mut data, stride, pad_bits);
        Ok(Self { data, count, pad_bits, stride })
    }

    fn geometry(count: usize, pad_bits: usize) -> Result<(usize, usize), PadError> {
        if pad_bits == 0 {
            return Err(PadError::InvalidGeometry { count, pad_bits });
        }
        let stride = byte_len(pad_bits);
        let total = count
            .checked_mul(stride)
            .ok_or(PadError::InvalidGeometry { count, pad_bits })?;
        Ok((stride, total))
    }

    fn mask_pads(data: &mut [u8], stride: usize, pad_bits: usize) {
        if pad_bits % 8 != 0 {
            for pad in data.chunks_exact_mut(stride) {
                mask_tail(pad, pad_bits);
            }
        }
    }

    /// Bytes of pad `index`, or `None` if out of range.
    pub fn pad(&self, index: usize) -> Option<&[u8]> {
        if index >= self.count {
            return None;
        }
        let start = index * self.stride;
        Some(&self.data[start..start + self.stride])
    }

    /// Number of pads `n`.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pad length `L` in bits.
    pub fn pad_bits(&self) -> usize {
        self.pad_bits
    }

    /// Bytes per pad.
    pub fn pad_bytes(&self) -> usize {
        self.stride
    }

    /// BLAKE3 digest of the geometry and every pad.
    ///
    /// Parties compare fingerprints to confirm they hold the same sequence
    /// before the first send. It is not an authenticator.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(FINGERPRINT_DOMAIN);
        hasher.update(&(self.count as u64).to_le_bytes());
        hasher.update(&(self.pad_bits as u64).to_le_bytes());
        hasher.update(&self.data);
        *hasher.finalize().as_bytes()
    }
}

impl core::fmt::Debug for PadSequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Never print key material.
        f.debug_struct("PadSequence")
            .field("count", &self.count)
            .field("pad_bits", &self.pad_bits)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{CustomSource, EntropyError};

    // Mock Entropy Source for testing
    struct MockEntropy {
        counter: u8,
    }

    impl MockEntropy {
        fn new() -> Self {
            Self { counter: 0 }
        }
    }

    impl EntropySource for MockEntropy {
        fn name(&self) -> &'static str {
            "Mock"
        }
        fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
            for byte in dest.iter_mut() {
                *byte = self.counter;
                self.counter = self.counter.wrapping_add(1);
            }
            Ok(())
        }
    }

    #[test]
    fn test_sequence_creation() {
        let mut entropy = MockEntropy::new();
        let pads = PadSequence::generate(10, 16, &mut entropy).unwrap();

        assert_eq!(pads.len(), 10);
        assert_eq!(pads.pad_bits(), 16);
        assert_eq!(pads.pad_bytes(), 2);
        assert_eq!(pads.pad(0).unwrap(), &[0, 1]);
        assert_eq!(pads.pad(9).unwrap(), &[18, 19]);
        assert!(pads.pad(10).is_none());
    }

    #[test]
    fn test_pad_tail_is_masked() {
        let mut entropy = CustomSource::with_bytes(&[0xFF; 4]);
        let pads = PadSequence::generate(2, 12, &mut entropy).unwrap();
        assert_eq!(pads.pad(0).unwrap(), &[0xFF, 0xF0]);
        assert_eq!(pads.pad(1).unwrap(), &[0xFF, 0xF0]);
    }

    #[test]
    fn test_zero_bit_pads_rejected() {
        let mut entropy = MockEntropy::new();
        let err = PadSequence::generate(4, 0, &mut entropy).unwrap_err();
        assert_eq!(err, PadError::InvalidGeometry { count: 4, pad_bits: 0 });
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let mut entropy = CustomSource::with_bytes(&[1, 2, 3]);
        let err = PadSequence::generate(4, 8, &mut entropy).unwrap_err();
        assert_eq!(err, PadError::Entropy(EntropyError::Exhausted));
    }

    #[test]
    fn test_from_raw() {
        let pads = PadSequence::from_raw(3, 8, vec![7, 8, 9]).unwrap();
        assert_eq!(pads.pad(2).unwrap(), &[9]);

        let err = PadSequence::from_raw(3, 8, vec![7, 8]).unwrap_err();
        assert_eq!(err, PadError::LengthMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn test_fingerprint_identifies_material() {
        let a = PadSequence::from_raw(2, 8, vec![1, 2]).unwrap();
        let b = PadSequence::from_raw(2, 8, vec![1, 2]).unwrap();
        let c = PadSequence::from_raw(2, 8, vec![1, 3]).unwrap();
        let d = PadSequence::from_raw(1, 16, vec![1, 2]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_ne!(a.fingerprint(), d.fingerprint());
    }

    #[test]
    fn test_debug_hides_material() {
        let pads = PadSequence::from_raw(1, 8, vec![0xAB]).unwrap();
        let s = format!("{:?}", pads);
        assert!(!s.contains("171"));
        assert!(s.contains("count: 1"));
    }
}
