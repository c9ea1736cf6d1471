//! Caller-provided entropy.
//!
//! Used to load pad material that was generated and shared out of band, and
//! to make pad contents predictable in tests.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use zeroize::Zeroize;

use super::{EntropyError, EntropySource};

/// Source that hands out injected bytes in order.
pub struct CustomSource {
    buffer: VecDeque<u8>,
}

impl CustomSource {
    /// Creates a new empty CustomSource.
    pub fn new() -> Self {
        Self { buffer: VecDeque::new() }
    }

    pub fn with_bytes(bytes: &[u8]) -> Self {
        let mut source = Self::new();
        source.add_bytes(bytes);
        source
    }

    /// Add entropy bytes to the pool.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes.iter().copied());
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for CustomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CustomSource {
    fn drop(&mut self) {
        let (a, b) = self.buffer.as_mut_slices();
        a.zeroize();
        b.zeroize();
    }
}

impl EntropySource for CustomSource {
    fn name(&self) -> &'static str {
        "CustomInput"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if self.buffer.len() < dest.len() {
            return Err(EntropyError::Exhausted);
        }
        let mut drained: Vec<u8> = self.buffer.drain(..dest.len()).collect();
        dest.copy_from_slice(&drained);
        drained.zeroize();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_source() {
        let mut source = CustomSource::with_bytes(&[0x01, 0x02, 0x03, 0x04]);

        let mut buf = [0u8; 2];
        assert!(source.fill(&mut buf).is_ok());
        assert_eq!(buf, [0x01, 0x02]);
        assert_eq!(source.remaining(), 2);

        assert!(source.fill(&mut buf).is_ok());
        assert_eq!(buf, [0x03, 0x04]);

        assert_eq!(source.fill(&mut buf), Err(EntropyError::Exhausted));
    }

    #[test]
    fn test_short_fill_consumes_nothing() {
        let mut source = CustomSource::with_bytes(&[9, 9, 9]);
        let mut buf = [0u8; 4];
        assert_eq!(source.fill(&mut buf), Err(EntropyError::Exhausted));
        assert_eq!(source.remaining(), 3);
    }
}
