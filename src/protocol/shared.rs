//! Thread-safe engine handle.
//!
//! The gap check reads all four parties' counters on every send, so the
//! whole engine sits behind one lock.

use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::ProtocolEngine;
use super::party::Party;
use super::ProtocolError;
use crate::cipher::bits::BitString;

/// A [`ProtocolEngine`] behind a single mutex, cloneable across threads.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ProtocolEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ProtocolEngine) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    fn lock(&self) -> MutexGuard<'_, ProtocolEngine> {
        // Commit happens after all fallible work, so a poisoned engine is consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn send(&self, sender: Party, message: &BitString) -> Result<(BitString, usize), ProtocolError> {
        self.lock().send(sender, message)
    }

    pub fn decrypt(&self, ciphertext: &BitString, pad_index: usize) -> Result<BitString, ProtocolError> {
        self.lock().decrypt(ciphertext, pad_index)
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut ProtocolEngine) -> T) -> T {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProtocolConfig;
    use crate::entropy::OsEntropy;
    use std::collections::BTreeSet;
    use std::thread;

    #[test]
    fn test_concurrent_senders_never_share_a_pad() {
        let engine = ProtocolEngine::new(ProtocolConfig::new(400, 64, 400), &mut OsEntropy).unwrap();
        let shared = SharedEngine::new(engine);

        let handles: Vec<_> = Party::ALL
            .into_iter()
            .map(|party| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let message = BitString::from_bytes(&[party.index() as u8; 8]);
                    let mut sent = Vec::new();
                    while let Ok((ct, index)) = shared.send(party, &message) {
                        sent.push((ct, index, message.clone()));
                    }
                    sent
                })
            })
            .collect();

        let mut indices = BTreeSet::new();
        for handle in handles {
            for (ct, index, message) in handle.join().unwrap() {
                assert!(indices.insert(index));
                assert_eq!(shared.decrypt(&ct, index).unwrap(), message);
            }
        }
        assert_eq!(indices.len(), 400);
        assert_eq!(shared.with(|e| e.unissued_count()), 0);
    }
}
