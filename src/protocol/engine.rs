//! The protocol engine.
//!
//! Owns the per-party state for one session: the lane windows, the consumed
//! counters and last-used indices, and a handle on the shared pad sequence.
//! There is no global state; two engines never share anything mutable.
//!
//! # Send
//! 1. Fail with `PadsExhausted` if the sender's lane is empty.
//! 2. Peek the sender's next index.
//! 3. Fail with `SecrecyConstraintViolated` if one more send would put the
//!    sender more than `d` pads ahead of a constraining party.
//! 4. Encrypt, then commit: pop the index and record it.
//!
//! Every check runs before the commit, so a failed send leaves the engine
//! exactly as it was.

use alloc::sync::Arc;

use super::lanes::{allocate, Allocation, PartyCursor};
use super::party::Party;
use super::ProtocolError;
use crate::cipher::bits::BitString;
use crate::cipher::otp;
use crate::config::ProtocolConfig;
use crate::entropy::EntropySource;
use crate::pad::{PadError, PadSequence, UsageTracker};

/// Level for refused sends. Refusals are routine in long runs.
pub(crate) const REFUSAL_LOG_LEVEL: log::Level = log::Level::Debug;

/// Issues pads to the four parties and performs OTP encryption.
pub struct ProtocolEngine {
    config: ProtocolConfig,
    pads: Arc<PadSequence>,
    allocation: Allocation,
    usage: UsageTracker,
}

/// Builds an engine with `n` fresh pads of `pad_bits` bits and gap `max_gap`.
pub fn new_engine(
    n: usize,
    pad_bits: usize,
    max_gap: usize,
    entropy: &mut dyn EntropySource,
) -> Result<ProtocolEngine, ProtocolError> {
    ProtocolEngine::new(ProtocolConfig::new(n, pad_bits, max_gap), entropy)
}

impl ProtocolEngine {
    /// Generates a fresh pad sequence from `entropy` and builds an engine on it.
    pub fn new(config: ProtocolConfig, entropy: &mut dyn EntropySource) -> Result<Self, ProtocolError> {
        config.validate()?;
        let pads = PadSequence::generate(config.pad_count, config.pad_bits, entropy)?;
        Self::with_pads(config, Arc::new(pads))
    }

    /// Builds an engine over an existing sequence. The sequence must have
    /// exactly `config.pad_count` pads of `config.pad_bits` bits.
    pub fn with_pads(config: ProtocolConfig, pads: Arc<PadSequence>) -> Result<Self, ProtocolError> {
        config.validate()?;
        if pads.len() != config.pad_count || pads.pad_bits() != config.pad_bits {
            return Err(PadError::ConfigMismatch.into());
        }
        Ok(Self {
            config,
            allocation: allocate(config.pad_count),
            usage: UsageTracker::new(),
            pads,
        })
    }

    /// Parameters the engine was built with.
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// The shared pad sequence.
    pub fn pads(&self) -> &Arc<PadSequence> {
        &self.pads
    }

    /// Current lane windows.
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Runs the send checks without issuing anything.
    ///
    /// Returns the index `sender` would be issued next.
    pub fn can_send(&self, sender: Party) -> Result<usize, ProtocolError> {
        let index = self
            .allocation
            .peek(sender)
            .ok_or(ProtocolError::PadsExhausted(sender))?;
        if let Some(conflicting) =
            self.usage
                .conflicting_party(sender, self.config.max_gap, self.config.silent_parties)
        {
            return Err(ProtocolError::SecrecyConstraintViolated { sender, conflicting });
        }
        Ok(index)
    }

    /// Encrypts `message` for `sender` with the sender's next pad.
    ///
    /// Returns the ciphertext and the index of the pad used.
    ///
    /// # Errors
    /// * `MessageTooLong` if `message` is longer than a pad.
    /// * `PadsExhausted` if the sender's lane is empty.
    /// * `SecrecyConstraintViolated` if the send would break the gap bound.
    pub fn send(&mut self, sender: Party, message: &BitString) -> Result<(BitString, usize), ProtocolError> {
        if message.len_bits() > self.config.pad_bits {
            return Err(ProtocolError::MessageTooLong {
                bits: message.len_bits(),
                max: self.config.pad_bits,
            });
        }

        let index = self.can_send(sender).map_err(|e| {
            log::log!(REFUSAL_LOG_LEVEL, "Send refused: {}", e);
            e
        })?;
        let pad = self
            .pads
            .pad(index)
            .ok_or(ProtocolError::PadIndexOutOfRange(index))?;
        let ciphertext = otp::encrypt(message, pad, self.config.pad_bits)?;

        // Commit.
        let issued = self.allocation.take(sender);
        debug_assert_eq!(issued, Some(index));
        self.usage.record(sender, index);

        log::debug!(
            "{} issued pad {} ({} consumed, {} left in lane)",
            sender,
            index,
            self.usage.consumed(sender),
            self.allocation.lane_remaining(sender.lane())
        );
        Ok((ciphertext, index))
    }

    /// [`ProtocolEngine::send`] for a whole-byte message.
    pub fn send_bytes(&mut self, sender: Party, message: &[u8]) -> Result<(BitString, usize), ProtocolError> {
        self.send(sender, &BitString::from_bytes(message))
    }

    /// Decrypts `ciphertext` with pad `pad_index`.
    ///
    /// Pure over the shared pads: the index may come from any engine built
    /// on the same sequence, and the gap constraint is not re-checked. Use
    /// [`Allocation::is_issued`] to ask whether this engine issued it.
    pub fn decrypt(&self, ciphertext: &BitString, pad_index: usize) -> Result<BitString, ProtocolError> {
        let pad = self
            .pads
            .pad(pad_index)
            .ok_or(ProtocolError::PadIndexOutOfRange(pad_index))?;
        Ok(otp::decrypt(ciphertext, pad, self.config.pad_bits)?)
    }

    /// `party`'s remaining indices in traversal order.
    pub fn cursor(&self, party: Party) -> PartyCursor {
        self.allocation.cursor(party)
    }

    /// Indices `party` could still be issued.
    pub fn remaining(&self, party: Party) -> usize {
        self.cursor(party).remaining()
    }

    /// Pads issued to `party` so far.
    pub fn consumed(&self, party: Party) -> usize {
        self.usage.consumed(party)
    }

    /// Index of `party`'s most recent pad, `None` before its first send.
    pub fn last_used(&self, party: Party) -> Option<usize> {
        self.usage.last_used(party)
    }

    /// True once `party`'s lane is empty. Never reverts.
    pub fn is_exhausted(&self, party: Party) -> bool {
        self.cursor(party).is_exhausted()
    }

    /// Pads issued to any party.
    pub fn issued_count(&self) -> usize {
        self.allocation.issued()
    }

    /// Pads still unissued; at the end of a trial, the wastage.
    pub fn unissued_count(&self) -> usize {
        self.allocation.unissued()
    }
}

impl core::fmt::Debug for ProtocolEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProtocolEngine")
            .field("config", &self.config)
            .field("allocation", &self.allocation)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}
