//! Per-party pad consumption and the secrecy-gap check.
//!
//! Progress is measured as the number of pads each party has consumed, not as
//! raw index values: Alice and Charlie move up the sequence while Bob and
//! Ellen move down it, so index arithmetic would mix "where" with "how far".
//! A consumed count grows by one per send whatever the direction.
//!
//! # Invariants
//! - **Monotonicity**: counters never decrease.
//! - **Gap**: after every successful send, the sender's count exceeds no
//!   constraining party's count by more than `d`.

use crate::config::SilentPartyPolicy;
use crate::protocol::party::Party;

/// Consumption counters and last-used indices for the four parties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageTracker {
    consumed: [usize; 4],
    last_used: [Option<usize>; 4],
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pads consumed by `party` so far.
    pub fn consumed(&self, party: Party) -> usize {
        self.consumed[party.index()]
    }

    /// Most recent index issued to `party`, `None` before its first send.
    pub fn last_used(&self, party: Party) -> Option<usize> {
        self.last_used[party.index()]
    }

    pub fn has_sent(&self, party: Party) -> bool {
        self.last_used[party.index()].is_some()
    }

    /// Total pads issued across all parties.
    pub fn total_consumed(&self) -> usize {
        self.consumed.iter().sum()
    }

    /// The first party (in [`Party::ALL`] order) that would be more than
    /// `max_gap` behind `sender` if `sender` consumed one more pad.
    ///
    /// Read-only: a `Some` result must leave every counter unchanged.
    pub fn conflicting_party(&self, sender: Party, max_gap: usize, policy: SilentPartyPolicy) -> Option<Party> {
        let next = self.consumed(sender) + 1;
        Party::ALL.into_iter().filter(|&p| p != sender).find(|&p| {
            if policy == SilentPartyPolicy::Ignored && !self.has_sent(p) {
                return false;
            }
            next.saturating_sub(self.consumed(p)) > max_gap
        })
    }

    /// Records that `party` was issued pad `index`.
    pub fn record(&mut self, party: Party, index: usize) {
        let i = party.index();
        self.consumed[i] += 1;
        self.last_used[i] = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_basic() {
        let mut tracker = UsageTracker::new();
        assert_eq!(tracker.consumed(Party::Alice), 0);
        assert_eq!(tracker.last_used(Party::Alice), None);

        tracker.record(Party::Alice, 0);
        tracker.record(Party::Alice, 2);
        tracker.record(Party::Bob, 998);

        assert_eq!(tracker.consumed(Party::Alice), 2);
        assert_eq!(tracker.last_used(Party::Alice), Some(2));
        assert_eq!(tracker.last_used(Party::Bob), Some(998));
        assert_eq!(tracker.total_consumed(), 3);
        assert!(!tracker.has_sent(Party::Ellen));
    }

    #[test]
    fn test_silent_parties_ignored() {
        let mut tracker = UsageTracker::new();
        for i in 0..10 {
            tracker.record(Party::Alice, 2 * i);
        }
        assert_eq!(tracker.conflicting_party(Party::Alice, 2, SilentPartyPolicy::Ignored), None);
    }

    #[test]
    fn test_silent_parties_constraining() {
        let mut tracker = UsageTracker::new();
        tracker.record(Party::Alice, 0);
        tracker.record(Party::Alice, 2);
        // A third send would put Alice 3 ahead of Bob.
        assert_eq!(
            tracker.conflicting_party(Party::Alice, 2, SilentPartyPolicy::Constraining),
            Some(Party::Bob)
        );
        assert_eq!(tracker.conflicting_party(Party::Alice, 3, SilentPartyPolicy::Constraining), None);
    }

    #[test]
    fn test_gap_is_direction_independent() {
        let mut tracker = UsageTracker::new();
        // Ellen starts at the top of the sequence; her indices are large but
        // her progress is small.
        tracker.record(Party::Ellen, 999);
        tracker.record(Party::Charlie, 1);
        tracker.record(Party::Charlie, 3);
        tracker.record(Party::Charlie, 5);
        assert_eq!(
            tracker.conflicting_party(Party::Charlie, 2, SilentPartyPolicy::Ignored),
            Some(Party::Ellen)
        );
        assert_eq!(tracker.conflicting_party(Party::Ellen, 2, SilentPartyPolicy::Ignored), None);
    }

    #[test]
    fn test_lagging_sender_never_conflicts() {
        let mut tracker = UsageTracker::new();
        for i in 0..5 {
            tracker.record(Party::Bob, 100 - 2 * i);
        }
        tracker.record(Party::Alice, 0);
        assert_eq!(tracker.conflicting_party(Party::Alice, 1, SilentPartyPolicy::Ignored), None);
    }
}
