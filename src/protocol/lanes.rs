//! Lane allocation.
//!
//! Indices `0..n` are split by parity into two lanes. Each lane is a window of
//! unissued positions `[front, back)`: the forward party takes `front`, the
//! backward party takes `back - 1`, and the two meet in the middle. A party's
//! [`PartyCursor`] is that window read in the party's own direction, so at
//! setup Alice sees every even index ascending and Bob every even index
//! descending. Lane-mates share the unissued middle; an index leaves the
//! window exactly once, so it can never be issued twice.

use alloc::vec::Vec;
use core::ops::Range;

use super::party::{Direction, Lane, Party};

/// Unissued window of one lane, in lane positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LaneWindow {
    front: usize,
    back: usize,
    len: usize,
}

impl LaneWindow {
    fn new(len: usize) -> Self {
        Self { front: 0, back: len, len }
    }

    fn remaining(&self) -> usize {
        self.back - self.front
    }

    fn contains(&self, position: usize) -> bool {
        (self.front..self.back).contains(&position)
    }

    /// First position attributed to the backward party when splitting
    /// leftovers between lane-mates.
    fn midpoint(&self) -> usize {
        self.len.div_ceil(2)
    }
}

/// A party's view of the unissued indices of its lane, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyCursor {
    party: Party,
    front: usize,
    back: usize,
}

impl PartyCursor {
    /// Owner of this view.
    pub fn party(&self) -> Party {
        self.party
    }

    /// Next index this party would be issued.
    pub fn peek(&self) -> Option<usize> {
        self.iter().next()
    }

    /// Number of indices still available to this party.
    pub fn remaining(&self) -> usize {
        self.back - self.front
    }

    /// True when nothing is left for this party.
    pub fn is_exhausted(&self) -> bool {
        self.front == self.back
    }

    /// Whether `index` is still available to this party.
    pub fn contains(&self, index: usize) -> bool {
        let (lane, position) = Lane::locate(index);
        lane == self.party.lane() && (self.front..self.back).contains(&position)
    }

    /// Remaining indices, next one first.
    pub fn iter(&self) -> CursorIter {
        CursorIter {
            lane: self.party.lane(),
            direction: self.party.direction(),
            positions: self.front..self.back,
        }
    }

    /// Remaining indices collected in traversal order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl IntoIterator for &PartyCursor {
    type Item = usize;
    type IntoIter = CursorIter;

    fn into_iter(self) -> CursorIter {
        self.iter()
    }
}

/// Iterator over a [`PartyCursor`]'s indices.
#[derive(Debug, Clone)]
pub struct CursorIter {
    lane: Lane,
    direction: Direction,
    positions: Range<usize>,
}

impl Iterator for CursorIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let position = match self.direction {
            Direction::Forward => self.positions.next(),
            Direction::Backward => self.positions.next_back(),
        }?;
        Some(self.lane.index_at(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl ExactSizeIterator for CursorIter {}

/// Lane windows for a sequence of `n` pads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    n: usize,
    lanes: [LaneWindow; 2],
}

/// Computes the initial allocation for `n` pads.
///
/// Alice: ascending evens, Bob: descending evens, Charlie: ascending odds,
/// Ellen: descending odds. Every index below `n` lies in exactly one lane.
pub fn allocate(n: usize) -> Allocation {
    Allocation {
        n,
        lanes: [
            LaneWindow::new(Lane::Even.len(n)),
            LaneWindow::new(Lane::Odd.len(n)),
        ],
    }
}

impl Allocation {
    fn window(&self, lane: Lane) -> &LaneWindow {
        &self.lanes[lane.parity()]
    }

    fn window_mut(&mut self, lane: Lane) -> &mut LaneWindow {
        &mut self.lanes[lane.parity()]
    }

    /// Total number of pads `n`.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for a zero-pad sequence.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `party`'s view of its lane window.
    pub fn cursor(&self, party: Party) -> PartyCursor {
        let w = self.window(party.lane());
        PartyCursor { party, front: w.front, back: w.back }
    }

    /// Cursors for all four parties, in [`Party::ALL`] order.
    pub fn cursors(&self) -> [PartyCursor; 4] {
        Party::ALL.map(|p| self.cursor(p))
    }

    /// Next index `party` would be issued.
    pub fn peek(&self, party: Party) -> Option<usize> {
        self.cursor(party).peek()
    }

    /// Removes and returns `party`'s next index. Irreversible.
    pub(crate) fn take(&mut self, party: Party) -> Option<usize> {
        let lane = party.lane();
        let w = self.window_mut(lane);
        if w.front == w.back {
            return None;
        }
        let position = match party.direction() {
            Direction::Forward => {
                w.front += 1;
                w.front - 1
            }
            Direction::Backward => {
                w.back -= 1;
                w.back
            }
        };
        Some(lane.index_at(position))
    }

    /// True once `index` has left its lane's window.
    pub fn is_issued(&self, index: usize) -> bool {
        if index >= self.n {
            return false;
        }
        let (lane, position) = Lane::locate(index);
        !self.window(lane).contains(position)
    }

    /// The party that issued `index`, or would be charged for it if it is
    /// never issued. `None` for indices outside the sequence.
    ///
    /// Issued indices belong to whichever end consumed them. Unissued ones
    /// are split at the lane midpoint: the half nearer the forward end goes
    /// to the forward party.
    pub fn owner(&self, index: usize) -> Option<Party> {
        if index >= self.n {
            return None;
        }
        let (lane, position) = Lane::locate(index);
        let w = self.window(lane);
        let (forward, backward) = lane.parties();
        let forward_side = if position < w.front {
            true
        } else if position >= w.back {
            false
        } else {
            position < w.midpoint()
        };
        Some(if forward_side { forward } else { backward })
    }

    /// Unissued indices charged to `party` under [`Allocation::owner`].
    pub fn attributed_remaining(&self, party: Party) -> usize {
        let w = self.window(party.lane());
        let mid = w.midpoint().clamp(w.front, w.back);
        match party.direction() {
            Direction::Forward => mid - w.front,
            Direction::Backward => w.back - mid,
        }
    }

    /// Unissued indices left in `lane`.
    pub fn lane_remaining(&self, lane: Lane) -> usize {
        self.window(lane).remaining()
    }

    /// Unissued indices across both lanes.
    pub fn unissued(&self) -> usize {
        self.lanes.iter().map(LaneWindow::remaining).sum()
    }

    /// Indices issued so far.
    pub fn issued(&self) -> usize {
        self.n - self.unissued()
    }
}
