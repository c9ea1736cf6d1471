//! The four parties and their fixed lane/direction bindings.
//!
//! | Party   | Lane         | Direction | Index order                 |
//! |---------|--------------|-----------|-----------------------------|
//! | Alice   | Even (Lane1) | forward   | 0, 2, 4, ...                |
//! | Bob     | Even (Lane1) | backward  | largest even < n, ..., 2, 0 |
//! | Charlie | Odd (Lane2)  | forward   | 1, 3, 5, ...                |
//! | Ellen   | Odd (Lane2)  | backward  | largest odd < n, ..., 3, 1  |

use core::fmt;
use core::str::FromStr;

/// One of the four fixed identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Party {
    Alice,
    Bob,
    Charlie,
    Ellen,
}

/// Half of the pad sequence selected by index parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    /// Lane1: indices 0, 2, 4, ...
    Even,
    /// Lane2: indices 1, 3, 5, ...
    Odd,
}

/// Traversal direction within a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
}

impl Party {
    pub const ALL: [Party; 4] = [Party::Alice, Party::Bob, Party::Charlie, Party::Ellen];

    /// Stable position in [`Party::ALL`], used to index per-party arrays.
    pub const fn index(self) -> usize {
        match self {
            Party::Alice => 0,
            Party::Bob => 1,
            Party::Charlie => 2,
            Party::Ellen => 3,
        }
    }

    pub const fn lane(self) -> Lane {
        match self {
            Party::Alice | Party::Bob => Lane::Even,
            Party::Charlie | Party::Ellen => Lane::Odd,
        }
    }

    pub const fn direction(self) -> Direction {
        match self {
            Party::Alice | Party::Charlie => Direction::Forward,
            Party::Bob | Party::Ellen => Direction::Backward,
        }
    }

    /// The other party consuming the same lane from the opposite end.
    pub const fn lane_mate(self) -> Party {
        match self {
            Party::Alice => Party::Bob,
            Party::Bob => Party::Alice,
            Party::Charlie => Party::Ellen,
            Party::Ellen => Party::Charlie,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Party::Alice => "Alice",
            Party::Bob => "Bob",
            Party::Charlie => "Charlie",
            Party::Ellen => "Ellen",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text that names none of the four parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePartyError;

impl fmt::Display for ParsePartyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown party identity")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParsePartyError {}

impl FromStr for Party {
    type Err = ParsePartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Party::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParsePartyError)
    }
}

impl Lane {
    /// Parity of the indices this lane owns.
    pub const fn parity(self) -> usize {
        match self {
            Lane::Even => 0,
            Lane::Odd => 1,
        }
    }

    /// Number of indices below `n` in this lane.
    pub const fn len(self, n: usize) -> usize {
        match self {
            Lane::Even => n.div_ceil(2),
            Lane::Odd => n / 2,
        }
    }

    /// Pad index at `position` within the lane.
    pub const fn index_at(self, position: usize) -> usize {
        2 * position + self.parity()
    }

    /// Lane and position of a pad index.
    pub const fn locate(index: usize) -> (Lane, usize) {
        let lane = if index % 2 == 0 { Lane::Even } else { Lane::Odd };
        (lane, index / 2)
    }

    /// (forward party, backward party)
    pub const fn parties(self) -> (Party, Party) {
        match self {
            Lane::Even => (Party::Alice, Party::Bob),
            Lane::Odd => (Party::Charlie, Party::Ellen),
        }
    }
}
