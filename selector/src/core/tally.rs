//! Repetition tallies for ordered member pairs
//!
//! A tally records how often each sender→receiver edge occurred in earlier
//! rotations, restricted to the members of the current pool.

use shared::{MemberId, PairingHistory};
use std::collections::HashMap;

/// Prior-occurrence counts for every ordered pair of distinct pool members
///
/// Every pair `(a, b)` with `a != b` has an entry, zero when the history
/// never saw it. There is never an entry for `a == b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyTable {
    counts: HashMap<MemberId, HashMap<MemberId, u32>>,
}

impl TallyTable {
    /// Build the tally for `pool`, ignoring history entries outside it
    pub fn build(pool: &[MemberId], history: &PairingHistory) -> Self {
        let mut counts = HashMap::with_capacity(pool.len());

        for sender in pool {
            let row: HashMap<MemberId, u32> = pool
                .iter()
                .filter(|receiver| *receiver != sender)
                .map(|receiver| (receiver.clone(), 0))
                .collect();
            counts.insert(sender.clone(), row);
        }

        for (sender, receiver, occurrences) in history.iter() {
            if let Some(count) = counts.get_mut(sender).and_then(|row| row.get_mut(receiver)) {
                *count += occurrences;
            }
        }

        Self { counts }
    }

    /// Count for `sender → receiver`; `None` for self-pairs and outsiders
    pub fn count(&self, sender: &MemberId, receiver: &MemberId) -> Option<u32> {
        self.counts.get(sender)?.get(receiver).copied()
    }

    /// Number of ordered pairs tracked
    pub fn len(&self) -> usize {
        self.counts.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .flat_map(HashMap::values)
            .map(|&count| u64::from(count))
            .sum()
    }

    /// Score a positional assignment: the summed count of each edge
    /// `senders[i] → receivers[i]`
    pub fn score(&self, senders: &[MemberId], receivers: &[MemberId]) -> u64 {
        senders
            .iter()
            .zip(receivers)
            .map(|(sender, receiver)| u64::from(self.count(sender, receiver).unwrap_or(0)))
            .sum()
    }

    /// Index-addressed copy of the table in `pool` order
    ///
    /// The diagonal is zero. Searches work on indices so each candidate can
    /// be scored without hashing member ids.
    pub fn matrix(&self, pool: &[MemberId]) -> TallyMatrix {
        let cells = pool
            .iter()
            .map(|sender| {
                pool.iter()
                    .map(|receiver| self.count(sender, receiver).unwrap_or(0))
                    .collect()
            })
            .collect();
        TallyMatrix { cells }
    }
}

/// Square tally matrix indexed by pool position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyMatrix {
    cells: Vec<Vec<u32>>,
}

impl TallyMatrix {
    pub fn from_rows(cells: Vec<Vec<u32>>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, sender: usize, receiver: usize) -> u32 {
        self.cells[sender][receiver]
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Sum of every off-diagonal cell
    pub fn off_diagonal_total(&self) -> u64 {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |(j, _)| *j != i)
                    .map(|(_, &count)| u64::from(count))
            })
            .sum()
    }

    /// Score of `receivers`, where position `i` sends to index `receivers[i]`
    pub fn score(&self, receivers: &[usize]) -> u64 {
        receivers
            .iter()
            .enumerate()
            .map(|(sender, &receiver)| u64::from(self.cells[sender][receiver]))
            .sum()
    }
}
