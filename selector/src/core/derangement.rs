//! Derangement generation
//!
//! Two generators: a random one built from a Knuth shuffle followed by a
//! cyclic shift, and an exhaustive one that walks every permutation with
//! Heap's algorithm and keeps those without fixed points.

use rand::Rng;
use shared::{AssignmentPair, AssignmentSet, MemberId};

use crate::error::{SelectorError, SelectorResult};

/// Uniform Knuth shuffle
///
/// Step `i` (1..n) swaps position `i` with a uniformly chosen index in `[0, i]`.
pub fn knuth_shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in 1..shuffled.len() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Draw a random derangement of `pool`
///
/// The pool is shuffled into an order `S` and each `S[i]` sends to
/// `S[(i + 1) % n]`. A cyclic shift by one never maps an element to itself,
/// so no rejection sampling is needed. Pairs come back in shuffled order.
/// An empty pool gives an empty set; a single member is an error.
pub fn random_derangement<R: Rng + ?Sized>(
    pool: &[MemberId],
    rng: &mut R,
) -> SelectorResult<AssignmentSet> {
    match pool.len() {
        0 => return Ok(AssignmentSet::default()),
        1 => {
            return Err(SelectorError::InsufficientMembers {
                count: 1,
                minimum: super::MIN_POOL_SIZE,
            })
        }
        _ => {}
    }

    let shuffled = knuth_shuffle(pool, rng);
    let len = shuffled.len();
    let pairs = shuffled
        .iter()
        .enumerate()
        .map(|(i, sender)| AssignmentPair::new(sender.clone(), shuffled[(i + 1) % len].clone()))
        .collect();

    Ok(AssignmentSet::from_pairs(pairs))
}

/// Lazy iterator over every derangement of `0..len`
///
/// Each item is a receiver index per position: position `i` sends to
/// `item[i]`, and `item[i] != i` always holds. Enumeration follows the
/// iterative form of Heap's algorithm, so the order is fixed for a given
/// length. Clone the iterator (or build a new one) to restart.
///
/// The walk visits all `len!` permutations; anything past a dozen members
/// is impractical.
#[derive(Debug, Clone)]
pub struct Derangements {
    permutation: Vec<usize>,
    counters: Vec<usize>,
    index: usize,
}

impl Derangements {
    pub fn new(len: usize) -> Self {
        Self {
            permutation: (0..len).collect(),
            counters: vec![0; len],
            index: 1,
        }
    }

    fn is_derangement(permutation: &[usize]) -> bool {
        permutation
            .iter()
            .enumerate()
            .all(|(position, &value)| position != value)
    }
}

impl Iterator for Derangements {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.permutation.len();

        while self.index < len {
            let i = self.index;
            if self.counters[i] < i {
                let k = if i % 2 == 1 { self.counters[i] } else { 0 };
                self.permutation.swap(i, k);
                self.counters[i] += 1;
                self.index = 1;

                if Self::is_derangement(&self.permutation) {
                    return Some(self.permutation.clone());
                }
            } else {
                self.counters[i] = 0;
                self.index += 1;
            }
        }

        None
    }
}

/// Every derangement of `pool`, as receiver lists in pool order
pub fn all_derangements(pool: &[MemberId]) -> impl Iterator<Item = Vec<MemberId>> + '_ {
    Derangements::new(pool.len())
        .map(move |receivers| receivers.into_iter().map(|j| pool[j].clone()).collect())
}

/// Number of derangements of `n` elements (!n)
///
/// `None` once the count no longer fits in a `u64` (n > 20).
pub fn subfactorial(n: usize) -> Option<u64> {
    let (mut previous, mut current) = (1u64, 0u64);
    if n == 0 {
        return Some(previous);
    }
    for k in 2..=n as u64 {
        let next = previous.checked_add(current)?.checked_mul(k - 1)?;
        previous = current;
        current = next;
    }
    Some(current)
}
