//! Test fixtures and data for selector tests

use shared::{MemberId, PairingHistory};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Seed used wherever a test needs reproducible randomness
    pub const SEED: u64 = 20_241_225;

    /// Trials for statistical checks of the random strategy
    pub const RANDOM_TRIALS: usize = 10_000;

    pub fn members(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|&id| MemberId::from(id)).collect()
    }

    pub fn trio() -> Vec<MemberId> {
        Self::members(&["a", "b", "c"])
    }

    pub fn quartet() -> Vec<MemberId> {
        Self::members(&["a", "b", "c", "d"])
    }

    /// Eight members keeps exhaustive search well under a second
    pub fn octet() -> Vec<MemberId> {
        Self::members(&["alice", "bob", "carol", "dave", "eve", "fred", "george", "harry"])
    }

    /// Nine members, the size the random strategy is stress-tested with
    pub fn nonet() -> Vec<MemberId> {
        Self::members(&["a", "b", "c", "d", "e", "f", "g", "h", "i"])
    }

    pub fn history(pairs: &[(&str, &str)]) -> PairingHistory {
        pairs
            .iter()
            .map(|&(sender, receiver)| (MemberId::from(sender), MemberId::from(receiver)))
            .collect()
    }

    /// Two prior rotations that closed as 2-cycles: a↔b and c↔d
    pub fn paired_quartet_history() -> PairingHistory {
        Self::history(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")])
    }
}
