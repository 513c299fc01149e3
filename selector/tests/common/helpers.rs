//! Test helpers for building histories and checking assignments

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use selector::core::derangement::knuth_shuffle;
use selector::{all_derangements, TallyTable};
use shared::{AssignmentSet, MemberId, PairingHistory};
use std::collections::HashSet;

/// Helper functions shared by the selector suites
pub struct TestHelpers;

impl TestHelpers {
    /// Random history of `rotations` earlier rotations over `members`
    ///
    /// Each rotation involves a random subset of at least four members
    /// (or the whole pool when smaller) closed into a single cycle.
    pub fn random_history(members: &[MemberId], rotations: usize, seed: u64) -> PairingHistory {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut history = PairingHistory::new();
        let minimum = members.len().min(4);

        for _ in 0..rotations {
            let shuffled = knuth_shuffle(members, &mut rng);
            let count = rng.gen_range(minimum..=members.len());
            let taking = &shuffled[..count];
            for (i, sender) in taking.iter().enumerate() {
                history.record(sender.clone(), taking[(i + 1) % count].clone());
            }
        }

        history
    }

    /// Assert every member sends once, receives once, and never to itself
    pub fn assert_valid(set: &AssignmentSet, pool: &[MemberId]) {
        assert_eq!(set.len(), pool.len(), "one pair per member");

        let senders: HashSet<&MemberId> = set.iter().map(|pair| &pair.sender).collect();
        let receivers: HashSet<&MemberId> = set.iter().map(|pair| &pair.receiver).collect();
        let members: HashSet<&MemberId> = pool.iter().collect();

        assert_eq!(senders, members, "every member sends exactly once");
        assert_eq!(receivers, members, "every member receives exactly once");
        assert!(
            set.iter().all(|pair| pair.sender != pair.receiver),
            "nobody is assigned to themselves"
        );
    }

    /// Summed tally score of `set` against `history`
    pub fn score(set: &AssignmentSet, pool: &[MemberId], history: &PairingHistory) -> u64 {
        let tally = TallyTable::build(pool, history);
        set.iter()
            .map(|pair| u64::from(tally.count(&pair.sender, &pair.receiver).unwrap_or(0)))
            .sum()
    }

    /// Lowest score over every derangement, by brute force
    pub fn brute_force_minimum(pool: &[MemberId], history: &PairingHistory) -> u64 {
        let tally = TallyTable::build(pool, history);
        all_derangements(pool)
            .map(|receivers| tally.score(pool, &receivers))
            .min()
            .expect("pool has at least one derangement")
    }
}
