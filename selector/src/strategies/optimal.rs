//! History-weighted ("optimal") selection strategy
//!
//! Scores every derangement of the pool by how often its edges occurred in
//! earlier rotations and keeps the lowest. Pools above the exhaustive limit
//! are either rejected or solved as a minimum-cost matching, per
//! [`LargePoolPolicy`].

use shared::{AssignmentSet, MemberId, PairingHistory};
use tracing::debug;

use super::traits::SelectionStrategy;
use crate::config::{LargePoolPolicy, SelectorConfig, DEFAULT_EXHAUSTIVE_LIMIT};
use crate::core::{ensure_minimum, min_cost_derangement, Derangements, TallyMatrix, TallyTable};
use crate::error::{SelectorError, SelectorResult};

/// Optimal selection strategy
///
/// Stateless: the same pool and history always produce the same assignment.
/// Exhaustive search keeps the first derangement (in Heap's order) that
/// reaches the lowest score.
pub struct OptimalStrategy {
    exhaustive_limit: usize,
    large_pools: LargePoolPolicy,
}

impl OptimalStrategy {
    pub fn new() -> Self {
        Self {
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
            large_pools: LargePoolPolicy::default(),
        }
    }

    /// Create a strategy from validated configuration
    ///
    /// # Errors
    /// `ConfigurationError` if the exhaustive limit is out of range
    pub fn from_config(config: &SelectorConfig) -> SelectorResult<Self> {
        config.validate()?;
        Ok(Self {
            exhaustive_limit: config.exhaustive_limit,
            large_pools: config.large_pools,
        })
    }

    /// Lowest-scoring derangement, earliest enumerated on ties
    fn search_exhaustive(matrix: &TallyMatrix) -> Option<(Vec<usize>, u64)> {
        let mut best: Option<(Vec<usize>, u64)> = None;

        for candidate in Derangements::new(matrix.len()) {
            let score = matrix.score(&candidate);
            let improves = best.as_ref().map_or(true, |(_, lowest)| score < *lowest);
            if improves {
                best = Some((candidate, score));
                // Nothing can beat zero, and later zeros would lose the tie anyway
                if score == 0 {
                    break;
                }
            }
        }

        best
    }

    fn search_matching(matrix: &TallyMatrix) -> (Vec<usize>, u64) {
        let receivers = min_cost_derangement(matrix);
        let score = matrix.score(&receivers);
        (receivers, score)
    }
}

impl SelectionStrategy for OptimalStrategy {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn assign(&self, pool: &[MemberId], history: &PairingHistory) -> SelectorResult<AssignmentSet> {
        ensure_minimum(pool)?;

        let tally = TallyTable::build(pool, history);
        let matrix = tally.matrix(pool);

        let (receivers, score) = if pool.len() <= self.exhaustive_limit {
            Self::search_exhaustive(&matrix).ok_or(SelectorError::InsufficientMembers {
                count: pool.len(),
                minimum: crate::core::MIN_POOL_SIZE,
            })?
        } else {
            match self.large_pools {
                LargePoolPolicy::Reject => {
                    return Err(SelectorError::EnumerationOverflow {
                        count: pool.len(),
                        limit: self.exhaustive_limit,
                    });
                }
                LargePoolPolicy::Matching => Self::search_matching(&matrix),
            }
        };

        debug!(
            members = pool.len(),
            prior_pairs = tally.total(),
            score,
            "🧮 Selected lowest-repetition derangement"
        );

        let receivers = receivers.into_iter().map(|j| pool[j].clone()).collect();
        Ok(AssignmentSet::zip(pool, receivers))
    }
}

impl Default for OptimalStrategy {
    fn default() -> Self {
        Self::new()
    }
}
