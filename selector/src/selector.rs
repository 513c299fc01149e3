//! Assignment selector
//!
//! Entry point of the engine: validates the pool, routes to the strategy for
//! the requested mode, and re-checks the result before handing it back.

use shared::{AssignmentSet, MemberId, PairingHistory, SelectionMode};
use tracing::{debug, warn};

use crate::config::SelectorConfig;
use crate::core::ensure_minimum;
use crate::error::SelectorResult;
use crate::strategies::{OptimalStrategy, RandomStrategy, SelectionStrategy};

/// Routes selection requests to one strategy per mode
///
/// Holds no per-call state, so one selector can serve every rotation.
pub struct AssignmentSelector {
    random: Box<dyn SelectionStrategy>,
    optimal: Box<dyn SelectionStrategy>,
}

impl AssignmentSelector {
    /// Create a selector with the built-in strategies
    ///
    /// # Errors
    /// `ConfigurationError` if `config` fails [`SelectorConfig::validate`]
    pub fn new(config: &SelectorConfig) -> SelectorResult<Self> {
        Ok(Self {
            random: Box::new(RandomStrategy::from_config(config)),
            optimal: Box::new(OptimalStrategy::from_config(config)?),
        })
    }

    /// Create a selector with injected strategies
    pub fn with_strategies(
        random: Box<dyn SelectionStrategy>,
        optimal: Box<dyn SelectionStrategy>,
    ) -> Self {
        Self { random, optimal }
    }

    fn strategy_for(&self, mode: SelectionMode) -> &dyn SelectionStrategy {
        match mode {
            SelectionMode::Random => self.random.as_ref(),
            SelectionMode::Optimal => self.optimal.as_ref(),
        }
    }

    /// Compute the assignment for `pool`
    ///
    /// # Errors
    /// - `InsufficientMembers` when the pool has fewer than two members
    /// - `EnumerationOverflow` when optimal search is refused for the pool size
    /// - `InvalidAssignment` if a strategy produced something that is not a
    ///   derangement of the pool
    pub fn select(
        &self,
        pool: &[MemberId],
        mode: SelectionMode,
        history: &PairingHistory,
    ) -> SelectorResult<AssignmentSet> {
        ensure_minimum(pool)?;

        let strategy = self.strategy_for(mode);
        debug!(
            mode = %mode,
            strategy = strategy.name(),
            members = pool.len(),
            history_pairs = history.len(),
            "Selecting assignment"
        );

        let assignment = strategy.assign(pool, history)?;
        if let Err(violation) = assignment.verify(pool) {
            warn!(strategy = strategy.name(), %violation, "Strategy returned an invalid assignment");
            return Err(violation.into());
        }

        Ok(assignment)
    }
}

impl Default for AssignmentSelector {
    fn default() -> Self {
        Self::with_strategies(
            Box::new(RandomStrategy::new()),
            Box::new(OptimalStrategy::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;
    use crate::strategies::MockSelectionStrategy;

    fn members(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|&id| MemberId::from(id)).collect()
    }

    fn untouched() -> Box<MockSelectionStrategy> {
        let mut strategy = MockSelectionStrategy::new();
        strategy.expect_name().return_const("untouched");
        strategy.expect_assign().times(0);
        Box::new(strategy)
    }

    #[test]
    fn test_routes_by_mode() {
        let mut optimal = MockSelectionStrategy::new();
        optimal.expect_name().return_const("mock-optimal");
        optimal
            .expect_assign()
            .times(1)
            .returning(|pool, _| {
                let mut receivers = pool.to_vec();
                receivers.rotate_left(1);
                Ok(AssignmentSet::zip(pool, receivers))
            });

        let selector = AssignmentSelector::with_strategies(untouched(), Box::new(optimal));
        let pool = members(&["a", "b", "c"]);
        let set = selector
            .select(&pool, SelectionMode::Optimal, &PairingHistory::new())
            .unwrap();

        assert_eq!(set.receiver_of(&"c".into()), Some(&"a".into()));
    }

    #[test]
    fn test_rejects_invalid_strategy_output() {
        let mut random = MockSelectionStrategy::new();
        random.expect_name().return_const("identity");
        random
            .expect_assign()
            .returning(|pool, _| Ok(AssignmentSet::zip(pool, pool.to_vec())));

        let selector = AssignmentSelector::with_strategies(Box::new(random), untouched());
        let result = selector.select(&members(&["a", "b"]), SelectionMode::Random, &PairingHistory::new());

        assert!(matches!(result, Err(SelectorError::InvalidAssignment(_))));
    }

    #[test]
    fn test_out_of_range_limits_are_rejected_at_construction() {
        for limit in [0, 1, 13, 30] {
            let config = SelectorConfig::default().with_exhaustive_limit(limit);
            assert!(
                matches!(
                    AssignmentSelector::new(&config),
                    Err(SelectorError::ConfigurationError { .. })
                ),
                "limit {limit}"
            );
        }
    }

    #[test]
    fn test_smallest_limit_still_pairs_two_members() {
        let selector = AssignmentSelector::new(&SelectorConfig::default().with_exhaustive_limit(2)).unwrap();
        let pool = members(&["a", "b"]);
        let set = selector
            .select(&pool, SelectionMode::Optimal, &PairingHistory::new())
            .unwrap();

        assert_eq!(set.receiver_of(&"a".into()), Some(&"b".into()));
        assert_eq!(set.receiver_of(&"b".into()), Some(&"a".into()));
    }

    #[test]
    fn test_small_pools_never_reach_a_strategy() {
        let selector = AssignmentSelector::with_strategies(untouched(), untouched());
        let history = PairingHistory::new();

        for pool in [members(&[]), members(&["solo"])] {
            for mode in [SelectionMode::Random, SelectionMode::Optimal] {
                assert!(matches!(
                    selector.select(&pool, mode, &history),
                    Err(SelectorError::InsufficientMembers { .. })
                ));
            }
        }
    }
}
