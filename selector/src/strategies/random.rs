//! Uniform random selection strategy
//!
//! Draws one derangement per call by shuffling the pool and pairing each
//! member with the next one in the shuffled cycle. History is ignored.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shared::{AssignmentSet, MemberId, PairingHistory};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::traits::SelectionStrategy;
use crate::config::SelectorConfig;
use crate::core::{ensure_minimum, random_derangement};
use crate::error::SelectorResult;

/// Random selection strategy
///
/// Holds its RNG behind a mutex so a single strategy can serve concurrent
/// callers. Seeded instances produce the same sequence of assignments for
/// the same sequence of calls.
pub struct RandomStrategy {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomStrategy {
    /// Create a strategy seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Create a reproducible strategy
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_config(config: &SelectorConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl SelectionStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn assign(&self, pool: &[MemberId], _history: &PairingHistory) -> SelectorResult<AssignmentSet> {
        ensure_minimum(pool)?;

        // The RNG state stays usable even if another caller panicked mid-draw
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let assignment = random_derangement(pool, &mut *rng)?;

        debug!(members = pool.len(), "🎲 Drew random derangement");
        Ok(assignment)
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}
