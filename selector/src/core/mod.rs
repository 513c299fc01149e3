//! Core selection logic
//!
//! This module contains pure business logic with no I/O dependencies.
//! Everything except the random shuffle is deterministic.

pub mod derangement;
pub mod matching;
pub mod tally;

pub use derangement::{all_derangements, random_derangement, subfactorial, Derangements};
pub use matching::{min_cost_assignment, min_cost_derangement};
pub use tally::{TallyMatrix, TallyTable};

use shared::MemberId;

use crate::error::{SelectorError, SelectorResult};

/// Smallest pool for which a derangement exists
pub const MIN_POOL_SIZE: usize = 2;

/// Fail with `InsufficientMembers` when no derangement of `pool` exists
pub fn ensure_minimum(pool: &[MemberId]) -> SelectorResult<()> {
    if pool.len() < MIN_POOL_SIZE {
        return Err(SelectorError::InsufficientMembers {
            count: pool.len(),
            minimum: MIN_POOL_SIZE,
        });
    }
    Ok(())
}
