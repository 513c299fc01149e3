//! Selection strategy trait definitions

use shared::{AssignmentSet, MemberId, PairingHistory};

use crate::error::SelectorResult;

/// Strategy that turns a member pool into a complete assignment
#[mockall::automock]
pub trait SelectionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Compute an assignment over `pool`
    ///
    /// Implementations must return a bijection without self-pairs or an
    /// error; they never return a partial result. `history` holds prior
    /// pairings and may be ignored by strategies that do not weigh it.
    fn assign(&self, pool: &[MemberId], history: &PairingHistory) -> SelectorResult<AssignmentSet>;
}
