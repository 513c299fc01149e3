//! Trait definitions with mockall annotations for testing
//!
//! Rotation storage is injected into the coordinator through
//! [`RotationStore`], so lifecycle logic can be tested against mocks and run
//! against either the in-memory or the file-backed store.

use chrono::{DateTime, Utc};
use shared::{AssignmentPair, AssignmentSet, GuildId, MemberId, RotationId};

use crate::core::Rotation;
use crate::error::RotationResult;

/// Persistence for rotations and their finalized assignments
///
/// Every mutating method is atomic with respect to the others: concurrent
/// callers observe either the state before or after each call.
#[mockall::automock]
#[async_trait::async_trait]
pub trait RotationStore: Send + Sync {
    /// Persist a newly opened rotation
    ///
    /// # Errors
    /// `RotationAlreadyOpen` if the guild already has an open rotation
    async fn insert_rotation(&self, rotation: Rotation) -> RotationResult<()>;

    async fn get_rotation(&self, rotation_id: RotationId) -> RotationResult<Option<Rotation>>;

    async fn open_rotation_for_guild(&self, guild_id: &GuildId) -> RotationResult<Option<Rotation>>;

    /// Most recently created rotation of the guild, open or started
    async fn latest_rotation_for_guild(&self, guild_id: &GuildId) -> RotationResult<Option<Rotation>>;

    /// Append a member to an open rotation and return the updated rotation
    ///
    /// # Errors
    /// `RotationNotFound`, `RotationAlreadyStarted` or `AlreadyJoined`
    async fn add_member(&self, rotation_id: RotationId, member: MemberId) -> RotationResult<Rotation>;

    async fn set_message_id(&self, rotation_id: RotationId, message_id: String) -> RotationResult<()>;

    /// Remove an open rotation and return it
    ///
    /// # Errors
    /// `RotationNotFound`, or `RotationAlreadyStarted` for started rotations
    async fn delete_rotation(&self, rotation_id: RotationId) -> RotationResult<Rotation>;

    /// Pairs from the guild's started rotations
    ///
    /// A non-empty `members` restricts the result to pairs whose sender and
    /// receiver both belong to it.
    async fn assignment_history(
        &self,
        guild_id: &GuildId,
        members: &[MemberId],
    ) -> RotationResult<Vec<AssignmentPair>>;

    /// Mark the rotation started and store its pairs as one operation
    ///
    /// Acts as a compare-and-swap on the rotation's status: nothing changes
    /// unless the rotation is still open and `assignments` covers exactly its
    /// current members.
    ///
    /// # Errors
    /// `RotationNotFound`, `RotationAlreadyStarted`, or `Shared` when the
    /// assignment does not match the member list
    async fn finalize_rotation(
        &self,
        rotation_id: RotationId,
        assignments: AssignmentSet,
        started_at: DateTime<Utc>,
    ) -> RotationResult<Rotation>;
}
