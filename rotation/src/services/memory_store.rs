//! In-memory rotation store
//!
//! Keeps the ledger behind a `tokio` read-write lock. Nothing survives the
//! process; used by tests and by embedders that persist elsewhere.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{AssignmentPair, AssignmentSet, GuildId, MemberId, RotationId};
use tokio::sync::RwLock;

use crate::core::{Rotation, RotationLedger};
use crate::error::RotationResult;
use crate::traits::RotationStore;

#[derive(Debug, Default)]
pub struct MemoryRotationStore {
    ledger: RwLock<RotationLedger>,
}

impl MemoryRotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger
    pub fn with_ledger(ledger: RotationLedger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
        }
    }

    /// Copy of the current ledger
    pub async fn snapshot(&self) -> RotationLedger {
        self.ledger.read().await.clone()
    }
}

#[async_trait]
impl RotationStore for MemoryRotationStore {
    async fn insert_rotation(&self, rotation: Rotation) -> RotationResult<()> {
        self.ledger.write().await.insert(rotation)
    }

    async fn get_rotation(&self, rotation_id: RotationId) -> RotationResult<Option<Rotation>> {
        Ok(self.ledger.read().await.get(rotation_id).cloned())
    }

    async fn open_rotation_for_guild(&self, guild_id: &GuildId) -> RotationResult<Option<Rotation>> {
        Ok(self.ledger.read().await.open_for_guild(guild_id).cloned())
    }

    async fn latest_rotation_for_guild(&self, guild_id: &GuildId) -> RotationResult<Option<Rotation>> {
        Ok(self.ledger.read().await.latest_for_guild(guild_id).cloned())
    }

    async fn add_member(&self, rotation_id: RotationId, member: MemberId) -> RotationResult<Rotation> {
        self.ledger
            .write()
            .await
            .add_member(rotation_id, member)
            .cloned()
    }

    async fn set_message_id(&self, rotation_id: RotationId, message_id: String) -> RotationResult<()> {
        self.ledger.write().await.set_message_id(rotation_id, message_id)
    }

    async fn delete_rotation(&self, rotation_id: RotationId) -> RotationResult<Rotation> {
        self.ledger.write().await.remove_open(rotation_id)
    }

    async fn assignment_history(
        &self,
        guild_id: &GuildId,
        members: &[MemberId],
    ) -> RotationResult<Vec<AssignmentPair>> {
        Ok(self.ledger.read().await.assignment_history(guild_id, members))
    }

    async fn finalize_rotation(
        &self,
        rotation_id: RotationId,
        assignments: AssignmentSet,
        started_at: DateTime<Utc>,
    ) -> RotationResult<Rotation> {
        self.ledger
            .write()
            .await
            .finalize(rotation_id, assignments, started_at)
            .cloned()
    }
}
