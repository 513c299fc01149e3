//! In-memory rotation ledger
//!
//! Pure bookkeeping shared by every store implementation: rotations in
//! creation order plus the lookups and guarded mutations the store contract
//! needs. Stores wrap a ledger in their own lock and persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{AssignmentPair, AssignmentSet, GuildId, MemberId, RotationId};
use std::collections::HashSet;

use super::state::Rotation;
use crate::error::{RotationError, RotationResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationLedger {
    #[serde(default)]
    rotations: Vec<Rotation>,
}

impl RotationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rotation> + '_ {
        self.rotations.iter()
    }

    /// Record a new rotation
    ///
    /// A guild holds at most one open rotation at a time.
    pub fn insert(&mut self, rotation: Rotation) -> RotationResult<()> {
        if let Some(open) = self.open_for_guild(&rotation.guild_id) {
            return Err(RotationError::RotationAlreadyOpen {
                guild_id: rotation.guild_id.clone(),
                rotation_id: open.id,
            });
        }
        if self.get(rotation.id).is_some() {
            return Err(RotationError::store(format!(
                "duplicate rotation id {}",
                rotation.id
            )));
        }

        self.rotations.push(rotation);
        Ok(())
    }

    pub fn get(&self, rotation_id: RotationId) -> Option<&Rotation> {
        self.rotations.iter().find(|rotation| rotation.id == rotation_id)
    }

    fn get_mut(&mut self, rotation_id: RotationId) -> RotationResult<&mut Rotation> {
        self.rotations
            .iter_mut()
            .find(|rotation| rotation.id == rotation_id)
            .ok_or(RotationError::RotationNotFound { rotation_id })
    }

    pub fn open_for_guild(&self, guild_id: &GuildId) -> Option<&Rotation> {
        self.rotations
            .iter()
            .find(|rotation| &rotation.guild_id == guild_id && rotation.is_open())
    }

    /// Most recently created rotation of the guild
    pub fn latest_for_guild(&self, guild_id: &GuildId) -> Option<&Rotation> {
        self.rotations
            .iter()
            .rev()
            .find(|rotation| &rotation.guild_id == guild_id)
    }

    pub fn add_member(
        &mut self,
        rotation_id: RotationId,
        member: MemberId,
    ) -> RotationResult<&Rotation> {
        let rotation = self.get_mut(rotation_id)?;
        rotation.add_member(member)?;
        Ok(rotation)
    }

    pub fn set_message_id(
        &mut self,
        rotation_id: RotationId,
        message_id: String,
    ) -> RotationResult<()> {
        self.get_mut(rotation_id)?.message_id = Some(message_id);
        Ok(())
    }

    /// Remove an open rotation
    ///
    /// Started rotations are pairing history and stay put.
    pub fn remove_open(&mut self, rotation_id: RotationId) -> RotationResult<Rotation> {
        let position = self
            .rotations
            .iter()
            .position(|rotation| rotation.id == rotation_id)
            .ok_or(RotationError::RotationNotFound { rotation_id })?;
        self.rotations[position].ensure_open()?;
        Ok(self.rotations.remove(position))
    }

    /// Mark the rotation started and store its pairs in one step
    pub fn finalize(
        &mut self,
        rotation_id: RotationId,
        assignments: AssignmentSet,
        started_at: DateTime<Utc>,
    ) -> RotationResult<&Rotation> {
        let rotation = self.get_mut(rotation_id)?;
        rotation.finalize(assignments, started_at)?;
        Ok(rotation)
    }

    /// Pairs from the guild's started rotations
    ///
    /// With a non-empty `members`, only pairs whose sender and receiver both
    /// belong to it are returned.
    pub fn assignment_history(&self, guild_id: &GuildId, members: &[MemberId]) -> Vec<AssignmentPair> {
        let scope: HashSet<&MemberId> = members.iter().collect();

        self.rotations
            .iter()
            .filter(|rotation| &rotation.guild_id == guild_id)
            .filter_map(|rotation| rotation.assignments.as_ref())
            .flat_map(|assignments| assignments.iter())
            .filter(|pair| {
                scope.is_empty() || (scope.contains(&pair.sender) && scope.contains(&pair.receiver))
            })
            .cloned()
            .collect()
    }
}
