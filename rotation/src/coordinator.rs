//! Rotation coordinator
//!
//! Drives the rotation lifecycle on top of an injected [`RotationStore`]:
//! opening, joining, starting (the single call into the assignment
//! selector), deleting and reporting.

use chrono::Utc;
use selector::{AssignmentSelector, SelectorConfig};
use shared::{
    rotation_debug, rotation_error, rotation_info, rotation_warn, GuildId, MemberId, PairingHistory,
    Permissions, RotationId, SelectionMode,
};

use crate::core::{Rotation, MIN_START_MEMBERS};
use crate::error::{RotationError, RotationResult};
use crate::traits::RotationStore;

pub struct RotationCoordinator<S>
where
    S: RotationStore + 'static,
{
    /// Injected persistence
    store: S,

    /// Assignment engine, invoked once per started rotation
    selector: AssignmentSelector,
}

impl<S> RotationCoordinator<S>
where
    S: RotationStore + 'static,
{
    /// Create a coordinator with the built-in selection strategies
    ///
    /// # Errors
    /// `Selection` if `config` is out of range
    pub fn new(store: S, config: &SelectorConfig) -> RotationResult<Self> {
        Ok(Self {
            store,
            selector: AssignmentSelector::new(config)?,
        })
    }

    pub fn with_selector(store: S, selector: AssignmentSelector) -> Self {
        Self { store, selector }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a rotation in `guild_id`
    ///
    /// # Errors
    /// `RotationAlreadyOpen` if the guild already has one
    pub async fn create_rotation(
        &self,
        guild_id: GuildId,
        initiator_id: MemberId,
        mode: SelectionMode,
    ) -> RotationResult<Rotation> {
        let rotation = Rotation::open(guild_id, initiator_id, mode);
        self.store.insert_rotation(rotation.clone()).await?;

        rotation_info!(
            rotation.id,
            guild = %rotation.guild_id,
            initiator = %rotation.initiator_id,
            mode = %rotation.mode,
            "🎁 Opened rotation"
        );
        Ok(rotation)
    }

    /// Add `member` to an open rotation
    pub async fn join(&self, rotation_id: RotationId, member: MemberId) -> RotationResult<Rotation> {
        let rotation = self.store.add_member(rotation_id, member.clone()).await?;

        rotation_debug!(
            rotation_id,
            member = %member,
            members = rotation.members.len(),
            "➕ Member joined"
        );
        Ok(rotation)
    }

    /// Compute and persist the assignment, moving the rotation to `Started`
    ///
    /// Only the initiator or an admin-equivalent caller may start, and only
    /// with at least [`MIN_START_MEMBERS`] members. The rotation is reported
    /// started only once the store has finalized it.
    pub async fn start(
        &self,
        rotation_id: RotationId,
        caller: &MemberId,
        permissions: Permissions,
    ) -> RotationResult<Rotation> {
        let rotation = self.require_rotation(rotation_id).await?;
        rotation.ensure_open()?;
        rotation.ensure_manager(caller, permissions, "start")?;

        if rotation.members.len() < MIN_START_MEMBERS {
            return Err(RotationError::NotEnoughMembers {
                have: rotation.members.len(),
                need: MIN_START_MEMBERS,
            });
        }

        let history = self.history_for(&rotation.guild_id, &rotation.members).await?;
        let assignments = self
            .selector
            .select(&rotation.members, rotation.mode, &history)?;

        let started = match self
            .store
            .finalize_rotation(rotation_id, assignments, Utc::now())
            .await
        {
            Ok(started) => started,
            Err(e) => {
                rotation_warn!(rotation_id, error = %e, "⚠️ Could not finalize rotation");
                return Err(e);
            }
        };

        rotation_info!(
            rotation_id,
            guild = %started.guild_id,
            members = started.members.len(),
            prior_pairs = history.total(),
            "🚀 Rotation started"
        );
        Ok(started)
    }

    /// Delete the guild's open rotation
    ///
    /// Returns the deleted rotation so callers can clean up its message.
    pub async fn delete_open_rotation(
        &self,
        guild_id: &GuildId,
        caller: &MemberId,
        permissions: Permissions,
    ) -> RotationResult<Rotation> {
        let rotation = self
            .store
            .open_rotation_for_guild(guild_id)
            .await?
            .ok_or_else(|| RotationError::NoOpenRotation {
                guild_id: guild_id.clone(),
            })?;
        rotation.ensure_manager(caller, permissions, "delete")?;

        let deleted = self.store.delete_rotation(rotation.id).await?;
        rotation_info!(deleted.id, caller = %caller, "🗑️ Deleted open rotation");
        Ok(deleted)
    }

    /// Most recently created rotation of the guild
    pub async fn latest_rotation(&self, guild_id: &GuildId) -> RotationResult<Rotation> {
        self.store
            .latest_rotation_for_guild(guild_id)
            .await?
            .ok_or_else(|| RotationError::NoRotations {
                guild_id: guild_id.clone(),
            })
    }

    /// Record the chat message that carries the rotation's controls
    pub async fn attach_message(&self, rotation_id: RotationId, message_id: String) -> RotationResult<()> {
        self.store.set_message_id(rotation_id, message_id).await
    }

    /// Pairing history across every started rotation of the guild
    pub async fn guild_history(&self, guild_id: &GuildId) -> RotationResult<PairingHistory> {
        self.history_for(guild_id, &[]).await
    }

    async fn history_for(&self, guild_id: &GuildId, members: &[MemberId]) -> RotationResult<PairingHistory> {
        let pairs = self.store.assignment_history(guild_id, members).await?;
        Ok(pairs.into_iter().collect())
    }

    async fn require_rotation(&self, rotation_id: RotationId) -> RotationResult<Rotation> {
        match self.store.get_rotation(rotation_id).await {
            Ok(Some(rotation)) => Ok(rotation),
            Ok(None) => Err(RotationError::RotationNotFound { rotation_id }),
            Err(e) => {
                rotation_error!(rotation_id, error = %e, "❌ Rotation lookup failed");
                Err(e)
            }
        }
    }
}
